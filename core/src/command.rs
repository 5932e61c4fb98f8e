use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Everything the dashboard UI can ask a session to do.
/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum SessionCommand {
    // ── Date navigation ───────────────────────────
    PrevDay,
    NextDay,
    PrevWeek,
    NextWeek,
    JumpToToday,
    SelectDate { date: NaiveDate },

    // ── Staffing targets ──────────────────────────
    SetTargets {
        sla:       f64,
        wait_time: f64,
        occupancy: f64,
    },

    // ── Simulator ─────────────────────────────────
    SetAgentSupply { agents: u32 },
    SetCallVolume { calls_per_hour: f64 },
    Reset,
}
