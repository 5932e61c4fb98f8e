//! Session events: every state change a dashboard session makes.
//!
//! RULE: Views are recomputed from session state; events only report
//! what changed so a UI bridge can decide what to re-render.

use crate::{
    staffing::Targets,
    types::SessionId,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    // ── Lifecycle ──────────────────────────────────
    SessionOpened {
        session_id: SessionId,
        today: NaiveDate,
    },
    SessionReset {
        today: NaiveDate,
    },
    DailyViewMounted,
    DailyViewUnmounted,

    // ── Navigation ─────────────────────────────────
    DateSelected {
        date: NaiveDate,
        /// Busiest-hour estimate for the date, before slider clamping.
        hourly_volume: u32,
    },
    WeekChanged {
        week_start: NaiveDate,
    },
    TimeMarkerMoved {
        label: Option<String>,
    },

    // ── Inputs ─────────────────────────────────────
    TargetsChanged {
        targets: Targets,
        /// True if any requested value was pulled into its slider range.
        clamped: bool,
    },
    AgentSupplyChanged {
        agent_count: u32,
    },
    CallVolumeChanged {
        calls_per_hour: f64,
    },
}

impl SessionEvent {
    /// Stable string name for the variant, used in logs.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SessionOpened { .. }      => "session_opened",
            Self::SessionReset { .. }       => "session_reset",
            Self::DailyViewMounted          => "daily_view_mounted",
            Self::DailyViewUnmounted        => "daily_view_unmounted",
            Self::DateSelected { .. }       => "date_selected",
            Self::WeekChanged { .. }        => "week_changed",
            Self::TimeMarkerMoved { .. }    => "time_marker_moved",
            Self::TargetsChanged { .. }     => "targets_changed",
            Self::AgentSupplyChanged { .. } => "agent_supply_changed",
            Self::CallVolumeChanged { .. }  => "call_volume_changed",
        }
    }
}
