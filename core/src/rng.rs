//! Deterministic pseudo-random sources.
//!
//! RULE: Nothing in the dashboard core may call any platform RNG.
//! Two sources exist, and every "random" number flows through one of them:
//!   - `seeded_random`, the trigonometric hash behind the forecast curves.
//!     Its exact formula is part of the output contract; do not swap it.
//!   - `StreamRng`, a pcg stream used for the metrics history, derived
//!     from (master_seed, stream slot, calendar day). A day's stream never
//!     depends on which range was requested.

use chrono::{Datelike, NaiveDate};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// Fractional part of `sin(seed) * 10000`, in [0.0, 1.0).
///
/// Not a real PRNG: adjacent seeds are correlated and the distribution is
/// uneven. It only has to reproduce the same noise for the same date.
pub fn seeded_random(seed: f64) -> f64 {
    let x = seed.sin() * 10000.0;
    x - x.floor()
}

/// `year*10000 + month*100 + day`, e.g. 2024-03-07 -> 20240307.
pub fn date_seed(date: NaiveDate) -> i64 {
    date.year() as i64 * 10_000 + date.month() as i64 * 100 + date.day() as i64
}

/// A deterministic RNG for one stream.
pub struct StreamRng {
    inner: Pcg64Mcg,
}

impl StreamRng {
    /// Create a stream RNG from the master seed and a stable stream
    /// index. The index must never change once assigned.
    pub fn new(master_seed: u64, stream_index: u64) -> Self {
        let derived_seed = master_seed ^ (stream_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Uniform float in [-half_span, half_span).
    pub fn symmetric(&mut self, half_span: f64) -> f64 {
        self.next_f64() * 2.0 * half_span - half_span
    }
}

/// All stream RNGs for one master seed, indexed by stable slot.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// A stream re-derived for a single calendar day.
    pub fn for_stream_on_day(&self, slot: StreamSlot, date: NaiveDate) -> StreamRng {
        let day = date.num_days_from_ce() as i64 as u64;
        let day_seed = self.master_seed ^ day.wrapping_mul(0xbf58_476d_1ce4_e5b9);
        StreamRng::new(day_seed, slot as u64)
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries, only append.
/// Reordering changes every stream's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    History = 0,
    // Add new streams here, append only.
}

impl StreamSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::History => "history",
        }
    }
}
