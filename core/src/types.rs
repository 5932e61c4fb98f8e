//! Shared primitive types used across the dashboard core.

/// Index of a half-hour slot within a day, 0..SLOTS_PER_DAY.
pub type SlotIndex = usize;

/// Number of half-hour forecasting slots in one day.
pub const SLOTS_PER_DAY: usize = 48;

/// Days shown in the weekly forecast.
pub const DAYS_PER_WEEK: usize = 7;

/// The canonical dashboard session identifier.
pub type SessionId = String;

/// Render a slot index as its `HH:MM` label.
pub fn slot_label(slot: SlotIndex) -> String {
    let hour = slot / 2;
    let minute = (slot % 2) * 30;
    format!("{hour:02}:{minute:02}")
}
