//! Calendar navigation and the "now" marker on the intraday chart.

use crate::{
    error::{WfmError, WfmResult},
    types::{slot_label, SlotIndex, DAYS_PER_WEEK},
};
use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Seconds between refreshes of the current-time marker.
pub const MARKER_REFRESH_SECS: i64 = 60;

/// Monday of the week containing `date`.
pub fn week_start_for(date: NaiveDate) -> WfmResult<NaiveDate> {
    let back = date.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(back))
        .ok_or(WfmError::DateOutOfRange { date })
}

fn shift(date: NaiveDate, days: i64) -> WfmResult<NaiveDate> {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.ok_or(WfmError::DateOutOfRange { date })
}

/// Selected day plus the week being shown.
///
/// The selection may sit outside the shown week after `prev_week` /
/// `next_week`; day steps pull the week back along with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateNavigator {
    pub today: NaiveDate,
    pub week_start: NaiveDate,
    pub selected: NaiveDate,
}

impl DateNavigator {
    pub fn new(today: NaiveDate) -> WfmResult<Self> {
        Ok(Self {
            today,
            week_start: week_start_for(today)?,
            selected: today,
        })
    }

    pub fn week_end(&self) -> WfmResult<NaiveDate> {
        shift(self.week_start, DAYS_PER_WEEK as i64 - 1)
    }

    pub fn is_today(&self) -> bool {
        self.selected == self.today
    }

    pub fn prev_day(&mut self) -> WfmResult<()> {
        self.selected = shift(self.selected, -1)?;
        if self.selected < self.week_start {
            self.prev_week()?;
        }
        Ok(())
    }

    pub fn next_day(&mut self) -> WfmResult<()> {
        self.selected = shift(self.selected, 1)?;
        if self.selected > self.week_end()? {
            self.next_week()?;
        }
        Ok(())
    }

    pub fn prev_week(&mut self) -> WfmResult<()> {
        self.week_start = shift(self.week_start, -(DAYS_PER_WEEK as i64))?;
        Ok(())
    }

    pub fn next_week(&mut self) -> WfmResult<()> {
        self.week_start = shift(self.week_start, DAYS_PER_WEEK as i64)?;
        Ok(())
    }

    /// Select a day, moving the shown week to contain it.
    pub fn select(&mut self, date: NaiveDate) -> WfmResult<()> {
        self.week_start = week_start_for(date)?;
        self.selected = date;
        Ok(())
    }

    pub fn jump_to_today(&mut self, today: NaiveDate) -> WfmResult<()> {
        self.today = today;
        self.select(today)
    }

    /// `Mar 4 - Mar 10` header for the shown week.
    pub fn week_range_label(&self) -> WfmResult<String> {
        Ok(format!(
            "{} - {}",
            self.week_start.format("%b %-d"),
            self.week_end()?.format("%b %-d")
        ))
    }
}

/// Slot the "now" marker points at: minutes round to the nearest half
/// hour, and anything that rounds past 23:30 falls off the chart.
pub fn current_slot(time: NaiveTime) -> Option<SlotIndex> {
    let (hour, half) = match time.minute() {
        m if m < 15 => (time.hour(), 0),
        m if m < 45 => (time.hour(), 1),
        _ => (time.hour() + 1, 0),
    };
    if hour > 23 {
        return None;
    }
    Some(hour as usize * 2 + half)
}

pub fn current_slot_label(time: NaiveTime) -> Option<String> {
    current_slot(time).map(slot_label)
}

// ── Wall clock ─────────────────────────────────────────────────────

/// Source of wall-clock reads. Injected so views can be tested.
pub trait Clock: Send {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Local time of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A settable clock. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<NaiveDateTime>>,
}

impl FixedClock {
    pub fn at(now: NaiveDateTime) -> Self {
        Self { now: Arc::new(Mutex::new(now)) }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut guard = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *guard += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ── Time marker ────────────────────────────────────────────────────

/// The "now" line on today's intraday chart.
///
/// Lives only while the daily view is mounted. Polls recompute the label
/// at most once per `MARKER_REFRESH_SECS`; `refresh` recomputes at once
/// (used when the selected date changes).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeMarker {
    pub slot: Option<SlotIndex>,
    last_refresh: Option<NaiveDateTime>,
}

impl TimeMarker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(&self) -> Option<String> {
        self.slot.map(slot_label)
    }

    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        match self.last_refresh {
            None => true,
            Some(last) => (now - last).num_seconds() >= MARKER_REFRESH_SECS,
        }
    }

    /// Recompute now. Returns true if the marker moved.
    pub fn refresh(&mut self, now: NaiveDateTime, showing_today: bool) -> bool {
        let slot = if showing_today { current_slot(now.time()) } else { None };
        self.last_refresh = Some(now);
        let moved = slot != self.slot;
        self.slot = slot;
        moved
    }

    /// Recompute if a refresh is due. Returns true if the marker moved.
    pub fn poll(&mut self, now: NaiveDateTime, showing_today: bool) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.refresh(now, showing_today)
    }
}
