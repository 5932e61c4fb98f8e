//! Historical performance metrics and the dashboard KPI cards.
//!
//! History rows are synthetic but reproducible: each day draws from its
//! own pcg stream, so a day's row is the same whether it is generated
//! alone or as part of a three-year range.

use crate::{
    config::HistoryConfig,
    error::{WfmError, WfmResult},
    forecast::is_weekend,
    rng::{RngBank, StreamSlot},
};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub date: NaiveDate,
    /// Percent, one decimal.
    pub sla: f64,
    /// Average wait, seconds.
    pub wait_time: u32,
    pub calls: u32,
}

const WEEKDAY_BASE_CALLS: f64 = 9_000.0;
const WEEKEND_BASE_CALLS: f64 = 4_000.0;
const CALLS_SPREAD: f64 = 3_000.0;
const BASE_SLA: f64 = 92.0;
const SLA_HALF_SPREAD: f64 = 5.0;
const BASE_WAIT: f64 = 40.0;
const WAIT_HALF_SPREAD: f64 = 10.0;

/// One row per day in `start..=end`.
pub fn generate_history(start: NaiveDate, end: NaiveDate, seed: u64) -> WfmResult<Vec<HistoryRow>> {
    if start > end {
        return Err(WfmError::InvalidDateRange { start, end });
    }
    let bank = RngBank::new(seed);
    let rows: Vec<HistoryRow> = start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|date| history_row(&bank, date))
        .collect();

    log::debug!(
        "generated {} rows on stream '{}' {start}..={end} seed={seed}",
        rows.len(),
        StreamSlot::History.name()
    );
    Ok(rows)
}

fn history_row(bank: &RngBank, date: NaiveDate) -> HistoryRow {
    let mut rng = bank.for_stream_on_day(StreamSlot::History, date);
    let base_calls = if is_weekend(date) { WEEKEND_BASE_CALLS } else { WEEKDAY_BASE_CALLS };

    let calls = (base_calls + rng.next_f64() * CALLS_SPREAD).floor();
    let sla = (BASE_SLA + rng.symmetric(SLA_HALF_SPREAD)).min(100.0);
    let wait = (BASE_WAIT + rng.symmetric(WAIT_HALF_SPREAD)).floor();

    HistoryRow {
        date,
        sla: (sla * 10.0).round() / 10.0,
        wait_time: wait as u32,
        calls: calls as u32,
    }
}

// ── Sorting ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Date,
    Sla,
    WaitTime,
    Calls,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self { key: SortKey::Date, direction: SortDirection::Desc }
    }
}

impl SortConfig {
    /// Column-header click: a descending column flips to ascending,
    /// anything else (including a new column) starts descending.
    pub fn toggle(self, key: SortKey) -> Self {
        let direction = if self.key == key && self.direction == SortDirection::Desc {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        };
        Self { key, direction }
    }

    fn compare(&self, a: &HistoryRow, b: &HistoryRow) -> Ordering {
        let ord = match self.key {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Sla => a.sla.total_cmp(&b.sla),
            SortKey::WaitTime => a.wait_time.cmp(&b.wait_time),
            SortKey::Calls => a.calls.cmp(&b.calls),
        };
        let ord = match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };
        // Ties always fall back to oldest first, whatever order the rows
        // were left in by the previous sort.
        ord.then(a.date.cmp(&b.date))
    }
}

/// Ties are ordered chronologically.
pub fn sort_rows(rows: &mut [HistoryRow], sort: SortConfig) {
    rows.sort_by(|a, b| sort.compare(a, b));
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPage {
    pub sort: SortConfig,
    pub rows: Vec<HistoryRow>,
    /// Rows available before truncation.
    pub total: usize,
}

impl HistoryPage {
    pub fn is_truncated(&self) -> bool {
        self.total > self.rows.len()
    }
}

/// Generated history plus its current sort order.
#[derive(Debug, Clone)]
pub struct MetricsHistory {
    rows: Vec<HistoryRow>,
    sort: SortConfig,
    page_size: usize,
}

impl MetricsHistory {
    pub fn generate(config: &HistoryConfig) -> WfmResult<Self> {
        let mut rows = generate_history(config.start, config.end, config.seed)?;
        let sort = SortConfig::default();
        sort_rows(&mut rows, sort);
        Ok(Self { rows, sort, page_size: config.page_size })
    }

    pub fn rows(&self) -> &[HistoryRow] {
        &self.rows
    }

    pub fn sort_config(&self) -> SortConfig {
        self.sort
    }

    pub fn sort_by(&mut self, key: SortKey) {
        self.sort = self.sort.toggle(key);
        sort_rows(&mut self.rows, self.sort);
    }

    pub fn page(&self) -> HistoryPage {
        HistoryPage {
            sort: self.sort,
            rows: self.rows.iter().take(self.page_size).cloned().collect(),
            total: self.rows.len(),
        }
    }
}

// ── KPI cards ──────────────────────────────────────────────────────

/// Days in each comparison window.
pub const KPI_WINDOW_DAYS: u64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricCard {
    pub title: String,
    pub value: String,
    pub change: String,
    pub is_positive: bool,
    pub prev_week_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub as_of: NaiveDate,
    pub service_level: MetricCard,
    pub wait_time: MetricCard,
    pub calls: MetricCard,
}

struct WindowStats {
    sla: f64,
    wait: f64,
    calls: f64,
}

fn window_stats(rows: &[HistoryRow], first: NaiveDate, last: NaiveDate) -> Option<WindowStats> {
    let in_window: Vec<&HistoryRow> =
        rows.iter().filter(|r| r.date >= first && r.date <= last).collect();
    if in_window.is_empty() {
        return None;
    }
    let n = in_window.len() as f64;
    Some(WindowStats {
        sla: in_window.iter().map(|r| r.sla).sum::<f64>() / n,
        wait: in_window.iter().map(|r| r.wait_time as f64).sum::<f64>() / n,
        calls: in_window.iter().map(|r| r.calls as f64).sum::<f64>() / n,
    })
}

impl KpiSummary {
    /// Compare the week ending at `as_of` with the week before it.
    /// None when either window has no rows.
    pub fn from_history(rows: &[HistoryRow], as_of: NaiveDate) -> Option<Self> {
        let current_first = as_of.checked_sub_days(Days::new(KPI_WINDOW_DAYS - 1))?;
        let prev_last = as_of.checked_sub_days(Days::new(KPI_WINDOW_DAYS))?;
        let prev_first = as_of.checked_sub_days(Days::new(2 * KPI_WINDOW_DAYS - 1))?;

        let current = window_stats(rows, current_first, as_of)?;
        let previous = window_stats(rows, prev_first, prev_last)?;

        let sla_now = (current.sla * 10.0).round() / 10.0;
        let sla_prev = (previous.sla * 10.0).round() / 10.0;
        let sla_delta = sla_now - sla_prev;

        let wait_now = current.wait.round() as i64;
        let wait_prev = previous.wait.round() as i64;
        let wait_delta = wait_now - wait_prev;

        let calls_now = current.calls.round() as u64;
        let calls_prev = previous.calls.round() as u64;
        let calls_pct = if calls_prev == 0 {
            0.0
        } else {
            (calls_now as f64 - calls_prev as f64) / calls_prev as f64 * 100.0
        };

        Some(Self {
            as_of,
            service_level: MetricCard {
                title: "Service Level (SLA)".into(),
                value: format!("{sla_now:.1}%"),
                change: format!("{sla_delta:+.1}%"),
                is_positive: sla_delta >= 0.0,
                prev_week_value: format!("{sla_prev:.1}%"),
            },
            wait_time: MetricCard {
                title: "Avg. Waiting Time".into(),
                value: format!("{wait_now}s"),
                change: format!("{wait_delta:+}s"),
                is_positive: wait_delta <= 0,
                prev_week_value: format!("{wait_prev}s"),
            },
            calls: MetricCard {
                title: "Total Calls Processed".into(),
                value: group_thousands(calls_now),
                change: format!("{calls_pct:+.1}%"),
                is_positive: calls_pct >= 0.0,
                prev_week_value: group_thousands(calls_prev),
            },
        })
    }
}

/// `12450` -> `12,450`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
