//! Seeded call-volume forecasts.
//!
//! Every curve is a pure function of the calendar date: re-querying a
//! date reproduces the same numbers, so navigating away and back shows
//! the same forecast without storing anything.

use crate::{
    config::ForecastConfig,
    error::{WfmError, WfmResult},
    rng::{date_seed, seeded_random},
    types::{slot_label, DAYS_PER_WEEK, SLOTS_PER_DAY},
};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Forecast call volume for one half-hour slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeSample {
    /// `HH:MM` label of the slot start.
    pub time: String,
    pub calls: u32,
}

/// One bar of the weekly forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayForecast {
    pub date: NaiveDate,
    /// Short axis label, e.g. `Mon 3/4`.
    pub name: String,
    /// Tooltip label, e.g. `Monday, Mar 4`.
    pub full_name: String,
    pub calls: u32,
    pub is_today: bool,
    pub is_selected: bool,
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[derive(Debug, Clone, Default)]
pub struct ForecastModel {
    config: ForecastConfig,
}

impl ForecastModel {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    /// 48 half-hour samples: a flat base, two Gaussian rush peaks and
    /// per-slot noise seeded by the date.
    pub fn daily_breakdown(&self, date: NaiveDate) -> Vec<VolumeSample> {
        let cfg = &self.config;
        let seed_base = date_seed(date) as f64;

        (0..SLOTS_PER_DAY)
            .map(|slot| {
                let x = slot as f64;
                // Accumulate left to right from the base so float rounding
                // matches base + peak1 + peak2 + noise exactly.
                let curve = cfg.peaks.iter().fold(cfg.intraday_base, |acc, p| {
                    acc + p.amplitude * (-(x - p.center).powi(2) / cfg.peak_spread).exp()
                });
                let noise =
                    seeded_random(seed_base + x * cfg.slot_seed_stride) * cfg.slot_noise_amplitude;
                let volume = (curve + noise).floor();

                VolumeSample {
                    time: slot_label(slot),
                    calls: volume.max(0.0) as u32,
                }
            })
            .collect()
    }

    /// Forecast daily total for one date.
    pub fn weekly_volume(&self, date: NaiveDate) -> u32 {
        let cfg = &self.config;
        let base = if is_weekend(date) {
            cfg.weekend_daily_base
        } else {
            cfg.weekday_daily_base
        };
        let noise = seeded_random(date_seed(date) as f64) * cfg.daily_noise_span
            - cfg.daily_noise_span / 2.0;
        let total = (base + noise).floor();

        total.max(cfg.daily_floor as f64) as u32
    }

    /// Busiest-hour estimate for a daily total; seeds the simulator.
    pub fn estimated_hourly(&self, daily_total: u32) -> u32 {
        (daily_total as f64 * self.config.hourly_share).round() as u32
    }

    pub fn hourly_volume_for_date(&self, date: NaiveDate) -> u32 {
        self.estimated_hourly(self.weekly_volume(date))
    }

    /// Seven consecutive daily totals starting at `week_start`.
    pub fn week_forecast(
        &self,
        week_start: NaiveDate,
        today: NaiveDate,
        selected: NaiveDate,
    ) -> WfmResult<Vec<DayForecast>> {
        (0..DAYS_PER_WEEK as u64)
            .map(|offset| {
                let date = week_start
                    .checked_add_days(Days::new(offset))
                    .ok_or(WfmError::DateOutOfRange { date: week_start })?;
                Ok(DayForecast {
                    date,
                    name: format!("{} {}/{}", date.format("%a"), date.month(), date.day()),
                    full_name: date.format("%A, %b %-d").to_string(),
                    calls: self.weekly_volume(date),
                    is_today: date == today,
                    is_selected: date == selected,
                })
            })
            .collect()
    }
}

/// Intraday curve for `date` under the default model.
pub fn daily_breakdown(date: NaiveDate) -> Vec<VolumeSample> {
    ForecastModel::default().daily_breakdown(date)
}

/// Daily total for `date` under the default model.
pub fn weekly_volume(date: NaiveDate) -> u32 {
    ForecastModel::default().weekly_volume(date)
}
