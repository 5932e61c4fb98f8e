//! Staffing requirement calculator.
//!
//! A heuristic stand-in for queueing-theory staffing: no Erlang-C
//! inversion is performed. Three targets each scale a base agent count
//! derived from a fixed average handle time, and the largest of the
//! three (the binding target) decides the requirement.

use crate::{
    config::{Range, StaffingConfig, TargetBounds},
    error::{WfmError, WfmResult},
    forecast::VolumeSample,
    types::SlotIndex,
};
use serde::{Deserialize, Serialize};

/// Service targets the requirement is sized against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    /// Percent of calls answered within the threshold.
    pub sla: f64,
    /// Target average wait, seconds.
    pub wait_time: f64,
    /// Percent of agent time spent handling contacts.
    pub occupancy: f64,
}

impl Default for Targets {
    fn default() -> Self {
        Self { sla: 90.0, wait_time: 30.0, occupancy: 85.0 }
    }
}

impl Targets {
    pub fn new(sla: f64, wait_time: f64, occupancy: f64) -> Self {
        Self { sla, wait_time, occupancy }
    }

    /// Reject values outside the domain the heuristic is defined on:
    /// sla in [50, 99], wait >= 5, occupancy in [50, 95].
    pub fn validate(&self) -> WfmResult<()> {
        if !self.sla.is_finite() || !(50.0..=99.0).contains(&self.sla) {
            return Err(WfmError::InvalidTarget { name: "sla", value: self.sla });
        }
        if !self.wait_time.is_finite() || self.wait_time < 5.0 {
            return Err(WfmError::InvalidTarget { name: "wait_time", value: self.wait_time });
        }
        if !self.occupancy.is_finite() || !(50.0..=95.0).contains(&self.occupancy) {
            return Err(WfmError::InvalidTarget { name: "occupancy", value: self.occupancy });
        }
        Ok(())
    }

    /// Pull each target into its slider range. NaN falls back to the
    /// range minimum.
    pub fn clamp_to(&self, bounds: &TargetBounds) -> Self {
        let pin = |value: f64, range: &Range| {
            if value.is_nan() { range.min } else { range.clamp(value) }
        };
        Self {
            sla: pin(self.sla, &bounds.sla),
            wait_time: pin(self.wait_time, &bounds.wait_time),
            occupancy: pin(self.occupancy, &bounds.occupancy),
        }
    }
}

/// Volume sample extended with the derived agent requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingSample {
    pub time: String,
    pub calls: u32,
    pub agents: u32,
}

#[derive(Debug, Clone, Default)]
pub struct StaffingCalculator {
    config: StaffingConfig,
}

impl StaffingCalculator {
    pub fn new(config: StaffingConfig) -> Self {
        Self { config }
    }

    pub fn required_agents(
        &self,
        calls_per_half_hour: f64,
        target_sla: f64,
        target_wait: f64,
        target_occupancy: f64,
    ) -> u32 {
        let cfg = &self.config;
        let calls_per_hour = calls_per_half_hour * 2.0;
        let base_agents = calls_per_hour * (cfg.avg_handle_time_minutes / 60.0);

        let sla_agents = base_agents * (target_sla / cfg.sla_baseline) * cfg.sla_buffer;
        let wait_agents = base_agents
            * (cfg.wait_baseline_secs / target_wait.max(cfg.wait_floor_secs))
            * cfg.wait_buffer;
        let occupancy_agents =
            base_agents * (cfg.occupancy_baseline / target_occupancy.max(cfg.occupancy_floor));

        let binding = sla_agents.max(wait_agents).max(occupancy_agents);
        let required = (binding * cfg.overall_buffer).ceil();

        if required.is_nan() || required < cfg.min_agents as f64 {
            cfg.min_agents
        } else {
            required as u32
        }
    }

    pub fn required_for(&self, calls_per_half_hour: u32, targets: &Targets) -> u32 {
        self.required_agents(
            calls_per_half_hour as f64,
            targets.sla,
            targets.wait_time,
            targets.occupancy,
        )
    }

    /// Map every volume point to its agent requirement.
    pub fn staffing_curve(&self, samples: &[VolumeSample], targets: &Targets) -> Vec<StaffingSample> {
        samples
            .iter()
            .map(|s| StaffingSample {
                time: s.time.clone(),
                calls: s.calls,
                agents: self.required_for(s.calls, targets),
            })
            .collect()
    }
}

/// Requirement under the default staffing model.
pub fn required_agents(
    calls_per_half_hour: f64,
    target_sla: f64,
    target_wait: f64,
    target_occupancy: f64,
) -> u32 {
    StaffingCalculator::default().required_agents(
        calls_per_half_hour,
        target_sla,
        target_wait,
        target_occupancy,
    )
}

/// Headline figures shown beside the daily chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingSummary {
    /// Present only when the curve is for today and the marker is on the chart.
    pub current_time_slot: Option<String>,
    pub current_call_volume: Option<u32>,
    pub current_required_agents: Option<u32>,
    pub peak_call_volume: u32,
    pub peak_required_agents: u32,
}

impl StaffingSummary {
    pub fn from_curve(curve: &[StaffingSample], current_slot: Option<SlotIndex>) -> Self {
        let current = current_slot.and_then(|slot| curve.get(slot));
        Self {
            current_time_slot: current.map(|s| s.time.clone()),
            current_call_volume: current.map(|s| s.calls),
            current_required_agents: current.map(|s| s.agents),
            peak_call_volume: curve.iter().map(|s| s.calls).max().unwrap_or(0),
            peak_required_agents: curve.iter().map(|s| s.agents).max().unwrap_or(0),
        }
    }
}
