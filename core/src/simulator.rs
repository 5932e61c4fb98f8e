//! Performance simulator: predicted service metrics for a given agent
//! supply and hourly call volume.
//!
//! Like the staffing calculator this is a linear heuristic, not a
//! queueing model. Each agent above break-even buys 2.5 SLA points and
//! eight seconds of wait.

use crate::config::SimulatorConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulatorInputs {
    pub agent_count: u32,
    pub calls_per_hour: f64,
}

/// Traffic-light band for a predicted metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Good,
    Warning,
    Critical,
}

impl Rating {
    /// SLA: >= 90 good, >= 80 warning.
    pub fn for_sla(sla: f64) -> Self {
        if sla >= 90.0 {
            Self::Good
        } else if sla >= 80.0 {
            Self::Warning
        } else {
            Self::Critical
        }
    }

    /// Wait: under 30s good, up to 60s warning.
    pub fn for_wait_time(wait_secs: u32) -> Self {
        match wait_secs {
            0..=29 => Self::Good,
            30..=60 => Self::Warning,
            _ => Self::Critical,
        }
    }

    /// Occupancy: 70-85 good, 60-70 or 85-90 warning.
    pub fn for_occupancy(occupancy: u32) -> Self {
        match occupancy {
            70..=85 => Self::Good,
            60..=69 | 86..=90 => Self::Warning,
            _ => Self::Critical,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedMetrics {
    /// Percent, one decimal.
    pub sla: f64,
    pub wait_time: u32,
    pub occupancy: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricAssessment {
    pub rating: Rating,
    pub recommendation: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationView {
    pub inputs: SimulatorInputs,
    pub metrics: PredictedMetrics,
    pub sla: MetricAssessment,
    pub wait_time: MetricAssessment,
    pub occupancy: MetricAssessment,
}

pub const SLA_RECOMMENDATION: &str = "Increase agent supply to boost service level.";
pub const WAIT_RECOMMENDATION: &str = "Reduce call volume or add agents to lower wait times.";
pub const OVERWORKED_RECOMMENDATION: &str = "Agents are overworked. Consider increasing supply.";
pub const UNDERUSED_RECOMMENDATION: &str = "Agents are underutilized. You can reduce supply.";

#[derive(Debug, Clone, Default)]
pub struct PerformanceSimulator {
    config: SimulatorConfig,
}

impl PerformanceSimulator {
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }

    pub fn default_inputs(&self) -> SimulatorInputs {
        SimulatorInputs {
            agent_count: self.config.default_agents,
            calls_per_hour: self.config.default_calls_per_hour,
        }
    }

    /// Pin agent supply into the slider range.
    pub fn clamp_agents(&self, agents: u32) -> u32 {
        self.config.agent_supply.clamp(agents as f64).round() as u32
    }

    /// Pin call volume into the slider range, snapped to its step.
    pub fn clamp_calls(&self, calls_per_hour: f64) -> f64 {
        let range = &self.config.call_volume;
        if calls_per_hour.is_nan() {
            return range.min;
        }
        let step = self.config.call_volume_step;
        let clamped = range.clamp(calls_per_hour);
        if step <= 0.0 {
            return clamped;
        }
        let snapped = range.min + ((clamped - range.min) / step).round() * step;
        snapped.min(range.max)
    }

    pub fn predict(&self, inputs: &SimulatorInputs) -> PredictedMetrics {
        let agents = inputs.agent_count.max(1) as f64;
        let base_agents = inputs.calls_per_hour / self.config.calls_per_agent_hour;
        let surplus = agents - base_agents;

        let sla = (80.0 + surplus * 2.5).clamp(10.0, 99.9);
        let wait = (60.0 - surplus * 8.0).max(5.0);
        let occupancy = (100.0 * (base_agents / agents)).clamp(40.0, 100.0);

        PredictedMetrics {
            sla: (sla * 10.0).round() / 10.0,
            wait_time: wait.round() as u32,
            occupancy: occupancy.round() as u32,
        }
    }

    pub fn simulate(&self, inputs: SimulatorInputs) -> SimulationView {
        let metrics = self.predict(&inputs);
        SimulationView {
            sla: MetricAssessment {
                rating: Rating::for_sla(metrics.sla),
                recommendation: sla_recommendation(metrics.sla),
            },
            wait_time: MetricAssessment {
                rating: Rating::for_wait_time(metrics.wait_time),
                recommendation: wait_recommendation(metrics.wait_time),
            },
            occupancy: MetricAssessment {
                rating: Rating::for_occupancy(metrics.occupancy),
                recommendation: occupancy_recommendation(metrics.occupancy),
            },
            inputs,
            metrics,
        }
    }
}

fn sla_recommendation(sla: f64) -> Option<&'static str> {
    (sla < 90.0).then_some(SLA_RECOMMENDATION)
}

fn wait_recommendation(wait_secs: u32) -> Option<&'static str> {
    (wait_secs > 30).then_some(WAIT_RECOMMENDATION)
}

fn occupancy_recommendation(occupancy: u32) -> Option<&'static str> {
    if occupancy > 85 {
        Some(OVERWORKED_RECOMMENDATION)
    } else if occupancy < 70 {
        Some(UNDERUSED_RECOMMENDATION)
    } else {
        None
    }
}
