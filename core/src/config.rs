use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Forecast model ─────────────────────────────────────────────────

/// One Gaussian rush peak on the intraday curve.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeakConfig {
    /// Slot index the peak is centered on.
    pub center: f64,
    pub amplitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastConfig {
    /// Flat floor under the intraday curve, calls per slot.
    pub intraday_base: f64,
    pub peaks: Vec<PeakConfig>,
    /// Denominator of the Gaussian exponent, shared by all peaks.
    pub peak_spread: f64,
    pub slot_noise_amplitude: f64,
    /// Seed offset between consecutive slots.
    pub slot_seed_stride: f64,
    pub weekday_daily_base: f64,
    pub weekend_daily_base: f64,
    /// Daily noise covers [-span/2, span/2).
    pub daily_noise_span: f64,
    pub daily_floor: u32,
    /// Share of a daily total assumed to land in the busiest hour.
    pub hourly_share: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            intraday_base: 20.0,
            peaks: vec![
                PeakConfig { center: 20.0, amplitude: 100.0 },
                PeakConfig { center: 30.0, amplitude: 80.0 },
            ],
            peak_spread: 50.0,
            slot_noise_amplitude: 15.0,
            slot_seed_stride: 13.0,
            weekday_daily_base: 12_500.0,
            weekend_daily_base: 6_000.0,
            daily_noise_span: 2_000.0,
            daily_floor: 4_000,
            hourly_share: 0.12,
        }
    }
}

// ── Staffing model ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffingConfig {
    pub avg_handle_time_minutes: f64,
    pub sla_baseline: f64,
    pub sla_buffer: f64,
    pub wait_baseline_secs: f64,
    pub wait_floor_secs: f64,
    pub wait_buffer: f64,
    pub occupancy_baseline: f64,
    pub occupancy_floor: f64,
    /// Applied to the binding factor before rounding up.
    pub overall_buffer: f64,
    pub min_agents: u32,
}

impl Default for StaffingConfig {
    fn default() -> Self {
        Self {
            avg_handle_time_minutes: 3.0,
            sla_baseline: 90.0,
            sla_buffer: 1.15,
            wait_baseline_secs: 30.0,
            wait_floor_secs: 5.0,
            wait_buffer: 1.1,
            occupancy_baseline: 85.0,
            occupancy_floor: 50.0,
            overall_buffer: 1.05,
            min_agents: 1,
        }
    }
}

/// Inclusive (min, max) pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Panics unless `is_valid`; `WfmConfig::validate` guarantees that for
    /// every range a session uses.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Both bounds finite and `min <= max`.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

fn check_range(name: &str, range: &Range) -> anyhow::Result<()> {
    if !range.is_valid() {
        anyhow::bail!("{name} range {}..{} is empty or not finite", range.min, range.max);
    }
    Ok(())
}

/// Slider bounds applied to targets before they reach the calculator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetBounds {
    pub sla: Range,
    pub wait_time: Range,
    pub occupancy: Range,
}

impl Default for TargetBounds {
    fn default() -> Self {
        Self {
            sla: Range::new(70.0, 99.0),
            wait_time: Range::new(10.0, 60.0),
            occupancy: Range::new(60.0, 95.0),
        }
    }
}

// ── Dashboard: simulator + history ─────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulatorConfig {
    pub agent_supply: Range,
    pub default_agents: u32,
    pub call_volume: Range,
    pub call_volume_step: f64,
    pub default_calls_per_hour: f64,
    /// Calls per hour one agent absorbs at the modeled break-even.
    pub calls_per_agent_hour: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            agent_supply: Range::new(20.0, 80.0),
            default_agents: 45,
            call_volume: Range::new(500.0, 2_000.0),
            call_volume_step: 50.0,
            default_calls_per_hour: 1_200.0,
            calls_per_agent_hour: 30.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryConfig {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub seed: u64,
    pub page_size: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap_or_default(),
            seed: 0x5EED_CA11,
            page_size: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct DashboardFile {
    target_bounds: TargetBounds,
    simulator: SimulatorConfig,
    history: HistoryConfig,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WfmConfig {
    pub forecast: ForecastConfig,
    pub staffing: StaffingConfig,
    pub target_bounds: TargetBounds,
    pub simulator: SimulatorConfig,
    pub history: HistoryConfig,
}

impl WfmConfig {
    /// Load from the data/ directory.
    /// In tests, use WfmConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let forecast_path = format!("{data_dir}/forecast/forecast_model.json");
        let forecast_content = std::fs::read_to_string(&forecast_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {forecast_path}: {e}"))?;
        let forecast: ForecastConfig = serde_json::from_str(&forecast_content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {forecast_path}: {e}"))?;

        let staffing_path = format!("{data_dir}/staffing/staffing_model.json");
        let staffing_content = std::fs::read_to_string(&staffing_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {staffing_path}: {e}"))?;
        let staffing: StaffingConfig = serde_json::from_str(&staffing_content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {staffing_path}: {e}"))?;

        let dashboard_path = format!("{data_dir}/dashboard/dashboard.json");
        let dashboard_content = std::fs::read_to_string(&dashboard_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {dashboard_path}: {e}"))?;
        let dashboard: DashboardFile = serde_json::from_str(&dashboard_content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {dashboard_path}: {e}"))?;

        let config = Self {
            forecast,
            staffing,
            target_bounds: dashboard.target_bounds,
            simulator: dashboard.simulator,
            history: dashboard.history,
        };
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("{dashboard_path}: {e}"))?;

        log::info!("Loaded dashboard config from {data_dir}");
        Ok(config)
    }

    /// Reject dashboard settings the session cannot run with: empty or
    /// non-finite slider ranges, a non-positive agent throughput, a
    /// negative volume step or a reversed history range.
    pub fn validate(&self) -> anyhow::Result<()> {
        check_range("target_bounds.sla", &self.target_bounds.sla)?;
        check_range("target_bounds.wait_time", &self.target_bounds.wait_time)?;
        check_range("target_bounds.occupancy", &self.target_bounds.occupancy)?;
        check_range("simulator.agent_supply", &self.simulator.agent_supply)?;
        check_range("simulator.call_volume", &self.simulator.call_volume)?;

        let sim = &self.simulator;
        if !sim.call_volume_step.is_finite() || sim.call_volume_step < 0.0 {
            anyhow::bail!("simulator.call_volume_step must be >= 0, got {}", sim.call_volume_step);
        }
        if !sim.calls_per_agent_hour.is_finite() || sim.calls_per_agent_hour <= 0.0 {
            anyhow::bail!(
                "simulator.calls_per_agent_hour must be > 0, got {}",
                sim.calls_per_agent_hour
            );
        }
        if self.history.start > self.history.end {
            anyhow::bail!(
                "history start {} is after end {}",
                self.history.start,
                self.history.end
            );
        }
        Ok(())
    }

    /// Config with hardcoded defaults for use in unit tests.
    pub fn default_test() -> Self {
        Self::default()
    }
}
