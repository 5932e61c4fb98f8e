//! The dashboard session: one explicit context object per mounted view.
//!
//! Replaces lifted UI state. A session owns the selected date, the
//! staffing targets, the simulator inputs and (while the daily view is
//! mounted) the current-time marker. Nothing outlives the session:
//! drop it on unmount and every number is recomputed on the next open.
//!
//! RULES:
//!   - All state changes go through `apply` and are reported as events.
//!   - Views are pure reads of session state plus the forecast models.
//!   - Wall-clock reads go through the injected `Clock`.

use crate::{
    calendar::{current_slot, Clock, DateNavigator, TimeMarker},
    command::SessionCommand,
    config::WfmConfig,
    error::WfmResult,
    event::SessionEvent,
    forecast::{DayForecast, ForecastModel},
    history::MetricsHistory,
    simulator::{PerformanceSimulator, SimulationView, SimulatorInputs},
    staffing::{StaffingCalculator, StaffingSample, StaffingSummary, Targets},
    types::{slot_label, SessionId},
};
use chrono::NaiveDate;
use serde::Serialize;

/// Intraday forecast and staffing for the selected date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyView {
    pub date: NaiveDate,
    /// e.g. `Monday, March 4`.
    pub header: String,
    pub is_today: bool,
    pub targets: Targets,
    pub samples: Vec<StaffingSample>,
    pub summary: StaffingSummary,
    pub time_marker: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyView {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub range_label: String,
    pub days: Vec<DayForecast>,
}

pub struct DashboardSession {
    pub id: SessionId,
    config: WfmConfig,
    clock: Box<dyn Clock>,
    forecast: ForecastModel,
    staffing: StaffingCalculator,
    simulator: PerformanceSimulator,
    navigator: DateNavigator,
    targets: Targets,
    inputs: SimulatorInputs,
    time_marker: Option<TimeMarker>,
    events: Vec<SessionEvent>,
}

impl DashboardSession {
    /// Open a session on today's date.
    pub fn open(config: WfmConfig, clock: Box<dyn Clock>) -> WfmResult<Self> {
        config.validate()?;
        let id = uuid::Uuid::new_v4().to_string();
        let today = clock.today();
        let forecast = ForecastModel::new(config.forecast.clone());
        let staffing = StaffingCalculator::new(config.staffing.clone());
        let simulator = PerformanceSimulator::new(config.simulator.clone());

        let mut inputs = simulator.default_inputs();
        inputs.calls_per_hour = simulator.clamp_calls(forecast.hourly_volume_for_date(today) as f64);

        let mut session = Self {
            navigator: DateNavigator::new(today)?,
            targets: Targets::default().clamp_to(&config.target_bounds),
            id,
            config,
            clock,
            forecast,
            staffing,
            simulator,
            inputs,
            time_marker: None,
            events: Vec::new(),
        };

        log::info!("Session {} opened on {today}", session.id);
        session.record(vec![SessionEvent::SessionOpened {
            session_id: session.id.clone(),
            today,
        }]);
        Ok(session)
    }

    /// Load config from `data_dir` and open a session on it.
    pub fn open_from_dir(data_dir: &str, clock: Box<dyn Clock>) -> WfmResult<Self> {
        let config = WfmConfig::load(data_dir)?;
        Self::open(config, clock)
    }

    pub fn config(&self) -> &WfmConfig {
        &self.config
    }

    pub fn navigator(&self) -> &DateNavigator {
        &self.navigator
    }

    pub fn targets(&self) -> Targets {
        self.targets
    }

    pub fn simulator_inputs(&self) -> SimulatorInputs {
        self.inputs
    }

    /// Every event this session has emitted, oldest first.
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// The event log as a JSON array, for the UI bridge.
    pub fn events_json(&self) -> WfmResult<String> {
        Ok(serde_json::to_string(&self.events)?)
    }

    /// Apply one UI command. Returns the events it produced.
    pub fn apply(&mut self, command: SessionCommand) -> WfmResult<Vec<SessionEvent>> {
        self.sync_today();
        let mut out = Vec::new();

        match command {
            SessionCommand::PrevDay => {
                let week = self.navigator.week_start;
                self.navigator.prev_day()?;
                self.after_date_change(week, &mut out);
            }
            SessionCommand::NextDay => {
                let week = self.navigator.week_start;
                self.navigator.next_day()?;
                self.after_date_change(week, &mut out);
            }
            SessionCommand::PrevWeek => {
                self.navigator.prev_week()?;
                out.push(SessionEvent::WeekChanged { week_start: self.navigator.week_start });
            }
            SessionCommand::NextWeek => {
                self.navigator.next_week()?;
                out.push(SessionEvent::WeekChanged { week_start: self.navigator.week_start });
            }
            SessionCommand::JumpToToday => {
                let week = self.navigator.week_start;
                self.navigator.jump_to_today(self.clock.today())?;
                self.after_date_change(week, &mut out);
            }
            SessionCommand::SelectDate { date } => {
                let week = self.navigator.week_start;
                self.navigator.select(date)?;
                self.after_date_change(week, &mut out);
            }
            SessionCommand::SetTargets { sla, wait_time, occupancy } => {
                let requested = Targets::new(sla, wait_time, occupancy);
                let targets = requested.clamp_to(&self.config.target_bounds);
                targets.validate()?;
                let clamped = targets != requested;
                if clamped {
                    log::warn!("targets {requested:?} clamped to {targets:?}");
                }
                self.targets = targets;
                out.push(SessionEvent::TargetsChanged { targets, clamped });
            }
            SessionCommand::SetAgentSupply { agents } => {
                self.inputs.agent_count = self.simulator.clamp_agents(agents);
                out.push(SessionEvent::AgentSupplyChanged { agent_count: self.inputs.agent_count });
            }
            SessionCommand::SetCallVolume { calls_per_hour } => {
                self.inputs.calls_per_hour = self.simulator.clamp_calls(calls_per_hour);
                out.push(SessionEvent::CallVolumeChanged {
                    calls_per_hour: self.inputs.calls_per_hour,
                });
            }
            SessionCommand::Reset => {
                let today = self.clock.today();
                let week = self.navigator.week_start;
                self.navigator.jump_to_today(today)?;
                self.inputs.agent_count = self.simulator.default_inputs().agent_count;
                out.push(SessionEvent::SessionReset { today });
                out.push(SessionEvent::AgentSupplyChanged { agent_count: self.inputs.agent_count });
                self.after_date_change(week, &mut out);
            }
        }

        self.record(out.clone());
        Ok(out)
    }

    /// Follow-up for anything that moved the selected date: reseed the
    /// simulator volume, report a week change, re-aim the time marker.
    fn after_date_change(&mut self, week_before: NaiveDate, out: &mut Vec<SessionEvent>) {
        let date = self.navigator.selected;
        let hourly_volume = self.forecast.hourly_volume_for_date(date);
        out.push(SessionEvent::DateSelected { date, hourly_volume });

        if self.navigator.week_start != week_before {
            out.push(SessionEvent::WeekChanged { week_start: self.navigator.week_start });
        }

        self.inputs.calls_per_hour = self.simulator.clamp_calls(hourly_volume as f64);
        out.push(SessionEvent::CallVolumeChanged { calls_per_hour: self.inputs.calls_per_hour });

        let now = self.clock.now();
        let showing_today = self.showing_today();
        if let Some(marker) = self.time_marker.as_mut() {
            if marker.refresh(now, showing_today) {
                out.push(SessionEvent::TimeMarkerMoved { label: marker.label() });
            }
        }
    }

    /// The clock's date, not the one cached at open: a session left open
    /// past midnight must stop treating yesterday as today.
    fn showing_today(&self) -> bool {
        self.navigator.selected == self.clock.today()
    }

    fn sync_today(&mut self) {
        let today = self.clock.today();
        if self.navigator.today != today {
            log::info!("session={} date rolled over to {today}", self.id);
            self.navigator.today = today;
        }
    }

    fn record(&mut self, events: Vec<SessionEvent>) {
        for event in &events {
            log::debug!("session={} event={}", self.id, event.type_name());
        }
        self.events.extend(events);
    }

    // ── Daily view lifecycle ───────────────────────────────────────

    pub fn is_daily_view_mounted(&self) -> bool {
        self.time_marker.is_some()
    }

    /// Start the time marker. Mounting twice is a no-op.
    pub fn mount_daily_view(&mut self) -> Vec<SessionEvent> {
        if self.time_marker.is_some() {
            return Vec::new();
        }
        let mut marker = TimeMarker::new();
        self.sync_today();
        let moved = marker.refresh(self.clock.now(), self.showing_today());
        let mut out = vec![SessionEvent::DailyViewMounted];
        if moved {
            out.push(SessionEvent::TimeMarkerMoved { label: marker.label() });
        }
        self.time_marker = Some(marker);
        self.record(out.clone());
        out
    }

    /// Stop the time marker. Unmounting twice is a no-op.
    pub fn unmount_daily_view(&mut self) -> Vec<SessionEvent> {
        if self.time_marker.take().is_none() {
            return Vec::new();
        }
        let out = vec![SessionEvent::DailyViewUnmounted];
        self.record(out.clone());
        out
    }

    /// Called by the UI's timer. Refreshes the marker at most once per
    /// minute, and only while the daily view is mounted.
    pub fn poll_time_marker(&mut self) -> Option<SessionEvent> {
        if self.time_marker.is_none() {
            return None;
        }
        self.sync_today();
        let now = self.clock.now();
        let showing_today = self.showing_today();
        let marker = self.time_marker.as_mut()?;
        if !marker.poll(now, showing_today) {
            return None;
        }
        let event = SessionEvent::TimeMarkerMoved { label: marker.label() };
        log::debug!("session={} time marker -> {:?}", self.id, marker.label());
        self.record(vec![event.clone()]);
        Some(event)
    }

    // ── Views ──────────────────────────────────────────────────────

    pub fn daily_view(&self) -> DailyView {
        let date = self.navigator.selected;
        let is_today = self.showing_today();
        let volume = self.forecast.daily_breakdown(date);
        let samples = self.staffing.staffing_curve(&volume, &self.targets);

        let marker_slot = self.time_marker.as_ref().and_then(|m| m.slot);
        let current = if !is_today {
            None
        } else if self.time_marker.is_some() {
            marker_slot
        } else {
            current_slot(self.clock.now().time())
        };

        DailyView {
            date,
            header: date.format("%A, %B %-d").to_string(),
            is_today,
            targets: self.targets,
            summary: StaffingSummary::from_curve(&samples, current),
            samples,
            time_marker: marker_slot.map(slot_label),
        }
    }

    pub fn weekly_view(&self) -> WfmResult<WeeklyView> {
        let nav = &self.navigator;
        Ok(WeeklyView {
            week_start: nav.week_start,
            week_end: nav.week_end()?,
            range_label: nav.week_range_label()?,
            days: self.forecast.week_forecast(nav.week_start, self.clock.today(), nav.selected)?,
        })
    }

    pub fn simulation_view(&self) -> SimulationView {
        self.simulator.simulate(self.inputs)
    }

    /// History for the configured range, in default sort order.
    pub fn metrics_history(&self) -> WfmResult<MetricsHistory> {
        MetricsHistory::generate(&self.config.history)
    }
}
