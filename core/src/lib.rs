//! Workforce-management core for the call-center dashboard.
//!
//! Seeded call-volume forecasts, the staffing requirement heuristic,
//! the performance simulator and synthetic metrics history. Everything
//! is computed on demand; nothing is stored.

pub mod calendar;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod forecast;
pub mod history;
pub mod rng;
pub mod session;
pub mod simulator;
pub mod staffing;
pub mod types;

pub use forecast::{daily_breakdown, weekly_volume};
pub use staffing::required_agents;
