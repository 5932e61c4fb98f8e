use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WfmError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid target '{name}': {value}")]
    InvalidTarget { name: &'static str, value: f64 },

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Date arithmetic left the supported calendar range near {date}")]
    DateOutOfRange { date: NaiveDate },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type WfmResult<T> = Result<T, WfmError>;
