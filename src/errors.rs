use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlaError {
    #[error("Invalid SLA duration: {0}")]
    InvalidDuration(String),
    #[error("Invalid working hours policy: start hour {start_hour} must be before end hour {end_hour} (within 0..=24)")]
    InvalidPolicy { start_hour: u32, end_hour: u32 },
    #[error("Invalid hold interval: resume time {resumed_at} is before pause time {paused_at}")]
    InvalidHoldInterval {
        paused_at: NaiveDateTime,
        resumed_at: NaiveDateTime,
    },
}

pub type SlaResult<T> = Result<T, SlaError>;
