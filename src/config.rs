use crate::errors::SlaError;
use crate::models::{SlaPolicy, WorkingHoursPolicy};
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub working_hours: WorkingHoursPolicy,
    pub sla_policy: SlaPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let start_hour = env::var("SLA_START_HOUR")
            .unwrap_or_else(|_| "8".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidHour("SLA_START_HOUR"))?;

        let end_hour = env::var("SLA_END_HOUR")
            .unwrap_or_else(|_| "18".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidHour("SLA_END_HOUR"))?;

        // Fail fast: a broken window would never terminate the due-date loop
        let working_hours = WorkingHoursPolicy::new(start_hour, end_hour)?;

        let defaults = SlaPolicy::default();
        let sla_policy = SlaPolicy::new(
            env::var("SLA_VIP_RESPONSE_TIME").unwrap_or(defaults.vip_response_time),
            env::var("SLA_INCIDENT_RESPONSE_TIME").unwrap_or(defaults.incident_response_time),
            env::var("SLA_DEFAULT_RESPONSE_TIME").unwrap_or(defaults.default_response_time),
        )?;

        Ok(Config {
            working_hours,
            sla_policy,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be an integer hour of day")]
    InvalidHour(&'static str),

    #[error(transparent)]
    InvalidSla(#[from] SlaError),
}
