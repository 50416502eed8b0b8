use crate::errors::{SlaError, SlaResult};
use crate::models::ticket::TicketKind;
use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ===== Working Hours Policy =====

/// Daily working window in whole hours, interpreted in local server time.
/// Constructed once at startup; a policy with `start_hour >= end_hour` is
/// rejected there rather than detected per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHoursPolicy {
    start_hour: u32,
    end_hour: u32,
}

impl WorkingHoursPolicy {
    pub fn new(start_hour: u32, end_hour: u32) -> SlaResult<Self> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(SlaError::InvalidPolicy {
                start_hour,
                end_hour,
            });
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    /// Opening instant of the working window on `date`.
    pub fn window_start(&self, date: NaiveDate) -> NaiveDateTime {
        at_hour(date, self.start_hour)
    }

    /// Closing instant of the working window on `date` (exclusive). An
    /// `end_hour` of 24 rolls over to midnight of the following day.
    pub fn window_end(&self, date: NaiveDate) -> NaiveDateTime {
        if self.end_hour == 24 {
            at_hour(date + Days::new(1), 0)
        } else {
            at_hour(date, self.end_hour)
        }
    }

    pub fn minutes_per_day(&self) -> i64 {
        i64::from(self.end_hour - self.start_hour) * 60
    }
}

impl Default for WorkingHoursPolicy {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 18,
        }
    }
}

fn at_hour(date: NaiveDate, hour: u32) -> NaiveDateTime {
    // hour is below 24 for any validated policy
    date.and_hms_opt(hour, 0, 0).expect("hour within 0..24")
}

// ===== SLA Classification =====

pub const VIP_SLA_HOURS: i64 = 4;
pub const INCIDENT_SLA_HOURS: i64 = 8;
pub const DEFAULT_SLA_HOURS: i64 = 24;

/// Fixed SLA classification table. The VIP flag wins regardless of ticket
/// type; unrecognized ticket types fall back to the 24h request tier rather
/// than failing.
pub fn required_hours(is_vip: bool, ticket_type: &str) -> i64 {
    if is_vip {
        return VIP_SLA_HOURS;
    }
    match ticket_type.parse::<TicketKind>() {
        Ok(TicketKind::Incident) => INCIDENT_SLA_HOURS,
        _ => DEFAULT_SLA_HOURS,
    }
}

// ===== SLA Policy =====

/// Response-time tiers as duration strings ("4h", "30m", "1d"). The default
/// policy encodes the fixed 4h VIP / 8h incident / 24h request table;
/// deployments can tune the tiers through configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlaPolicy {
    pub vip_response_time: String,
    pub incident_response_time: String,
    pub default_response_time: String,
}

impl SlaPolicy {
    pub fn new(
        vip_response_time: String,
        incident_response_time: String,
        default_response_time: String,
    ) -> SlaResult<Self> {
        let policy = Self {
            vip_response_time,
            incident_response_time,
            default_response_time,
        };
        for tier in [
            &policy.vip_response_time,
            &policy.incident_response_time,
            &policy.default_response_time,
        ] {
            parse_duration(tier).map_err(SlaError::InvalidDuration)?;
        }
        Ok(policy)
    }

    /// Duration string of the tier a ticket classifies into.
    pub fn response_time_for(&self, is_vip: bool, ticket_type: &str) -> &str {
        if is_vip {
            return &self.vip_response_time;
        }
        match ticket_type.parse::<TicketKind>() {
            Ok(TicketKind::Incident) => &self.incident_response_time,
            _ => &self.default_response_time,
        }
    }

    /// Required working minutes for a ticket under this policy.
    pub fn required_minutes(&self, is_vip: bool, ticket_type: &str) -> SlaResult<i64> {
        let seconds = parse_duration(self.response_time_for(is_vip, ticket_type))
            .map_err(SlaError::InvalidDuration)?;
        Ok(seconds / 60)
    }
}

impl Default for SlaPolicy {
    fn default() -> Self {
        Self {
            vip_response_time: format!("{}h", VIP_SLA_HOURS),
            incident_response_time: format!("{}h", INCIDENT_SLA_HOURS),
            default_response_time: format!("{}h", DEFAULT_SLA_HOURS),
        }
    }
}

// ===== Duration Parsing Utility =====

use regex::Regex;
use std::sync::OnceLock;

/// Parse duration string like "2h", "30m", "1d" into seconds
pub fn parse_duration(duration_str: &str) -> Result<i64, String> {
    static DURATION_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = DURATION_REGEX
        .get_or_init(|| Regex::new(r"^(\d+)([hmd])$").expect("Invalid duration regex"));

    let caps = re.captures(duration_str).ok_or_else(|| {
        format!(
            "Invalid duration format: {}. Expected format: <number><h|m|d>",
            duration_str
        )
    })?;

    let number: i64 = caps[1]
        .parse()
        .map_err(|_| format!("Invalid number in duration: {}", &caps[1]))?;

    let unit = &caps[2];

    let seconds = match unit {
        "m" => number * 60,
        "h" => number * 60 * 60,
        "d" => number * 60 * 60 * 24,
        _ => return Err(format!("Invalid duration unit: {}", unit)),
    };

    if seconds <= 0 {
        return Err("Duration must be greater than 0".to_string());
    }

    Ok(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("2h").unwrap(), 7200);
        assert_eq!(parse_duration("30m").unwrap(), 1800);
        assert_eq!(parse_duration("1d").unwrap(), 86400);
    }

    #[test]
    fn test_parse_duration_invalid_format() {
        assert!(parse_duration("2x").is_err());
        assert!(parse_duration("h2").is_err());
        assert!(parse_duration("two hours").is_err());
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn test_parse_duration_zero() {
        assert!(parse_duration("0h").is_err());
        assert!(parse_duration("0m").is_err());
    }

    #[test]
    fn test_classification_table() {
        // VIP wins regardless of ticket type
        assert_eq!(required_hours(true, "INC"), 4);
        assert_eq!(required_hours(true, "REQ"), 4);
        assert_eq!(required_hours(true, "CHANGE"), 4);
        // Non-VIP incidents
        assert_eq!(required_hours(false, "INC"), 8);
        // Requests and anything unrecognized get the permissive default
        assert_eq!(required_hours(false, "REQ"), 24);
        assert_eq!(required_hours(false, "CHANGE"), 24);
        assert_eq!(required_hours(false, ""), 24);
    }

    #[test]
    fn test_default_policy_matches_classification_table() {
        let policy = SlaPolicy::default();
        for (is_vip, ticket_type) in [
            (true, "INC"),
            (true, "REQ"),
            (false, "INC"),
            (false, "REQ"),
            (false, "OTHER"),
        ] {
            assert_eq!(
                policy.required_minutes(is_vip, ticket_type).unwrap(),
                required_hours(is_vip, ticket_type) * 60
            );
        }
    }

    #[test]
    fn test_policy_rejects_invalid_tier() {
        assert!(SlaPolicy::new("4h".into(), "bogus".into(), "24h".into()).is_err());
    }

    #[test]
    fn test_working_hours_invariant() {
        assert!(WorkingHoursPolicy::new(8, 18).is_ok());
        assert!(WorkingHoursPolicy::new(0, 24).is_ok());
        assert!(matches!(
            WorkingHoursPolicy::new(18, 8),
            Err(SlaError::InvalidPolicy { .. })
        ));
        assert!(WorkingHoursPolicy::new(9, 9).is_err());
        assert!(WorkingHoursPolicy::new(8, 25).is_err());
    }

    #[test]
    fn test_window_end_at_midnight() {
        let policy = WorkingHoursPolicy::new(8, 24).unwrap();
        let date = chrono::NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(
            policy.window_end(date),
            chrono::NaiveDate::from_ymd_opt(2025, 3, 11)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
        assert_eq!(policy.minutes_per_day(), 16 * 60);
    }
}
