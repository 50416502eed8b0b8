use chrono::{NaiveDate, NaiveDateTime};
use deskline::{
    BusinessCalendar, HolidayCalendar, SlaEngine, SlaPolicy, SlaWorkflow, WorkingHoursPolicy,
};

/// Install a test subscriber so failing runs show engine debug output.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

#[allow(dead_code)]
pub fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

#[allow(dead_code)]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Calendar with the stock 8..18 working window and the generated holiday
/// calendar.
#[allow(dead_code)]
pub fn test_calendar() -> BusinessCalendar {
    BusinessCalendar::new(WorkingHoursPolicy::default(), HolidayCalendar::new())
}

#[allow(dead_code)]
pub fn test_engine() -> SlaEngine {
    SlaEngine::new(test_calendar())
}

#[allow(dead_code)]
pub fn test_workflow() -> SlaWorkflow {
    SlaWorkflow::new(test_engine(), SlaPolicy::default())
}
