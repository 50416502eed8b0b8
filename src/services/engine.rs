use crate::errors::{SlaError, SlaResult};
use crate::services::calendar::BusinessCalendar;
use chrono::{Duration, NaiveDateTime};
use std::sync::Arc;

/// Computes SLA due dates by consuming working minutes against the business
/// calendar. Pure and side-effect free: the same inputs always yield the
/// same due date, so instances may be shared and invoked concurrently.
#[derive(Debug, Clone)]
pub struct SlaEngine {
    calendar: Arc<BusinessCalendar>,
}

impl SlaEngine {
    pub fn new(calendar: BusinessCalendar) -> Self {
        Self {
            calendar: Arc::new(calendar),
        }
    }

    pub fn calendar(&self) -> &BusinessCalendar {
        &self.calendar
    }

    /// Absolute instant at which `required_hours` of working time will have
    /// elapsed from `start`. Rejects non-positive durations.
    pub fn calculate_due_date(
        &self,
        start: NaiveDateTime,
        required_hours: i64,
    ) -> SlaResult<NaiveDateTime> {
        if required_hours <= 0 {
            return Err(SlaError::InvalidDuration(format!(
                "required hours must be positive, got {}",
                required_hours
            )));
        }
        self.calculate_due_date_minutes(start, required_hours * 60)
    }

    /// Minute-granularity variant, used for policy tiers expressed in
    /// minutes and for hold re-basing.
    pub fn calculate_due_date_minutes(
        &self,
        start: NaiveDateTime,
        required_minutes: i64,
    ) -> SlaResult<NaiveDateTime> {
        if required_minutes <= 0 {
            return Err(SlaError::InvalidDuration(format!(
                "required minutes must be positive, got {}",
                required_minutes
            )));
        }
        Ok(self.consume_working_minutes(start, required_minutes))
    }

    /// Shift a due date forward by the working time that elapsed while the
    /// SLA clock was stopped. A hold spanning only non-working time leaves
    /// the due date unchanged.
    pub fn resume_due_date(
        &self,
        original_due: NaiveDateTime,
        paused_at: NaiveDateTime,
        resumed_at: NaiveDateTime,
    ) -> SlaResult<NaiveDateTime> {
        if resumed_at < paused_at {
            return Err(SlaError::InvalidHoldInterval {
                paused_at,
                resumed_at,
            });
        }
        let elapsed = self.calendar.working_minutes_between(paused_at, resumed_at);
        if elapsed == 0 {
            return Ok(original_due);
        }
        Ok(self.consume_working_minutes(original_due, elapsed))
    }

    /// Each iteration consumes the rest of the current day's window, and the
    /// window is non-empty for any valid policy, so the loop terminates in
    /// as many iterations as calendar days touched.
    fn consume_working_minutes(&self, start: NaiveDateTime, mut remaining: i64) -> NaiveDateTime {
        let mut current = self.calendar.adjust_to_working_instant(start);
        loop {
            let window_end = self.calendar.policy().window_end(current.date());
            let available = (window_end - current).num_minutes();
            if available >= remaining {
                return current + Duration::minutes(remaining);
            }
            remaining -= available;
            current = self.calendar.next_working_window_start(current);
            tracing::debug!(
                "Day window exhausted, {} working minutes remain from {}",
                remaining,
                current
            );
        }
    }
}
