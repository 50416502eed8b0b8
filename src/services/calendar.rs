use crate::models::WorkingHoursPolicy;
use crate::services::holidays::HolidayCalendar;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use std::sync::Arc;

/// Resolves arbitrary instants against the daily working window, weekends
/// and the public holiday calendar. All instants are timezone-naive and
/// interpreted in local server time.
#[derive(Debug, Clone)]
pub struct BusinessCalendar {
    policy: WorkingHoursPolicy,
    holidays: Arc<HolidayCalendar>,
}

impl BusinessCalendar {
    pub fn new(policy: WorkingHoursPolicy, holidays: HolidayCalendar) -> Self {
        Self {
            policy,
            holidays: Arc::new(holidays),
        }
    }

    pub fn policy(&self) -> WorkingHoursPolicy {
        self.policy
    }

    /// False on Saturdays, Sundays and public holidays. A holiday that also
    /// falls on a weekend stays non-working.
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.holidays.contains(date)
    }

    /// Normalize an instant into working time:
    /// non-working dates advance to the next day's window start, instants
    /// before the window snap to its start, and instants at or past the
    /// window end roll over (an instant exactly at the end hour counts as
    /// past the window). Instants already inside the window are returned
    /// unchanged, so the operation is idempotent.
    pub fn adjust_to_working_instant(&self, instant: NaiveDateTime) -> NaiveDateTime {
        let mut current = instant;
        loop {
            let date = current.date();
            if !self.is_working_day(date) {
                tracing::debug!("Skipping non-working day {}", date);
                current = self.policy.window_start(next_day(date));
                continue;
            }
            if current < self.policy.window_start(date) {
                return self.policy.window_start(date);
            }
            if current >= self.policy.window_end(date) {
                current = self.policy.window_start(next_day(date));
                continue;
            }
            return current;
        }
    }

    /// Start of the first working window strictly after the instant's
    /// calendar day. Used once a day's window has been fully consumed.
    pub fn next_working_window_start(&self, instant: NaiveDateTime) -> NaiveDateTime {
        self.adjust_to_working_instant(next_day(instant.date()).and_time(NaiveTime::MIN))
    }

    /// Whole working minutes between two instants, summing per-day
    /// intersections with the working window across working days. Returns 0
    /// when `to` is not after `from`.
    pub fn working_minutes_between(&self, from: NaiveDateTime, to: NaiveDateTime) -> i64 {
        if to <= from {
            return 0;
        }
        let mut minutes = 0;
        let mut day = from.date();
        while day <= to.date() {
            if self.is_working_day(day) {
                let open = self.policy.window_start(day).max(from);
                let close = self.policy.window_end(day).min(to);
                if close > open {
                    minutes += (close - open).num_minutes();
                }
            }
            day = next_day(day);
        }
        minutes
    }
}

fn next_day(date: NaiveDate) -> NaiveDate {
    date + Duration::days(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn calendar() -> BusinessCalendar {
        BusinessCalendar::new(WorkingHoursPolicy::default(), HolidayCalendar::new())
    }

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_is_working_day() {
        let cal = calendar();
        // Ordinary Monday
        assert!(cal.is_working_day(dt(2025, 3, 10, 0, 0).date()));
        // Weekend
        assert!(!cal.is_working_day(dt(2025, 3, 15, 0, 0).date()));
        assert!(!cal.is_working_day(dt(2025, 3, 16, 0, 0).date()));
        // Holiday on a weekday (New Year 2025, a Wednesday)
        assert!(!cal.is_working_day(dt(2025, 1, 1, 0, 0).date()));
        // Holiday that is also a Saturday (Independence Day 2024)
        assert!(!cal.is_working_day(dt(2024, 7, 20, 0, 0).date()));
    }

    #[test]
    fn test_adjust_boundaries() {
        let cal = calendar();
        // Exactly at the window start is valid
        assert_eq!(
            cal.adjust_to_working_instant(dt(2025, 3, 10, 8, 0)),
            dt(2025, 3, 10, 8, 0)
        );
        // Exactly at the window end is past the window
        assert_eq!(
            cal.adjust_to_working_instant(dt(2025, 3, 10, 18, 0)),
            dt(2025, 3, 11, 8, 0)
        );
        // Before the window snaps to its start
        assert_eq!(
            cal.adjust_to_working_instant(dt(2025, 3, 10, 7, 15)),
            dt(2025, 3, 10, 8, 0)
        );
    }

    #[test]
    fn test_adjust_skips_weekends_and_holidays() {
        let cal = calendar();
        // Friday evening rolls to Monday morning
        assert_eq!(
            cal.adjust_to_working_instant(dt(2025, 3, 14, 20, 0)),
            dt(2025, 3, 17, 8, 0)
        );
        // Dec 31 2024 evening rolls over New Year's Day to Jan 2
        assert_eq!(
            cal.adjust_to_working_instant(dt(2024, 12, 31, 19, 0)),
            dt(2025, 1, 2, 8, 0)
        );
    }

    #[test]
    fn test_adjust_is_idempotent() {
        let cal = calendar();
        for instant in [
            dt(2025, 3, 10, 9, 30),
            dt(2025, 3, 14, 17, 59),
            dt(2025, 3, 15, 12, 0),
            dt(2025, 3, 10, 18, 0),
            dt(2024, 12, 31, 23, 59),
        ] {
            let once = cal.adjust_to_working_instant(instant);
            assert_eq!(cal.adjust_to_working_instant(once), once);
        }
    }

    #[test]
    fn test_next_working_window_start() {
        let cal = calendar();
        assert_eq!(
            cal.next_working_window_start(dt(2025, 3, 10, 9, 0)),
            dt(2025, 3, 11, 8, 0)
        );
        // From Friday the next window is Monday
        assert_eq!(
            cal.next_working_window_start(dt(2025, 3, 14, 9, 0)),
            dt(2025, 3, 17, 8, 0)
        );
    }

    #[test]
    fn test_working_minutes_between() {
        let cal = calendar();
        // Within one day
        assert_eq!(
            cal.working_minutes_between(dt(2025, 3, 10, 9, 0), dt(2025, 3, 10, 11, 30)),
            150
        );
        // Across a weekend: Friday 16:00 -> Monday 10:00 is 2h + 2h
        assert_eq!(
            cal.working_minutes_between(dt(2025, 3, 14, 16, 0), dt(2025, 3, 17, 10, 0)),
            240
        );
        // Entirely outside working time
        assert_eq!(
            cal.working_minutes_between(dt(2025, 3, 15, 9, 0), dt(2025, 3, 16, 20, 0)),
            0
        );
        // Reversed interval
        assert_eq!(
            cal.working_minutes_between(dt(2025, 3, 11, 9, 0), dt(2025, 3, 10, 9, 0)),
            0
        );
    }
}
