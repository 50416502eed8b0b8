use chrono::{Datelike, Duration, NaiveDate};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

/// Fixed-date holidays observed on the calendar day itself (month, day).
const FIXED_HOLIDAYS: &[(u32, u32)] = &[
    (1, 1),   // Año Nuevo
    (5, 1),   // Día del Trabajo
    (7, 20),  // Día de la Independencia
    (8, 7),   // Batalla de Boyacá
    (12, 8),  // Inmaculada Concepción
    (12, 25), // Navidad
];

/// Movable holidays observed on the following Monday when the calendar day
/// is not already a Monday (Ley Emiliani).
const MONDAY_SHIFTED_HOLIDAYS: &[(u32, u32)] = &[
    (1, 6),   // Reyes Magos
    (3, 19),  // San José
    (6, 29),  // San Pedro y San Pablo
    (8, 15),  // Asunción de la Virgen
    (10, 12), // Día de la Raza
    (11, 1),  // Todos los Santos
    (11, 11), // Independencia de Cartagena
];

/// Easter-relative holidays observed on the exact offset day.
const EASTER_OFFSETS: &[i64] = &[
    -3, // Jueves Santo
    -2, // Viernes Santo
];

/// Easter-relative holidays subject to the Monday shift. The offsets from
/// Easter Sunday already land on Mondays (the liturgical dates are 39, 60
/// and 68 days out), so the shift is a no-op kept for uniformity.
const EASTER_MONDAY_OFFSETS: &[i64] = &[
    43, // Ascensión del Señor
    64, // Corpus Christi
    71, // Sagrado Corazón
];

/// Colombian public holiday calendar, generated per year from the fixed,
/// Monday-shifted and Easter-relative rules and cached on first use. Safe
/// to share across threads; the cache is append-only.
#[derive(Debug, Default)]
pub struct HolidayCalendar {
    cache: RwLock<HashMap<i32, Arc<BTreeSet<NaiveDate>>>>,
}

impl HolidayCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `date` is a public holiday. Day granularity only.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.holidays_for(date.year()).contains(&date)
    }

    /// The full holiday set for `year`, generated on first request.
    pub fn holidays_for(&self, year: i32) -> Arc<BTreeSet<NaiveDate>> {
        {
            let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
            if let Some(set) = cache.get(&year) {
                return Arc::clone(set);
            }
        }

        let generated = Arc::new(generate_holidays(year));
        tracing::debug!(
            "Generated {} public holidays for year {}",
            generated.len(),
            year
        );

        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        Arc::clone(cache.entry(year).or_insert(generated))
    }
}

fn generate_holidays(year: i32) -> BTreeSet<NaiveDate> {
    let mut holidays = BTreeSet::new();

    for &(month, day) in FIXED_HOLIDAYS {
        holidays.insert(ymd(year, month, day));
    }

    for &(month, day) in MONDAY_SHIFTED_HOLIDAYS {
        holidays.insert(shift_to_monday(ymd(year, month, day)));
    }

    let easter = easter_sunday(year);
    for &offset in EASTER_OFFSETS {
        holidays.insert(easter + Duration::days(offset));
    }
    for &offset in EASTER_MONDAY_OFFSETS {
        holidays.insert(shift_to_monday(easter + Duration::days(offset)));
    }

    holidays
}

/// Easter Sunday via the anonymous Gregorian computus.
pub fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    ymd(year, month as u32, day as u32)
}

/// A date already on Monday stays; anything else moves to the next Monday.
fn shift_to_monday(date: NaiveDate) -> NaiveDate {
    let days_ahead = (7 - date.weekday().num_days_from_monday()) % 7;
    date + Duration::days(i64::from(days_ahead))
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    // only called with rule table entries and computus output
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}
