use chrono::{Datelike, Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use crate::error::{Error, Result};

pub const DEFAULT_OUTPUT_DIR: &str = "Schedule";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_OUTBOX_DIR: &str = "reminders";
pub const DEFAULT_REMINDER_DAYS_AHEAD: i64 = 2;
pub const DEFAULT_PORT: u16 = 8080;

/// Everything a scheduling run needs
#[derive(Debug, Clone)]
pub struct ScheduleSettings {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Alternative roster CSV; the built-in roster is used when absent
    pub roster: Option<PathBuf>,
    pub start_date: NaiveDate,
    pub seed: Option<u64>,
}

/// Parses a YYYY-MM-DD date
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| Error::InvalidDate(value.to_string()))
}

/// Explicit start date if given, otherwise today when it is a Monday, else the next Monday
pub fn resolve_start_date(explicit: Option<NaiveDate>, today: NaiveDate) -> NaiveDate {
    if let Some(date) = explicit {
        return date;
    }
    let days_from_monday = today.weekday().num_days_from_monday() as i64;
    let days_until_monday = (7 - days_from_monday) % 7;
    today + Duration::days(days_until_monday)
}

/// Seeded generator when a seed is given, otherwise seeded from OS entropy
pub fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn start_date_policy() {
        // Sunday -> next day
        assert_eq!(resolve_start_date(None, date(2026, 10, 18)), date(2026, 10, 19));
        // Monday -> same day
        assert_eq!(resolve_start_date(None, date(2026, 10, 19)), date(2026, 10, 19));
        // Tuesday -> six days later
        assert_eq!(resolve_start_date(None, date(2026, 10, 20)), date(2026, 10, 26));
        // Explicit wins
        assert_eq!(
            resolve_start_date(Some(date(2026, 10, 22)), date(2026, 10, 20)),
            date(2026, 10, 22)
        );
    }

    #[test]
    fn parses_iso_dates_only() {
        assert_eq!(parse_date("2026-10-19").unwrap(), date(2026, 10, 19));
        assert!(matches!(parse_date("19/10/2026"), Err(Error::InvalidDate(_))));
    }
}
