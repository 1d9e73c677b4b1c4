use chrono::Weekday;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::calendar::{day_name, is_weekend, parse_day_name};
use crate::error::{Error, Result};

/// At most this many interviewers sit on one session
pub const MAX_INTERVIEWERS: usize = 3;

/// Built-in weekly table: (day, time range, interviewers).
/// Time ranges use the calendar's labels, so the evening slot is `5:30PM-7:00PM`.
const STANDARD_ROSTER: &[(Weekday, &str, &[&str])] = &[
    (Weekday::Mon, "9:30AM-10:30AM", &["H", "A"]),
    (Weekday::Mon, "10:30AM-11:30AM", &[]),
    (Weekday::Mon, "11:30AM-12:30PM", &["H", "A"]),
    (Weekday::Mon, "12:30PM-2PM", &["H", "S", "A"]),
    (Weekday::Mon, "2PM-3:30PM", &["S", "A"]),
    (Weekday::Mon, "3:30PM-5PM", &["S", "A"]),
    (Weekday::Mon, "5:30PM-7:00PM", &[]),
    (Weekday::Mon, "7PM-8:30PM", &["A", "S"]),
    (Weekday::Tue, "9:30AM-10:30AM", &[]),
    (Weekday::Tue, "10:30AM-11:30AM", &[]),
    (Weekday::Tue, "11:30AM-12:30PM", &["H", "S"]),
    (Weekday::Tue, "12:30PM-2PM", &["H", "S"]),
    (Weekday::Tue, "2PM-3:30PM", &["A"]),
    (Weekday::Tue, "3:30PM-5PM", &[]),
    (Weekday::Tue, "5:30PM-7:00PM", &["H", "A"]),
    (Weekday::Tue, "7PM-8:30PM", &["H", "A"]),
    (Weekday::Wed, "9:30AM-10:30AM", &["H", "S"]),
    (Weekday::Wed, "10:30AM-11:30AM", &["H", "A"]),
    (Weekday::Wed, "11:30AM-12:30PM", &[]),
    (Weekday::Wed, "12:30PM-2PM", &["H", "S", "A"]),
    (Weekday::Wed, "2PM-3:30PM", &["H", "S", "A"]),
    (Weekday::Wed, "3:30PM-5PM", &["H", "S", "A"]),
    (Weekday::Wed, "5:30PM-7:00PM", &["H", "S", "A"]),
    (Weekday::Wed, "7PM-8:30PM", &["H", "S", "A"]),
    (Weekday::Thu, "9:30AM-10:30AM", &["H", "A"]),
    (Weekday::Thu, "10:30AM-11:30AM", &["H", "S"]),
    (Weekday::Thu, "11:30AM-12:30PM", &["A"]),
    (Weekday::Thu, "12:30PM-2PM", &["H", "S"]),
    (Weekday::Thu, "2PM-3:30PM", &["H", "S"]),
    (Weekday::Thu, "3:30PM-5PM", &["H", "S"]),
    (Weekday::Thu, "5:30PM-7:00PM", &[]),
    (Weekday::Thu, "7PM-8:30PM", &["A"]),
    (Weekday::Fri, "9:30AM-10:30AM", &["H", "S"]),
    (Weekday::Fri, "10:30AM-11:30AM", &["H", "S"]),
    (Weekday::Fri, "11:30AM-12:30PM", &["S", "A"]),
    (Weekday::Fri, "12:30PM-2PM", &["H", "S", "A"]),
    (Weekday::Fri, "2PM-3:30PM", &["A"]),
    (Weekday::Fri, "3:30PM-5PM", &[]),
    (Weekday::Fri, "5:30PM-7:00PM", &["H", "A"]),
    (Weekday::Fri, "7PM-8:30PM", &["H", "A"]),
];

/// Static weekly mapping of (weekday, time range) to interviewers.
///
/// Built once and never mutated; lookups are pure. Weekend days have no rows.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    table: HashMap<Weekday, HashMap<String, Vec<String>>>,
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Day")]
    day: String,
    #[serde(rename = "Time Range")]
    time_range: String,
    #[serde(rename = "Interviewers", default)]
    interviewers: String,
}

/// Splits "H, S, A" into ["H", "S", "A"]; empty input gives no interviewers
fn split_interviewers(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

impl Roster {
    pub fn standard() -> Self {
        let mut roster = Roster::default();
        for (day, range, interviewers) in STANDARD_ROSTER {
            roster.table.entry(*day).or_default().insert(
                range.to_string(),
                interviewers.iter().map(|i| i.to_string()).collect(),
            );
        }
        roster
    }

    pub fn load<P: AsRef<Path>>(csv_path: P) -> Result<Self> {
        let file = std::fs::File::open(csv_path)?;
        Self::from_reader(file)
    }

    /// Reads a roster from CSV with columns `Day,Time Range,Interviewers`
    pub fn from_reader<R: Read>(input: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(input);
        let mut roster = Roster::default();

        for result in reader.deserialize::<RosterRow>() {
            let row = result?;
            let day = parse_day_name(&row.day)
                .ok_or_else(|| Error::InvalidRoster(format!("unknown day '{}'", row.day)))?;
            if is_weekend(day) {
                return Err(Error::InvalidRoster(format!(
                    "{} has no interviewer roster",
                    day_name(day)
                )));
            }

            let interviewers = split_interviewers(&row.interviewers);
            if interviewers.len() > MAX_INTERVIEWERS {
                return Err(Error::InvalidRoster(format!(
                    "{} {} lists {} interviewers, at most {} allowed",
                    day_name(day),
                    row.time_range.trim(),
                    interviewers.len(),
                    MAX_INTERVIEWERS
                )));
            }

            roster
                .table
                .entry(day)
                .or_default()
                .insert(row.time_range.trim().to_string(), interviewers);
        }

        Ok(roster)
    }

    /// Interviewers for a weekday time range. Gaps and unknown ranges give an empty list.
    pub fn lookup(&self, day: Weekday, time_range: &str) -> &[String] {
        debug_assert!(!is_weekend(day), "roster has no weekend sessions");
        self.table
            .get(&day)
            .and_then(|ranges| ranges.get(time_range))
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }
}
