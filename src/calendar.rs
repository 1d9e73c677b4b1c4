use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::error::{Error, Result};
use crate::pool::Candidate;

/// Number of consecutive days searched for each candidate.
pub const SCHEDULING_WINDOW_DAYS: i64 = 7;

/// Time ranges offered on every weekday, in declared order.
pub const STANDARD_TIME_RANGES: [&str; 8] = [
    "9:30AM-10:30AM",
    "10:30AM-11:30AM",
    "11:30AM-12:30PM",
    "12:30PM-2PM",
    "2PM-3:30PM",
    "3:30PM-5PM",
    "5:30PM-7:00PM",
    "7PM-8:30PM",
];

pub const WEEKDAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Saturday slots, open to every candidate.
pub const SATURDAY_SLOTS: [&str; 11] = [
    "Saturday 9:30AM-10:30AM",
    "Saturday 10:30AM-11:30AM",
    "Saturday 11:30AM-12:30PM",
    "Saturday 12:30PM-2PM",
    "Saturday 2PM-3:30PM",
    "Saturday 3:30PM-5PM",
    "Saturday 5:30PM-7:00PM",
    "Saturday 7PM-8:30PM",
    "Saturday 8:30PM-10:00PM",
    "Saturday 10:00PM-11:30PM",
    "Saturday 11:30PM-1:00AM",
];

/// Sunday slots, open to every candidate.
pub const SUNDAY_SLOTS: [&str; 11] = [
    "Sunday 9:30AM-10:30AM",
    "Sunday 10:30AM-11:30AM",
    "Sunday 11:30AM-12:30PM",
    "Sunday 12:30PM-2PM",
    "Sunday 2PM-3:30PM",
    "Sunday 3:30PM-5PM",
    "Sunday 5:30PM-7:00PM",
    "Sunday 7PM-8:30PM",
    "Sunday 8:30PM-10:00PM",
    "Sunday 10:00PM-11:30PM",
    "Sunday 11:30PM-1:00AM",
];

pub fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

/// Full English day name as used in slot labels
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parses a full English day name ("Monday"), case-insensitive
pub fn parse_day_name(name: &str) -> Option<Weekday> {
    let lower = name.trim().to_lowercase();
    [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
    .into_iter()
    .find(|day| day_name(*day).to_lowercase() == lower)
}

/// Builds a slot label such as "Monday 9:30AM-10:30AM"
pub fn slot_label(day: Weekday, time_range: &str) -> String {
    format!("{} {}", day_name(day), time_range)
}

/// Splits a slot label into its day and time range.
/// Returns None when the label has no recognised day prefix.
pub fn split_slot_label(label: &str) -> Option<(Weekday, &str)> {
    let (day, range) = label.trim().split_once(' ')?;
    let day = parse_day_name(day)?;
    let range = range.trim();
    if range.is_empty() {
        return None;
    }
    Some((day, range))
}

/// Time-range portion of a slot label ("Monday 9:30AM-10:30AM" -> "9:30AM-10:30AM").
/// A label without a space is returned unchanged.
pub fn time_range_of(label: &str) -> &str {
    label.split_once(' ').map(|(_, range)| range).unwrap_or(label)
}

/// Fixed slot list for a weekend day; empty for weekdays
pub fn weekend_slots(day: Weekday) -> &'static [&'static str] {
    match day {
        Weekday::Sat => &SATURDAY_SLOTS,
        Weekday::Sun => &SUNDAY_SLOTS,
        _ => &[],
    }
}

/// The dates of the scheduling window, in calendar order
pub fn window(start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    (0..SCHEDULING_WINDOW_DAYS).map(move |offset| start + Duration::days(offset))
}

/// Ordered list of bookable slot labels for a date.
///
/// Weekday slots are relative to a candidate: only the declared labels for
/// that weekday with an availability flag of 1 are returned. Weekend slots are
/// the fixed per-day list and ignore the candidate entirely.
#[derive(Debug, Clone, Default)]
pub struct SlotCalendar {
    weekday_slots: Vec<String>,
}

impl SlotCalendar {
    /// Builds a calendar from the weekday slot labels, in declared order.
    /// Every label must name a weekday (Monday to Friday).
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut weekday_slots = Vec::new();
        for label in labels {
            let label = label.into();
            match split_slot_label(&label) {
                Some((day, _)) if !is_weekend(day) => weekday_slots.push(label),
                _ => return Err(Error::InvalidSlotLabel(label)),
            }
        }
        Ok(SlotCalendar { weekday_slots })
    }

    /// Calendar over the standard weekday time ranges
    pub fn standard() -> Self {
        let weekday_slots = WEEKDAYS
            .iter()
            .flat_map(|day| STANDARD_TIME_RANGES.iter().map(move |range| slot_label(*day, range)))
            .collect();
        SlotCalendar { weekday_slots }
    }

    pub fn weekday_slots(&self) -> &[String] {
        &self.weekday_slots
    }

    pub fn eligible_slots<'a>(&'a self, date: NaiveDate, candidate: &Candidate) -> Vec<&'a str> {
        let day = date.weekday();
        if is_weekend(day) {
            return weekend_slots(day).to_vec();
        }

        self.weekday_slots
            .iter()
            .filter(|label| matches!(split_slot_label(label), Some((d, _)) if d == day))
            .filter(|label| candidate.is_available(label))
            .map(|label| label.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Candidate, Identity};
    use std::collections::HashMap;

    fn candidate_with(slots: &[&str]) -> Candidate {
        let availability: HashMap<String, u8> = slots.iter().map(|s| (s.to_string(), 1)).collect();
        Candidate {
            index: 0,
            identity: Identity {
                first_name: "Asha".to_string(),
                last_name: "Verma".to_string(),
                email: "asha@example.com".to_string(),
                roll_number: "21001".to_string(),
                department: "CSE".to_string(),
                contact: None,
            },
            availability,
        }
    }

    #[test]
    fn weekend_slots_ignore_candidate() {
        let calendar = SlotCalendar::standard();
        let nobody = candidate_with(&[]);
        // 2026-10-24 is a Saturday
        let saturday = NaiveDate::from_ymd_opt(2026, 10, 24).unwrap();
        let slots = calendar.eligible_slots(saturday, &nobody);
        assert_eq!(slots.len(), 11);
        assert_eq!(slots[0], "Saturday 9:30AM-10:30AM");

        let sunday = saturday + Duration::days(1);
        assert_eq!(calendar.eligible_slots(sunday, &nobody), SUNDAY_SLOTS.to_vec());
    }

    #[test]
    fn weekday_slots_follow_availability_in_declared_order() {
        let calendar = SlotCalendar::standard();
        let candidate = candidate_with(&["Monday 2PM-3:30PM", "Monday 9:30AM-10:30AM", "Tuesday 7PM-8:30PM"]);
        let monday = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(
            calendar.eligible_slots(monday, &candidate),
            vec!["Monday 9:30AM-10:30AM", "Monday 2PM-3:30PM"]
        );
        let wednesday = monday + Duration::days(2);
        assert!(calendar.eligible_slots(wednesday, &candidate).is_empty());
    }

    #[test]
    fn rejects_weekend_or_malformed_labels() {
        assert!(SlotCalendar::new(["Saturday 9:30AM-10:30AM"]).is_err());
        assert!(SlotCalendar::new(["9:30AM-10:30AM"]).is_err());
        assert!(SlotCalendar::new(["Friday 7PM-8:30PM"]).is_ok());
    }

    #[test]
    fn label_helpers() {
        assert_eq!(time_range_of("Monday 9:30AM-10:30AM"), "9:30AM-10:30AM");
        assert_eq!(time_range_of("9:30AM-10:30AM"), "9:30AM-10:30AM");
        assert_eq!(split_slot_label("thursday 2PM-3:30PM"), Some((Weekday::Thu, "2PM-3:30PM")));
        assert_eq!(split_slot_label("Someday 2PM-3:30PM"), None);
        assert_eq!(slot_label(Weekday::Fri, "3:30PM-5PM"), "Friday 3:30PM-5PM");
    }

    #[test]
    fn window_spans_seven_days() {
        let start = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let days: Vec<NaiveDate> = window(start).collect();
        assert_eq!(days.len(), 7);
        assert_eq!(days[6], start + Duration::days(6));
    }
}
