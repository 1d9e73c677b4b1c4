use csv::WriterBuilder;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::roster::MAX_INTERVIEWERS;
use crate::schedule::{ScheduleEntry, MAX_ADDITIONAL_ATTENDEES};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const INTERVIEWEE_FIRST_NAME: &str = "Interviewee First Name";
pub const INTERVIEWEE_LAST_NAME: &str = "Interviewee Last Name";
pub const INTERVIEWEE_EMAIL: &str = "Interviewee Email ID";
pub const INTERVIEW_DATE: &str = "Interview Date";
pub const INTERVIEW_TIME: &str = "Interview Time";

/// Column headers of the written schedule
pub fn schedule_headers() -> Vec<String> {
    let mut headers: Vec<String> = [
        INTERVIEWEE_FIRST_NAME,
        INTERVIEWEE_LAST_NAME,
        INTERVIEWEE_EMAIL,
        "Interviewee Roll Number",
        "Interviewee Department",
        "Interviewee Contact Number",
        INTERVIEW_DATE,
        INTERVIEW_TIME,
    ]
    .iter()
    .map(|h| h.to_string())
    .collect();

    for i in 1..=MAX_INTERVIEWERS {
        headers.push(format!("Interviewer {}", i));
    }
    for i in 1..=MAX_ADDITIONAL_ATTENDEES {
        headers.push(format!("Additional Person {}", i));
        headers.push(format!("Additional Person {} Email", i));
        headers.push(format!("Additional Person {} Contact", i));
    }
    headers
}

/// Sorts by date, then slot label as plain strings
pub fn sort_entries(entries: &mut [ScheduleEntry]) {
    entries.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.slot.cmp(&b.slot)));
}

fn entry_record(entry: &ScheduleEntry) -> Vec<String> {
    let who = &entry.interviewee;
    let mut record = vec![
        who.first_name.clone(),
        who.last_name.clone(),
        who.email.clone(),
        who.roll_number.clone(),
        who.department.clone(),
        who.contact.clone().unwrap_or_default(),
        entry.date.format(DATE_FORMAT).to_string(),
        entry.slot.clone(),
    ];

    for i in 0..MAX_INTERVIEWERS {
        record.push(entry.interviewers.get(i).cloned().unwrap_or_default());
    }
    for i in 0..MAX_ADDITIONAL_ATTENDEES {
        match entry.additional_attendees.get(i) {
            Some(attendee) => {
                record.push(attendee.name.clone());
                record.push(attendee.email.clone());
                record.push(attendee.contact.clone().unwrap_or_default());
            }
            None => record.extend([String::new(), String::new(), String::new()]),
        }
    }
    record
}

/// Writes entries as CSV in their current order. Internal pool indices are not written.
pub fn write_schedule<W: Write>(entries: &[ScheduleEntry], out: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(out);
    wtr.write_record(schedule_headers())?;
    for entry in entries {
        wtr.write_record(entry_record(entry))?;
    }
    wtr.flush()?;
    Ok(())
}

/// File name for the schedule of the week starting at `start`
pub fn schedule_file_name(start: chrono::NaiveDate) -> String {
    format!("weekly_interview_schedule_{}.csv", start.format(DATE_FORMAT))
}

/// Writes a file next to its final location and moves it into place.
///
/// `path` is only replaced once `write` has succeeded; on any error the
/// staged file is removed and whatever was at `path` is left as it was.
pub fn replace_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut NamedTempFile) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)?;
    write(&mut staged)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Sorts and saves the schedule to `output_dir`, returning the written path.
///
/// An earlier schedule for the same week is only replaced by a complete file.
pub fn save_schedule(
    mut entries: Vec<ScheduleEntry>,
    output_dir: &Path,
    start: chrono::NaiveDate,
) -> Result<PathBuf> {
    sort_entries(&mut entries);

    let path = output_dir.join(schedule_file_name(start));
    let saved = fs::create_dir_all(output_dir)
        .map_err(Error::from)
        .and_then(|_| replace_file(&path, |out| write_schedule(&entries, out)));
    if let Err(e) = saved {
        log::error!("Error saving schedule to '{}': {}", path.display(), e);
        return Err(e);
    }

    log::info!("Schedule saved successfully to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Identity;
    use crate::schedule::Attendee;
    use chrono::NaiveDate;

    fn entry(day: u32, slot: &str, name: &str) -> ScheduleEntry {
        ScheduleEntry {
            interviewee_index: 99,
            interviewee: Identity {
                first_name: name.to_string(),
                last_name: "Rao".to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                roll_number: "7".to_string(),
                department: "CSE".to_string(),
                contact: Some("9000".to_string()),
            },
            date: NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
            slot: slot.to_string(),
            interviewers: vec!["H".to_string(), "A".to_string()],
            additional_attendees: vec![Attendee {
                name: "Kiran Das".to_string(),
                email: "kiran@example.com".to_string(),
                contact: None,
            }],
        }
    }

    #[test]
    fn sorts_by_date_then_label() {
        let mut entries = vec![
            entry(24, "Saturday 9:30AM-10:30AM", "Zed"),
            entry(19, "Monday 2PM-3:30PM", "Yan"),
            entry(19, "Monday 12:30PM-2PM", "Xia"),
        ];
        sort_entries(&mut entries);
        let names: Vec<&str> = entries.iter().map(|e| e.interviewee.first_name.as_str()).collect();
        assert_eq!(names, vec!["Xia", "Yan", "Zed"]);
    }

    #[test]
    fn writes_fixed_width_rows_without_index() {
        let mut out = Vec::new();
        write_schedule(&[entry(19, "Monday 9:30AM-10:30AM", "Uma")], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        let header = lines.next().unwrap();
        assert!(!header.contains("Index"));
        assert_eq!(header.split(',').count(), 8 + 3 + 9);

        let row = lines.next().unwrap();
        assert_eq!(
            row,
            "Uma,Rao,uma@example.com,7,CSE,9000,2026-10-19,Monday 9:30AM-10:30AM,H,A,,Kiran Das,kiran@example.com,,,,,,,"
        );
    }

    #[test]
    fn save_creates_dated_file() {
        let dir = tempfile::tempdir().unwrap();
        let start = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let path = save_schedule(vec![entry(19, "Monday 9:30AM-10:30AM", "Uma")], dir.path(), start).unwrap();
        assert_eq!(path.file_name().unwrap(), "weekly_interview_schedule_2026-10-19.csv");
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn failed_write_keeps_previous_schedule() {
        let dir = tempfile::tempdir().unwrap();
        let start = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let path = save_schedule(vec![entry(19, "Monday 9:30AM-10:30AM", "Uma")], dir.path(), start).unwrap();
        let before = std::fs::read(&path).unwrap();

        let result = replace_file(&path, |out| {
            out.write_all(b"Interviewee First Name,Interv")?;
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into())
        });
        assert!(matches!(result, Err(Error::Io(_))));

        assert_eq!(std::fs::read(&path).unwrap(), before);
        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn failed_move_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let start = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        // A directory squatting on the target name makes the final rename fail
        let target = dir.path().join(schedule_file_name(start));
        std::fs::create_dir(&target).unwrap();

        let result = save_schedule(vec![entry(19, "Monday 9:30AM-10:30AM", "Uma")], dir.path(), start);
        assert!(result.is_err());

        assert!(target.is_dir());
        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn resave_replaces_the_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let start = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let two = vec![entry(19, "Monday 9:30AM-10:30AM", "Uma"), entry(20, "Tuesday 2PM-3:30PM", "Vik")];
        save_schedule(two, dir.path(), start).unwrap();
        let path = save_schedule(vec![entry(19, "Monday 9:30AM-10:30AM", "Uma")], dir.path(), start).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap().lines().count(), 2);
    }
}
