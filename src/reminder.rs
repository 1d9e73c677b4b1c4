use chrono::{Duration, NaiveDate};
use csv::Reader;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::writer::{
    DATE_FORMAT, INTERVIEWEE_EMAIL, INTERVIEWEE_FIRST_NAME, INTERVIEWEE_LAST_NAME, INTERVIEW_DATE,
    INTERVIEW_TIME,
};

/// The parts of a written schedule row a reminder needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledInterview {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date: NaiveDate,
    pub slot: String,
}

/// A rendered reminder, ready to hand to a mail sender
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub to: String,
    pub subject: String,
    pub body: String,
}

pub fn load_schedule<P: AsRef<Path>>(csv_path: P) -> Result<Vec<ScheduledInterview>> {
    let file = fs::File::open(csv_path)?;
    read_schedule(file)
}

/// Reads back a schedule written by [`crate::writer::write_schedule`]
pub fn read_schedule<R: Read>(input: R) -> Result<Vec<ScheduledInterview>> {
    let mut reader = Reader::from_reader(input);
    let headers = reader.headers()?.clone();
    let col = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| Error::MissingColumn { column: name.to_string() })
    };

    let first_col = col(INTERVIEWEE_FIRST_NAME)?;
    let last_col = col(INTERVIEWEE_LAST_NAME)?;
    let email_col = col(INTERVIEWEE_EMAIL)?;
    let date_col = col(INTERVIEW_DATE)?;
    let time_col = col(INTERVIEW_TIME)?;

    let mut interviews = Vec::new();
    for result in reader.records() {
        let record = result?;
        let get = |c: usize| record.get(c).unwrap_or("").trim().to_string();

        let raw_date = get(date_col);
        let date = NaiveDate::parse_from_str(&raw_date, DATE_FORMAT)
            .map_err(|_| Error::InvalidDate(raw_date.clone()))?;

        interviews.push(ScheduledInterview {
            first_name: get(first_col),
            last_name: get(last_col),
            email: get(email_col),
            date,
            slot: get(time_col),
        });
    }
    Ok(interviews)
}

/// Interviews happening exactly `days_ahead` days after `today`
pub fn due_reminders(
    interviews: &[ScheduledInterview],
    today: NaiveDate,
    days_ahead: i64,
) -> Vec<&ScheduledInterview> {
    let target = today + Duration::days(days_ahead);
    interviews.iter().filter(|i| i.date == target).collect()
}

pub fn render_reminder(interview: &ScheduledInterview) -> Reminder {
    let body = format!(
        "Hello {} {},\n\n\
         This is a reminder for your upcoming interview.\n\n\
         Date: {}\n\
         Time: {}\n\
         Venue: Online / In-person\n\n\
         If you have any questions, feel free to reach out.\n\n\
         Best Regards,\n\
         Interview Scheduling Team\n",
        interview.first_name,
        interview.last_name,
        interview.date.format("%A, %d %B %Y"),
        interview.slot
    );
    Reminder {
        to: interview.email.clone(),
        subject: "Interview Reminder".to_string(),
        body,
    }
}

fn outbox_file_name(interview: &ScheduledInterview) -> String {
    let safe: String = interview
        .email
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect();
    format!("{}_{}.txt", interview.date.format(DATE_FORMAT), safe)
}

/// Writes one reminder file per interview into `outbox` and returns the paths
pub fn write_outbox(interviews: &[&ScheduledInterview], outbox: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(outbox)?;
    let mut written = Vec::with_capacity(interviews.len());
    for interview in interviews {
        let reminder = render_reminder(interview);
        let path = outbox.join(outbox_file_name(interview));
        let contents = format!("To: {}\nSubject: {}\n\n{}", reminder.to, reminder.subject, reminder.body);
        fs::write(&path, contents)?;
        log::info!("Reminder for {} written to {}", reminder.to, path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEDULE: &str = "\
Interviewee First Name,Interviewee Last Name,Interviewee Email ID,Interview Date,Interview Time
Asha,Verma,asha@example.com,2026-10-19,Monday 9:30AM-10:30AM
Ravi,Nair,ravi@example.com,2026-10-20,Tuesday 2PM-3:30PM
";

    #[test]
    fn selects_interviews_two_days_out() {
        let interviews = read_schedule(SCHEDULE.as_bytes()).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let due = due_reminders(&interviews, today, 2);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].email, "asha@example.com");
    }

    #[test]
    fn renders_long_form_date() {
        let interviews = read_schedule(SCHEDULE.as_bytes()).unwrap();
        let reminder = render_reminder(&interviews[0]);
        assert_eq!(reminder.to, "asha@example.com");
        assert!(reminder.body.starts_with("Hello Asha Verma,"));
        assert!(reminder.body.contains("Date: Monday, 19 October 2026"));
        assert!(reminder.body.contains("Time: Monday 9:30AM-10:30AM"));
    }

    #[test]
    fn bad_dates_are_rejected() {
        let bad = "Interviewee First Name,Interviewee Last Name,Interviewee Email ID,Interview Date,Interview Time\nA,B,a@b.c,19/10/2026,Monday 9:30AM-10:30AM\n";
        assert!(matches!(read_schedule(bad.as_bytes()), Err(Error::InvalidDate(_))));
    }

    #[test]
    fn outbox_gets_one_file_per_reminder() {
        let interviews = read_schedule(SCHEDULE.as_bytes()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let due: Vec<&ScheduledInterview> = interviews.iter().collect();
        let paths = write_outbox(&due, dir.path()).unwrap();
        assert_eq!(paths.len(), 2);
        let first = fs::read_to_string(&paths[0]).unwrap();
        assert!(first.starts_with("To: asha@example.com\nSubject: Interview Reminder"));
        assert!(paths[0].ends_with("2026-10-19_asha_example.com.txt"));
    }
}
