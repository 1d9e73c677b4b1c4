use csv::WriterBuilder;
use std::io::Write;
use std::path::Path;

use crate::calendar::{day_name, slot_label, STANDARD_TIME_RANGES, WEEKDAYS};
use crate::error::Result;
use crate::form::submission::FormResponse;
use crate::pool::{
    CONTACT, DEPARTMENT, EMAIL, FIRST_NAME, INTERVIEW_HAPPENED, LAST_NAME, ROLL_NUMBER,
};
use crate::writer::replace_file;

/// Header of the availability table: identity columns, then one column per weekday slot
pub fn availability_headers() -> Vec<String> {
    let mut headers: Vec<String> = [
        FIRST_NAME,
        LAST_NAME,
        EMAIL,
        ROLL_NUMBER,
        DEPARTMENT,
        CONTACT,
        INTERVIEW_HAPPENED,
    ]
    .iter()
    .map(|h| h.to_string())
    .collect();

    for day in WEEKDAYS {
        for range in STANDARD_TIME_RANGES {
            headers.push(slot_label(day, range));
        }
    }
    headers
}

/// Writes the availability table consumed by the candidate pool.
/// Every response starts as not yet interviewed.
pub fn write_availability_table<W: Write>(responses: &[FormResponse], out: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(out);
    wtr.write_record(availability_headers())?;

    for response in responses {
        for (day, ranges) in &response.chosen {
            for range in ranges {
                if !STANDARD_TIME_RANGES.contains(&range.as_str()) {
                    log::warn!(
                        "Ignoring unknown time range '{}' on {} for {}",
                        range,
                        day_name(*day),
                        response.identity.full_name()
                    );
                }
            }
        }

        let who = &response.identity;
        let mut record = vec![
            who.first_name.clone(),
            who.last_name.clone(),
            who.email.clone(),
            who.roll_number.clone(),
            who.department.clone(),
            who.contact.clone().unwrap_or_default(),
            "0".to_string(),
        ];
        for day in WEEKDAYS {
            for range in STANDARD_TIME_RANGES {
                let flag = if response.has_chosen(day, range) { "1" } else { "0" };
                record.push(flag.to_string());
            }
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the availability table to `csv_path`, replacing any existing file
pub fn export_availability_table(responses: &[FormResponse], csv_path: &Path) -> Result<()> {
    replace_file(csv_path, |out| write_availability_table(responses, out))?;
    log::info!(
        "Wrote availability for {} respondents to {}",
        responses.len(),
        csv_path.display()
    );
    Ok(())
}
