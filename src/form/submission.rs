use chrono::Weekday;
use csv::{Reader, StringRecord};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::calendar::{day_name, WEEKDAYS};
use crate::error::{Error, Result};
use crate::pool::{Identity, CONTACT, DEPARTMENT, EMAIL, FIRST_NAME, LAST_NAME, ROLL_NUMBER};

/// One raw availability form response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormResponse {
    pub identity: Identity,
    /// Time ranges ticked per weekday, as typed in the form
    pub chosen: HashMap<Weekday, Vec<String>>,
}

impl FormResponse {
    pub fn has_chosen(&self, day: Weekday, time_range: &str) -> bool {
        self.chosen
            .get(&day)
            .is_some_and(|ranges| ranges.iter().any(|r| r == time_range))
    }
}

/// Splits a form cell such as "9:30AM-10:30AM, 2PM-3:30PM" into time ranges
pub fn split_choices(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn required(headers: &StringRecord, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| Error::MissingColumn { column: column.to_string() })
}

pub fn load_form_responses<P: AsRef<Path>>(csv_path: P) -> Result<Vec<FormResponse>> {
    let file = std::fs::File::open(csv_path)?;
    parse_form_responses(file)
}

/// Reads raw form responses. Weekday columns are optional; a missing one
/// means nothing was chosen that day.
pub fn parse_form_responses<R: Read>(input: R) -> Result<Vec<FormResponse>> {
    let mut reader = Reader::from_reader(input);
    let headers = reader.headers()?.clone();

    let first_name_col = required(&headers, FIRST_NAME)?;
    let last_name_col = required(&headers, LAST_NAME)?;
    let email_col = required(&headers, EMAIL)?;
    let roll_col = required(&headers, ROLL_NUMBER)?;
    let department_col = required(&headers, DEPARTMENT)?;
    let contact_col = headers.iter().position(|h| h.trim() == CONTACT);

    let day_cols: Vec<(Weekday, usize)> = WEEKDAYS
        .iter()
        .filter_map(|day| {
            headers
                .iter()
                .position(|h| h.trim() == day_name(*day))
                .map(|col| (*day, col))
        })
        .collect();

    let mut responses = Vec::new();
    for result in reader.records() {
        let record = result?;
        let get = |col: usize| record.get(col).unwrap_or("").trim().to_string();

        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let chosen = day_cols
            .iter()
            .map(|(day, col)| (*day, split_choices(record.get(*col).unwrap_or(""))))
            .collect();

        responses.push(FormResponse {
            identity: Identity {
                first_name: get(first_name_col),
                last_name: get(last_name_col),
                email: get(email_col),
                roll_number: get(roll_col),
                department: get(department_col),
                contact: contact_col.map(get).filter(|c| !c.is_empty()),
            },
            chosen,
        });
    }

    Ok(responses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_columns_as_choice_lists() {
        let csv = "First Name,Last Name,Email ID,Roll Number,Department,Contact Number,Monday,Wednesday\n\
                   Asha,Verma,asha@example.com,21001,CSE,98100,\"9:30AM-10:30AM, 2PM-3:30PM\",\n\
                   ,,,,,,,\n";
        let responses = parse_form_responses(csv.as_bytes()).unwrap();
        assert_eq!(responses.len(), 1);
        let asha = &responses[0];
        assert!(asha.has_chosen(Weekday::Mon, "2PM-3:30PM"));
        assert!(!asha.has_chosen(Weekday::Wed, "2PM-3:30PM"));
        assert!(!asha.has_chosen(Weekday::Fri, "9:30AM-10:30AM"));
        assert_eq!(asha.identity.contact.as_deref(), Some("98100"));
    }

    #[test]
    fn identity_columns_are_required() {
        let csv = "First Name,Last Name,Roll Number,Department,Monday\nA,B,1,CSE,\n";
        assert!(matches!(
            parse_form_responses(csv.as_bytes()),
            Err(Error::MissingColumn { .. })
        ));
    }
}
