use csv::{Reader, StringRecord};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::calendar::{is_weekend, split_slot_label, SlotCalendar};
use crate::error::{Error, Result};

pub const FIRST_NAME: &str = "First Name";
pub const LAST_NAME: &str = "Last Name";
pub const EMAIL: &str = "Email ID";
pub const ROLL_NUMBER: &str = "Roll Number";
pub const DEPARTMENT: &str = "Department";
pub const CONTACT: &str = "Contact Number";
pub const INTERVIEW_HAPPENED: &str = "Interview Happened";

/// Who a candidate is and how to reach them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub roll_number: String,
    pub department: String,
    pub contact: Option<String>,
}

impl Identity {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// An eligible candidate with weekday availability.
///
/// `index` is the candidate's position in the filtered pool and stays stable
/// for the whole run, whatever order the engine visits candidates in.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub index: usize,
    pub identity: Identity,
    /// slot label -> 0 or 1
    pub availability: HashMap<String, u8>,
}

impl Candidate {
    /// Missing labels count as unavailable
    pub fn is_available(&self, label: &str) -> bool {
        self.availability.get(label).copied().unwrap_or(0) == 1
    }
}

/// Candidates still waiting for an interview, plus the declared weekday slot labels
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    candidates: Vec<Candidate>,
    slot_labels: Vec<String>,
}

/// Coerces an availability cell to 0 or 1. Only a numeric 1 (or "true") is available.
pub fn coerce_flag(value: &str) -> u8 {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        return 1;
    }
    match trimmed.parse::<f64>() {
        Ok(number) if number == 1.0 => 1,
        _ => 0,
    }
}

/// Parses the "Interview Happened" cell. Only an empty cell or a numeric zero
/// means not yet interviewed.
fn parse_happened(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    !matches!(trimmed.parse::<f64>(), Ok(number) if number == 0.0)
}

fn column_index(headers: &StringRecord, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| Error::MissingColumn { column: column.to_string() })
}

fn cell(record: &StringRecord, col: usize) -> String {
    record.get(col).unwrap_or("").trim().to_string()
}

impl CandidatePool {
    /// Builds a pool from already materialized candidates, reassigning indices
    /// so they match pool order.
    pub fn from_candidates(slot_labels: Vec<String>, candidates: Vec<Candidate>) -> Self {
        let candidates = candidates
            .into_iter()
            .enumerate()
            .map(|(index, candidate)| Candidate { index, ..candidate })
            .collect();
        CandidatePool { candidates, slot_labels }
    }

    /// Loads the availability table from a CSV file
    pub fn load<P: AsRef<Path>>(csv_path: P) -> Result<Self> {
        let file = std::fs::File::open(csv_path)?;
        Self::from_reader(file)
    }

    /// Reads the availability table, coerces flags and drops candidates
    /// who have already been interviewed.
    pub fn from_reader<R: Read>(input: R) -> Result<Self> {
        let mut reader = Reader::from_reader(input);
        let headers = reader.headers()?.clone();

        let first_name_col = column_index(&headers, FIRST_NAME)?;
        let last_name_col = column_index(&headers, LAST_NAME)?;
        let email_col = column_index(&headers, EMAIL)?;
        let roll_col = column_index(&headers, ROLL_NUMBER)?;
        let department_col = column_index(&headers, DEPARTMENT)?;
        let happened_col = column_index(&headers, INTERVIEW_HAPPENED)?;
        let contact_col = headers.iter().position(|h| h.trim() == CONTACT);

        // Weekday slot columns, kept in header order
        let slot_columns: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .filter_map(|(col, header)| match split_slot_label(header) {
                Some((day, _)) if !is_weekend(day) => Some((col, header.trim().to_string())),
                _ => None,
            })
            .collect();

        let mut candidates = Vec::new();
        let mut skipped = 0usize;

        for result in reader.records() {
            let record = result?;

            if parse_happened(record.get(happened_col).unwrap_or("")) {
                skipped += 1;
                continue;
            }

            let contact = contact_col
                .map(|col| cell(&record, col))
                .filter(|c| !c.is_empty() && c != "0");

            let availability = slot_columns
                .iter()
                .map(|(col, label)| (label.clone(), coerce_flag(record.get(*col).unwrap_or(""))))
                .collect();

            candidates.push(Candidate {
                index: candidates.len(),
                identity: Identity {
                    first_name: cell(&record, first_name_col),
                    last_name: cell(&record, last_name_col),
                    email: cell(&record, email_col),
                    roll_number: cell(&record, roll_col),
                    department: cell(&record, department_col),
                    contact,
                },
                availability,
            });
        }

        log::info!(
            "Loaded {} candidates ({} already interviewed, {} slot columns)",
            candidates.len(),
            skipped,
            slot_columns.len()
        );

        Ok(CandidatePool {
            candidates,
            slot_labels: slot_columns.into_iter().map(|(_, label)| label).collect(),
        })
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Weekday slot labels in declared (column) order
    pub fn slot_labels(&self) -> &[String] {
        &self.slot_labels
    }

    /// Calendar over this pool's declared weekday slots
    pub fn calendar(&self) -> Result<SlotCalendar> {
        SlotCalendar::new(self.slot_labels.iter().cloned())
    }

    /// Number of available candidates per declared slot label, in declared order
    pub fn slot_popularity(&self) -> Vec<(String, usize)> {
        self.slot_labels
            .iter()
            .map(|label| {
                let count = self.candidates.iter().filter(|c| c.is_available(label)).count();
                (label.clone(), count)
            })
            .collect()
    }
}
