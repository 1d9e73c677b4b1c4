use chrono::NaiveDate;
use serde::Serialize;

use super::registry::UsedSlotRegistry;
use crate::pool::Identity;

/// At most this many co-attendees join a session
pub const MAX_ADDITIONAL_ATTENDEES: usize = 3;

/// A compatible candidate grouped into someone else's session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attendee {
    pub name: String,
    pub email: String,
    pub contact: Option<String>,
}

/// One candidate's assigned session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    /// Pool index of the interviewee; internal only, never written out
    #[serde(skip)]
    pub interviewee_index: usize,
    pub interviewee: Identity,
    pub date: NaiveDate,
    pub slot: String,
    /// Empty on weekends
    pub interviewers: Vec<String>,
    /// Filled left to right, empty on weekends
    pub additional_attendees: Vec<Attendee>,
}

/// Outcome of one full scheduling pass
#[derive(Debug, Clone, Default)]
pub struct ScheduleRun {
    /// Entries in assignment order
    pub entries: Vec<ScheduleEntry>,
    /// Pool indices of candidates with no free slot in the window
    pub unscheduled: Vec<usize>,
    pub registry: UsedSlotRegistry,
}
