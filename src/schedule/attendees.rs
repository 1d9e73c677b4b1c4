use std::collections::HashSet;

use super::types::{Attendee, MAX_ADDITIONAL_ATTENDEES};
use crate::pool::CandidatePool;

/// Finds up to three co-attendees for a weekday session.
///
/// Scans the whole pool in pool order for candidates available in `slot`,
/// skipping the interviewee and anyone already placed as a primary
/// interviewee. Booked slots are not consulted and attendees are not
/// consumed, so the same person can join several sessions and still get a
/// primary slot of their own later.
pub fn find_additional_attendees(
    pool: &CandidatePool,
    slot: &str,
    interviewee_index: usize,
    placed: &HashSet<usize>,
) -> Vec<Attendee> {
    pool.candidates()
        .iter()
        .filter(|c| c.index != interviewee_index && !placed.contains(&c.index))
        .filter(|c| c.is_available(slot))
        .take(MAX_ADDITIONAL_ATTENDEES)
        .map(|c| Attendee {
            name: c.identity.full_name(),
            email: c.identity.email.clone(),
            contact: c.identity.contact.clone(),
        })
        .collect()
}
