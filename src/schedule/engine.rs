use chrono::{Datelike, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use super::attendees::find_additional_attendees;
use super::registry::UsedSlotRegistry;
use super::types::{ScheduleEntry, ScheduleRun};
use crate::calendar::{is_weekend, time_range_of, window, SlotCalendar};
use crate::pool::{Candidate, CandidatePool};
use crate::roster::{Roster, MAX_INTERVIEWERS};

/// Walks the window from `start_date` and returns the first free eligible slot.
/// Slots are tried in declared order per date, first match wins.
pub fn find_free_slot<'a>(
    calendar: &'a SlotCalendar,
    registry: &UsedSlotRegistry,
    candidate: &Candidate,
    start_date: NaiveDate,
) -> Option<(NaiveDate, &'a str)> {
    window(start_date).find_map(|date| {
        calendar
            .eligible_slots(date, candidate)
            .into_iter()
            .find(|label| !registry.is_used(date, label))
            .map(|label| (date, label))
    })
}

/// Assigns interview slots for the 7-day window starting at `start_date`.
///
/// Candidates are visited in a uniformly shuffled order drawn from `rng`, so
/// the outcome depends on the random source; a seeded source reproduces a
/// run exactly. Each candidate takes the first free slot in the window.
/// Weekday sessions pick up interviewers from the roster and up to three
/// additional attendees from the pool; weekend sessions get neither.
/// Candidates without a free slot are logged and listed in
/// [`ScheduleRun::unscheduled`].
pub fn assign_interview_slots<R: Rng + ?Sized>(
    pool: &CandidatePool,
    calendar: &SlotCalendar,
    roster: &Roster,
    start_date: NaiveDate,
    rng: &mut R,
) -> ScheduleRun {
    let mut order: Vec<&Candidate> = pool.candidates().iter().collect();
    order.shuffle(rng);

    let mut registry = UsedSlotRegistry::new();
    let mut placed: HashSet<usize> = HashSet::new();
    let mut entries = Vec::new();
    let mut unscheduled = Vec::new();

    for candidate in order {
        let Some((date, slot)) = find_free_slot(calendar, &registry, candidate, start_date) else {
            log::warn!(
                "Could not schedule interview for {} (roll number {}): no available slot in window",
                candidate.identity.full_name(),
                candidate.identity.roll_number
            );
            unscheduled.push(candidate.index);
            continue;
        };

        let weekday = date.weekday();
        let (interviewers, additional_attendees) = if is_weekend(weekday) {
            (Vec::new(), Vec::new())
        } else {
            let interviewers: Vec<String> = roster
                .lookup(weekday, time_range_of(slot))
                .iter()
                .take(MAX_INTERVIEWERS)
                .cloned()
                .collect();
            let attendees = find_additional_attendees(pool, slot, candidate.index, &placed);
            (interviewers, attendees)
        };

        log::debug!(
            "Assigned {} to {} {} ({} interviewers, {} additional attendees)",
            candidate.identity.full_name(),
            date,
            slot,
            interviewers.len(),
            additional_attendees.len()
        );

        let claimed = registry.claim(date, slot);
        debug_assert!(claimed, "{} {} handed out twice", date, slot);
        placed.insert(candidate.index);

        entries.push(ScheduleEntry {
            interviewee_index: candidate.index,
            interviewee: candidate.identity.clone(),
            date,
            slot: slot.to_string(),
            interviewers,
            additional_attendees,
        });
    }

    log::info!(
        "Scheduled {} of {} candidates for the week starting {}",
        entries.len(),
        pool.len(),
        start_date
    );

    ScheduleRun {
        entries,
        unscheduled,
        registry,
    }
}
