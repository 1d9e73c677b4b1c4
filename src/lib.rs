//! Weekly interview slot assignment.
//!
//! Candidates from an availability table are shuffled, then each takes the
//! first free slot in a 7-day window. Weekday sessions get a rostered
//! interviewer panel and up to three co-attendees; weekend slots are open to
//! everyone.

pub mod calendar;
pub mod config;
pub mod display;
pub mod error;
pub mod form;
pub mod logger;
pub mod pool;
pub mod reminder;
pub mod roster;
pub mod schedule;
pub mod web;
pub mod writer;

use chrono::NaiveDate;
use rand::Rng;
use std::path::PathBuf;

use crate::config::{build_rng, ScheduleSettings};
use crate::error::Result;
use crate::pool::CandidatePool;
use crate::roster::Roster;
use crate::schedule::{assign_interview_slots, ScheduleEntry, ScheduleRun};

/// Result of a scheduling run that was written to disk
#[derive(Debug)]
pub struct ScheduleOutcome {
    pub path: PathBuf,
    pub pool: CandidatePool,
    pub run: ScheduleRun,
    /// Entries sorted by date, then slot label
    pub sorted: Vec<ScheduleEntry>,
}

/// Runs one full pass over a loaded pool and returns the run with its sorted entries
pub fn schedule_pool<R: Rng + ?Sized>(
    pool: &CandidatePool,
    roster: &Roster,
    start_date: NaiveDate,
    rng: &mut R,
) -> Result<(ScheduleRun, Vec<ScheduleEntry>)> {
    let calendar = pool.calendar()?;
    let run = assign_interview_slots(pool, &calendar, roster, start_date, rng);
    let mut sorted = run.entries.clone();
    writer::sort_entries(&mut sorted);
    Ok((run, sorted))
}

/// Loads the availability table and roster, schedules the week and saves the result
pub fn run_weekly_schedule(settings: &ScheduleSettings) -> Result<ScheduleOutcome> {
    log::info!("Loading availability from '{}'", settings.input.display());
    let pool = CandidatePool::load(&settings.input)?;

    let roster = match &settings.roster {
        Some(path) => {
            log::info!("Using roster from '{}'", path.display());
            Roster::load(path)?
        }
        None => Roster::standard(),
    };

    let mut rng = build_rng(settings.seed);
    let (run, sorted) = schedule_pool(&pool, &roster, settings.start_date, &mut rng)?;
    let path = writer::save_schedule(sorted.clone(), &settings.output_dir, settings.start_date)?;

    Ok(ScheduleOutcome { path, pool, run, sorted })
}
