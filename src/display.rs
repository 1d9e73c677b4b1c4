use crate::pool::CandidatePool;
use crate::schedule::{ScheduleEntry, ScheduleRun};

/// Formats the interviewer panel, or a dash when nobody is rostered
pub fn format_panel(interviewers: &[String]) -> String {
    if interviewers.is_empty() {
        "-".to_string()
    } else {
        interviewers.join(", ")
    }
}

/// One line per session: date, slot, interviewee, panel and attendees
pub fn format_entry(entry: &ScheduleEntry) -> String {
    let mut line = format!(
        "{} {} -> {} (panel: {})",
        entry.date.format("%a %Y-%m-%d"),
        entry.slot,
        entry.interviewee.full_name(),
        format_panel(&entry.interviewers)
    );
    if !entry.additional_attendees.is_empty() {
        let names: Vec<&str> = entry.additional_attendees.iter().map(|a| a.name.as_str()).collect();
        line.push_str(&format!(" + {}", names.join(", ")));
    }
    line
}

/// Prints a readable summary of a run. `entries` should already be sorted.
pub fn print_run_summary(pool: &CandidatePool, run: &ScheduleRun, entries: &[ScheduleEntry]) {
    println!("\n=== Interview Schedule ===");
    println!("Total interviews scheduled: {}", entries.len());

    if !run.unscheduled.is_empty() {
        println!("⚠️  Unscheduled candidates ({}):", run.unscheduled.len());
        for index in &run.unscheduled {
            if let Some(candidate) = pool.get(*index) {
                println!(
                    "  - {} (Roll: {}, {})",
                    candidate.identity.full_name(),
                    candidate.identity.roll_number,
                    candidate.identity.email
                );
            }
        }
    }

    println!("\nSessions:");
    for entry in entries {
        println!("  {}", format_entry(entry));
    }
}
