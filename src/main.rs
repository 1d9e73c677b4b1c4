use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use interview_scheduler::config::{
    self, ScheduleSettings, DEFAULT_LOG_DIR, DEFAULT_OUTBOX_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_PORT,
    DEFAULT_REMINDER_DAYS_AHEAD,
};
use interview_scheduler::error::Result;
use interview_scheduler::roster::Roster;
use interview_scheduler::{display, form, logger, reminder, run_weekly_schedule, web};

#[derive(Parser)]
#[command(name = "interview-scheduler")]
#[command(about = "Assigns weekly interview slots from candidate availability")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory for schedule_log.txt
    #[arg(long, global = true, default_value = DEFAULT_LOG_DIR)]
    log_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Schedule the week from an availability table.
    Schedule {
        /// Availability table (CSV)
        #[arg(short, long)]
        input: PathBuf,
        /// Directory the schedule CSV is written to
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,
        /// First day of the window (YYYY-MM-DD); defaults to the coming Monday
        #[arg(long, value_parser = parse_date_arg)]
        start: Option<NaiveDate>,
        /// Random seed for a reproducible candidate order
        #[arg(long)]
        seed: Option<u64>,
        /// Roster CSV (Day,Time Range,Interviewers) replacing the built-in one
        #[arg(long)]
        roster: Option<PathBuf>,
    },

    /// Turn raw form responses into an availability table.
    Prepare {
        /// Form responses (CSV)
        #[arg(short, long)]
        responses: PathBuf,
        /// Availability table to write (CSV)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Write reminder messages for upcoming interviews.
    Remind {
        /// Written schedule (CSV)
        #[arg(short, long)]
        schedule: PathBuf,
        #[arg(long, default_value = DEFAULT_OUTBOX_DIR)]
        outbox: PathBuf,
        #[arg(long, default_value_t = DEFAULT_REMINDER_DAYS_AHEAD)]
        days_ahead: i64,
        /// Override today's date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        today: Option<NaiveDate>,
    },

    /// Serve the scheduler over HTTP.
    Web {
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Admin password for uploads
        #[arg(long, env = "ADMIN_PASSWORD", default_value = "admin123")]
        admin_password: String,
        #[arg(long)]
        roster: Option<PathBuf>,
    },
}

fn parse_date_arg(value: &str) -> std::result::Result<NaiveDate, String> {
    config::parse_date(value).map_err(|e| e.to_string())
}

fn load_roster(path: Option<&PathBuf>) -> Result<Roster> {
    match path {
        Some(path) => Roster::load(path),
        None => Ok(Roster::standard()),
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logger::init(&cli.log_dir);

    let today = Local::now().date_naive();

    match cli.command {
        Commands::Schedule {
            input,
            output_dir,
            start,
            seed,
            roster,
        } => {
            let settings = ScheduleSettings {
                input,
                output_dir,
                roster,
                start_date: config::resolve_start_date(start, today),
                seed,
            };

            let outcome = run_weekly_schedule(&settings)?;
            display::print_run_summary(&outcome.pool, &outcome.run, &outcome.sorted);

            println!(
                "\nWeekly interview scheduling complete for week starting {}. Schedule written to {}",
                settings.start_date,
                outcome.path.display()
            );
        }

        Commands::Prepare { responses, output } => {
            let parsed = form::load_form_responses(&responses)?;
            form::export_availability_table(&parsed, &output)?;
            println!("Availability for {} respondents written to {}", parsed.len(), output.display());
        }

        Commands::Remind {
            schedule,
            outbox,
            days_ahead,
            today: today_override,
        } => {
            let interviews = reminder::load_schedule(&schedule)?;
            let due = reminder::due_reminders(&interviews, today_override.unwrap_or(today), days_ahead);
            let written = reminder::write_outbox(&due, &outbox)?;
            println!("{} reminders written to {}", written.len(), outbox.display());
        }

        Commands::Web {
            port,
            admin_password,
            roster,
        } => {
            let roster = load_roster(roster.as_ref())?;
            log::info!("Starting web server on port {}", port);
            println!("Access the API at http://localhost:{}", port);
            web::start_server(port, roster, admin_password).await?;
        }
    }

    Ok(())
}
