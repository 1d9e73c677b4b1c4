pub mod types;
pub mod registry;
pub mod attendees;
pub mod engine;

pub use types::{Attendee, ScheduleEntry, ScheduleRun, MAX_ADDITIONAL_ATTENDEES};
pub use registry::UsedSlotRegistry;
pub use attendees::find_additional_attendees;
pub use engine::{assign_interview_slots, find_free_slot};
