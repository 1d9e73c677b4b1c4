pub mod submission;
pub mod export;

pub use submission::{load_form_responses, parse_form_responses, FormResponse};
pub use export::{export_availability_table, write_availability_table};
