use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read or write CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Required column '{column}' is missing from the input table")]
    MissingColumn { column: String },

    #[error("Slot label '{0}' is not of the form '<Weekday> <time range>'")]
    InvalidSlotLabel(String),

    #[error("Invalid roster entry: {0}")]
    InvalidRoster(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, Error>;
