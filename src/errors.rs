use thiserror::Error;

use crate::ledger::dates::DateParseError;

pub type Result<T> = std::result::Result<T, ProjectionError>;

/// Error type that captures input validation, projection, and persistence failures.
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error(transparent)]
    DateParse(#[from] DateParseError),
    #[error("Unknown recurrence frequency: {0}")]
    UnknownFrequency(String),
    #[error("Bill `{name}` has day of month {day}, expected 1-31")]
    InvalidDayOfMonth { name: String, day: u32 },
    #[error("Savings contribution `{contribution}` references unknown account `{account}`")]
    UnknownSavingsAccount {
        contribution: String,
        account: String,
    },
    #[error("Duplicate savings account: {0}")]
    DuplicateSavingsAccount(String),
    #[error("Projection length of {requested} months exceeds the maximum of {max}")]
    WindowTooLarge { requested: i64, max: i64 },
    #[error("Amount out of range while computing {0}")]
    AmountOutOfRange(String),
    #[error("Invalid expression: {0}")]
    Expression(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
