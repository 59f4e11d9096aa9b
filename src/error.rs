//! Error taxonomy for the insight core.
//!
//! Only input-shape problems are errors. Unknown pages and unmatched chat
//! questions resolve to fallbacks and never reach this type.

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum InsightError {
    #[error("Cannot classify an empty series")]
    EmptySeries,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown metric preset: {0}")]
    UnknownPreset(String),

    #[error("Unknown demo user: {0}")]
    UnknownUser(String),
}
