//! Error types for the planner.

use thiserror::Error;

/// Errors that can occur in planner operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Roster is full ({0} students maximum)")]
    RosterFull(usize),

    #[error("Student name cannot be empty")]
    EmptyStudentName,

    #[error("Entry is missing required field '{0}'")]
    IncompleteEntry(&'static str),

    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    #[error("Storage error for key '{key}': {message}")]
    Storage { key: String, message: String },

    #[error("Export failed: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for planner operations.
pub type PlannerResult<T> = Result<T, PlannerError>;
