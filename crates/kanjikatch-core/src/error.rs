//! Error types for the scheduler
//!
//! The review algorithms themselves are total over their typed inputs. Errors
//! only surface at the boundary: parsing calendar-day strings, validating a
//! persisted memory snapshot, loading tuning configuration, and session
//! bookkeeping.

/// Scheduler error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// A calendar-day string was not `YYYY-MM-DD`
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    /// A memory snapshot violates a state invariant
    #[error("Invalid memory state: {0}")]
    InvalidState(String),
    /// Configuration could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
    /// Configuration parsed but holds out-of-range values
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    /// A review session was completed twice
    #[error("Session already completed: {0}")]
    SessionAlreadyCompleted(uuid::Uuid),
}

/// Scheduler result type
pub type Result<T> = std::result::Result<T, SchedulerError>;
