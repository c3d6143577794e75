//! Error types.
//!
//! Scheduling itself is total and never fails; only loading configuration
//! can.

/// Errors raised while configuring a scheduling run.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("invalid scheduler config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid start instant '{0}': expected RFC 3339")]
    InvalidStartInstant(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
