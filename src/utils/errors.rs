//! Error handling for MeetSmart
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for MeetSmart application
#[derive(Error, Debug)]
pub enum MeetSmartError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: i64 },

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reason a raw availability slot was excluded from ranking.
///
/// These never surface as `Err`; they travel inside
/// [`RejectedSlot`](crate::models::RejectedSlot) records so the caller can
/// show which entries of which submission were defective.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotError {
    #[error("slot end is not after its start")]
    EndNotAfterStart,

    #[error("slot date is outside the event's date range")]
    OutsideEventBounds,

    #[error("slot is shorter than the event duration")]
    ShorterThanDuration,
}

/// Result type alias for MeetSmart operations
pub type Result<T> = std::result::Result<T, MeetSmartError>;

impl MeetSmartError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            MeetSmartError::Config(_) => false,
            MeetSmartError::ConfigLoad(_) => false,
            MeetSmartError::EventNotFound { .. } => false,
            MeetSmartError::InvalidEvent(_) => false,
            MeetSmartError::InvalidInput(_) => false,
            MeetSmartError::Redis(_) => true,
            MeetSmartError::Serialization(_) => false,
            MeetSmartError::Io(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            MeetSmartError::Config(_) => ErrorSeverity::Critical,
            MeetSmartError::ConfigLoad(_) => ErrorSeverity::Critical,
            MeetSmartError::EventNotFound { .. } => ErrorSeverity::Info,
            MeetSmartError::InvalidEvent(_) => ErrorSeverity::Info,
            MeetSmartError::InvalidInput(_) => ErrorSeverity::Info,
            MeetSmartError::Redis(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
