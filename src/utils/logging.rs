//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the MeetSmart application.

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;
use crate::config::LoggingConfig;
use crate::utils::errors::{ErrorSeverity, MeetSmartError, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file writer on drop, so the caller must
/// hold it for the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let (file_writer, guard) = match &config.file_path {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "meetsmart.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (Some(non_blocking), Some(guard))
        }
        None => (None, None),
    };
    let file_layer = file_writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(writer)
    });

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| MeetSmartError::Config(format!("Failed to install subscriber: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a newly recorded availability submission
pub fn log_submission_received(event_id: i64, submission_id: Uuid, participant: &str, slot_count: usize) {
    info!(
        event_id = event_id,
        submission_id = %submission_id,
        participant = participant,
        slot_count = slot_count,
        "Availability submission recorded"
    );
}

/// Log a slot excluded during normalization
pub fn log_slot_rejected(submission_id: Uuid, slot_index: usize, reason: &str) {
    warn!(
        submission_id = %submission_id,
        slot_index = slot_index,
        reason = reason,
        "Availability slot rejected"
    );
}

/// Log the outcome of a recommendation run
pub fn log_recommendation_computed(event_id: i64, candidates: usize, rejected: usize, participants: usize) {
    info!(
        event_id = event_id,
        candidates = candidates,
        rejected_slots = rejected,
        participants = participants,
        "Recommendation computed"
    );
}

/// Log cache hits and misses
pub fn log_cache_event(event_id: i64, version: usize, outcome: &str) {
    debug!(
        event_id = event_id,
        version = version,
        outcome = outcome,
        "Recommendation cache event"
    );
}

/// Log an error at the level its severity calls for
pub fn log_error(err: &MeetSmartError, context: &str) {
    let severity = err.severity();
    let recoverable = err.is_recoverable();
    match severity {
        ErrorSeverity::Info => info!(error = %err, severity = %severity, recoverable, context, "Operation failed"),
        ErrorSeverity::Warning => warn!(error = %err, severity = %severity, recoverable, context, "Operation failed"),
        ErrorSeverity::Error | ErrorSeverity::Critical => {
            error!(error = %err, severity = %severity, recoverable, context, "Operation failed")
        }
    }
}
