//! Repositories module
//!
//! This module contains all repository implementations for data access

pub mod event;
pub mod submission;

// Re-export repositories
pub use event::EventRepository;
pub use submission::SubmissionRepository;
