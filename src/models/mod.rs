//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod event;
pub mod submission;
pub mod candidate;

// Re-export commonly used models
pub use event::{Event, CreateEventRequest};
pub use submission::{AvailabilitySubmission, CreateSubmissionRequest, SubmissionDraft, RawSlot, DayPreference, TimePreference};
pub use candidate::{NormalizedInterval, RejectedSlot, Candidate, CompositeScore, Recommendation, BestTime, ParticipantId};
