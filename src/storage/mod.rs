//! Storage module
//!
//! In-process event and submission store. The repositories expose async
//! methods so a database-backed implementation can replace them without
//! touching callers.

pub mod repositories;
pub mod service;

// Re-export commonly used storage components
pub use repositories::{EventRepository, SubmissionRepository};
pub use service::StorageService;
