//! MeetSmart
//!
//! Meeting-time recommendation engine. Participants submit the time slots
//! they are free within an event's date range; the engine finds the windows
//! of the event's duration that the most participants can attend and ranks
//! them, breaking ties with the participants' stated day and time-of-day
//! preferences.

pub mod config;
pub mod engine;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{MeetSmartError, Result};

// Re-export main components for easy access
pub use engine::recommend;
pub use services::ServiceFactory;
pub use storage::StorageService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
