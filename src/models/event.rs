//! Event model

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::utils::errors::{MeetSmartError, Result};

const MINUTES_PER_DAY: i64 = 24 * 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    /// Store-local identifier; restarts with every process
    pub id: i64,
    /// Globally unique identity used for anything shared across processes
    pub uid: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_minutes: u32,
    pub participants_count: u32,
    /// Start of the top candidate from the latest recommendation
    pub best_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_minutes: u32,
    pub participants_count: u32,
}

impl Event {
    /// Required meeting length
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }

    /// Whether `date` falls inside `[start_date, end_date]`
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

impl CreateEventRequest {
    /// Check the event invariants before the event is stored
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(MeetSmartError::InvalidEvent("Event name is required".to_string()));
        }

        if self.duration_minutes == 0 {
            return Err(MeetSmartError::InvalidEvent(
                "Duration must be greater than 0 minutes".to_string()
            ));
        }

        if self.participants_count == 0 {
            return Err(MeetSmartError::InvalidEvent(
                "Participant count must be at least 1".to_string()
            ));
        }

        if self.start_date > self.end_date {
            return Err(MeetSmartError::InvalidEvent(format!(
                "Start date {} is after end date {}",
                self.start_date, self.end_date
            )));
        }

        let span_days = (self.end_date - self.start_date).num_days() + 1;
        if i64::from(self.duration_minutes) > span_days * MINUTES_PER_DAY {
            return Err(MeetSmartError::InvalidEvent(format!(
                "Duration of {} minutes does not fit in a {}-day span",
                self.duration_minutes, span_days
            )));
        }

        Ok(())
    }
}
