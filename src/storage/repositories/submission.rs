//! Submission repository implementation
//!
//! Submissions are append-only: a participant who answers again produces a
//! new record, never an update of the old one.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::submission::{AvailabilitySubmission, CreateSubmissionRequest};
use crate::utils::errors::Result;

#[derive(Debug, Clone, Default)]
pub struct SubmissionRepository {
    by_event: Arc<RwLock<HashMap<i64, Vec<AvailabilitySubmission>>>>,
}

impl SubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a submission for its event
    pub async fn create(&self, request: CreateSubmissionRequest) -> Result<AvailabilitySubmission> {
        let submission = AvailabilitySubmission {
            id: Uuid::new_v4(),
            event_id: request.event_id,
            participant_name: request.participant_name,
            slots: request.slots,
            day_preference: request.day_preference,
            time_preference: request.time_preference,
            submitted_at: Utc::now(),
        };

        self.by_event
            .write()
            .await
            .entry(submission.event_id)
            .or_default()
            .push(submission.clone());

        Ok(submission)
    }

    /// All submissions for an event, in submission order
    pub async fn list_for_event(&self, event_id: i64) -> Result<Vec<AvailabilitySubmission>> {
        Ok(self
            .by_event
            .read()
            .await
            .get(&event_id)
            .cloned()
            .unwrap_or_default())
    }

    /// Number of submissions for an event; doubles as the version token
    pub async fn count_for_event(&self, event_id: i64) -> Result<usize> {
        Ok(self.by_event.read().await.get(&event_id).map_or(0, Vec::len))
    }

    /// Remove every submission of an event
    pub async fn delete_for_event(&self, event_id: i64) -> Result<usize> {
        Ok(self
            .by_event
            .write()
            .await
            .remove(&event_id)
            .map_or(0, |removed| removed.len()))
    }
}
