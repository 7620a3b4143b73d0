//! Storage service layer
//!
//! This module provides a high-level interface to the event store
//!
//! Operations that span both repositories take the lifecycle lock: readers
//! and submissions share it, deletion holds it exclusively, so no submission
//! can land for an event that is being removed.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{AvailabilitySubmission, CreateSubmissionRequest, Event};
use crate::storage::{EventRepository, SubmissionRepository};
use crate::utils::errors::{MeetSmartError, Result};

#[derive(Debug, Clone, Default)]
pub struct StorageService {
    pub events: EventRepository,
    pub submissions: SubmissionRepository,
    lifecycle: Arc<RwLock<()>>,
}

impl StorageService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an event or fail with `EventNotFound`
    pub async fn require_event(&self, event_id: i64) -> Result<Event> {
        self.events
            .find_by_id(event_id)
            .await?
            .ok_or(MeetSmartError::EventNotFound { event_id })
    }

    /// Current event row plus every submission recorded for it
    pub async fn snapshot(&self, event_id: i64) -> Result<(Event, Vec<AvailabilitySubmission>)> {
        let _guard = self.lifecycle.read().await;
        let event = self.require_event(event_id).await?;
        let submissions = self.submissions.list_for_event(event_id).await?;
        Ok((event, submissions))
    }

    /// Append a submission, failing with `EventNotFound` if the event is gone
    pub async fn record_submission(&self, request: CreateSubmissionRequest) -> Result<(Event, AvailabilitySubmission)> {
        let _guard = self.lifecycle.read().await;
        let event = self.require_event(request.event_id).await?;
        let submission = self.submissions.create(request).await?;
        Ok((event, submission))
    }

    /// Delete an event together with its submissions, returning the removed row
    pub async fn delete_event(&self, event_id: i64) -> Result<Event> {
        let _guard = self.lifecycle.write().await;
        let event = self.require_event(event_id).await?;
        self.events.delete(event_id).await?;
        self.submissions.delete_for_event(event_id).await?;
        Ok(event)
    }
}
