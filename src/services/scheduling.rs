//! Scheduling service implementation
//!
//! Application-level operations on events and availability: create events,
//! record submissions, and serve recommendations through the memo.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::engine;
use crate::models::{AvailabilitySubmission, CreateEventRequest, CreateSubmissionRequest, Event, Recommendation};
use crate::services::cache::{CacheKey, RecommendationCache};
use crate::storage::StorageService;
use crate::utils::errors::{MeetSmartError, Result};
use crate::utils::helpers::normalize_whitespace;
use crate::utils::logging;

/// Submissions recorded for an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionListing {
    pub event_id: i64,
    pub submissions: Vec<AvailabilitySubmission>,
    pub response_count: usize,
}

/// Response statistics for an event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticipationSummary {
    pub event_id: i64,
    pub expected: u32,
    pub responses: usize,
    pub rate: f64,
}

#[derive(Debug, Clone)]
pub struct SchedulingService {
    storage: StorageService,
    cache: RecommendationCache,
    engine_config: EngineConfig,
}

impl SchedulingService {
    pub fn new(storage: StorageService, cache: RecommendationCache, engine_config: EngineConfig) -> Self {
        Self {
            storage,
            cache,
            engine_config,
        }
    }

    /// Validate and store a new event
    pub async fn create_event(&self, mut request: CreateEventRequest) -> Result<Event> {
        request.name = normalize_whitespace(&request.name);
        request.validate()?;

        let event = self.storage.events.create(request).await?;
        info!(
            event_id = event.id,
            name = %event.name,
            start_date = %event.start_date,
            end_date = %event.end_date,
            duration_minutes = event.duration_minutes,
            "Event created"
        );
        Ok(event)
    }

    pub async fn get_event(&self, event_id: i64) -> Result<Event> {
        debug!(event_id = event_id, "Getting event");
        self.storage.require_event(event_id).await
    }

    pub async fn list_events(&self, limit: usize, offset: usize) -> Result<Vec<Event>> {
        self.storage.events.list(limit, offset).await
    }

    /// Delete an event, its submissions and any memoized results
    pub async fn delete_event(&self, event_id: i64) -> Result<()> {
        let event = self.storage.delete_event(event_id).await?;
        self.cache.invalidate(event.uid).await;
        info!(event_id = event_id, "Event deleted");
        Ok(())
    }

    /// Record one participant's availability.
    ///
    /// Slots are stored as given; defective ones are reported per slot when a
    /// recommendation is computed, and the submission still counts as a response.
    pub async fn submit_availability(&self, mut request: CreateSubmissionRequest) -> Result<AvailabilitySubmission> {
        request.participant_name = normalize_whitespace(&request.participant_name);
        if request.participant_name.is_empty() {
            // Unknown events still report EventNotFound first
            self.storage.require_event(request.event_id).await?;
            return Err(MeetSmartError::InvalidInput("Participant name is required".to_string()));
        }

        let (event, submission) = self.storage.record_submission(request).await?;
        logging::log_submission_received(
            submission.event_id,
            submission.id,
            &submission.participant_name,
            submission.slots.len(),
        );

        self.cache.invalidate(event.uid).await;
        Ok(submission)
    }

    pub async fn list_submissions(&self, event_id: i64) -> Result<SubmissionListing> {
        let (_, submissions) = self.storage.snapshot(event_id).await?;
        let response_count = engine::response_count(&submissions);
        Ok(SubmissionListing {
            event_id,
            submissions,
            response_count,
        })
    }

    /// Ranked meeting windows for an event, computed from the current
    /// submissions and memoized until the next submission arrives.
    pub async fn recommend(&self, event_id: i64) -> Result<Arc<Recommendation>> {
        let (event, submissions) = self.storage.snapshot(event_id).await?;
        let key = CacheKey::for_event(&event, submissions.len());

        let engine_config = self.engine_config.clone();
        let snapshot_event = event.clone();
        let recommendation = self
            .cache
            .get_or_compute(key, move || async move {
                Ok(engine::recommend(&snapshot_event, &submissions, &engine_config))
            })
            .await?;

        let best_time = recommendation.best().map(|candidate| candidate.start);
        if event.best_time != best_time {
            self.storage.events.set_best_time(event_id, best_time).await?;
            debug!(event_id = event_id, best_time = ?best_time, "Best time updated");
        }

        Ok(recommendation)
    }

    pub async fn participation(&self, event_id: i64) -> Result<ParticipationSummary> {
        let (event, submissions) = self.storage.snapshot(event_id).await?;
        let responses = engine::response_count(&submissions);
        Ok(ParticipationSummary {
            event_id,
            expected: event.participants_count,
            responses,
            rate: engine::participation_rate(event.participants_count, responses),
        })
    }

    pub fn cache(&self) -> &RecommendationCache {
        &self.cache
    }
}
