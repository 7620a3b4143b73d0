//! Event repository implementation

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::event::{CreateEventRequest, Event};
use crate::utils::errors::{MeetSmartError, Result};

#[derive(Debug, Default)]
struct EventTable {
    next_id: i64,
    rows: BTreeMap<i64, Event>,
}

#[derive(Debug, Clone, Default)]
pub struct EventRepository {
    table: Arc<RwLock<EventTable>>,
}

impl EventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new event
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event> {
        let mut table = self.table.write().await;
        table.next_id += 1;

        let event = Event {
            id: table.next_id,
            uid: Uuid::new_v4(),
            name: request.name,
            start_date: request.start_date,
            end_date: request.end_date,
            duration_minutes: request.duration_minutes,
            participants_count: request.participants_count,
            best_time: None,
            created_at: Utc::now(),
        };
        table.rows.insert(event.id, event.clone());

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    /// Store the cached best-time result
    pub async fn set_best_time(&self, id: i64, best_time: Option<DateTime<Utc>>) -> Result<Event> {
        let mut table = self.table.write().await;
        let event = table
            .rows
            .get_mut(&id)
            .ok_or(MeetSmartError::EventNotFound { event_id: id })?;
        event.best_time = best_time;

        Ok(event.clone())
    }

    /// List events ordered by start date
    pub async fn list(&self, limit: usize, offset: usize) -> Result<Vec<Event>> {
        let table = self.table.read().await;
        let mut events: Vec<Event> = table.rows.values().cloned().collect();
        events.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.id.cmp(&b.id)));

        Ok(events.into_iter().skip(offset).take(limit).collect())
    }

    /// Delete event, returning whether it existed
    pub async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    /// Count total events
    pub async fn count(&self) -> Result<usize> {
        Ok(self.table.read().await.rows.len())
    }
}
