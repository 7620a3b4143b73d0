//! Test helpers module
//!
//! Builders for events, slots and submissions shared by the integration tests.

#![allow(dead_code)]

use std::sync::Once;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use uuid::Uuid;

use meetsmart::config::Settings;
use meetsmart::models::{
    AvailabilitySubmission, CreateEventRequest, CreateSubmissionRequest, DayPreference, Event, RawSlot,
    TimePreference,
};
use meetsmart::services::{SchedulingService, ServiceFactory};

static INIT: Once = Once::new();

/// Initialize test environment
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt::try_init();
    });
}

/// A date in October 2024; the 19th and 20th are a weekend
pub fn day(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, day).unwrap()
}

pub fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub fn at(date: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 10, date, hour, minute, 0).unwrap()
}

pub fn slot(date: u32, start: (u32, u32), end: (u32, u32)) -> RawSlot {
    RawSlot::new(day(date), hm(start.0, start.1), hm(end.0, end.1))
}

/// Event spanning 2024-10-19 through 2024-10-25
pub fn test_event(duration_minutes: u32, participants_count: u32) -> Event {
    Event {
        id: 1,
        uid: Uuid::new_v4(),
        name: "Team sync".to_string(),
        start_date: day(19),
        end_date: day(25),
        duration_minutes,
        participants_count,
        best_time: None,
        created_at: Utc::now(),
    }
}

pub fn test_event_request(duration_minutes: u32, participants_count: u32) -> CreateEventRequest {
    CreateEventRequest {
        name: "Team sync".to_string(),
        start_date: day(19),
        end_date: day(25),
        duration_minutes,
        participants_count,
    }
}

pub fn test_submission(event_id: i64, name: &str, slots: Vec<RawSlot>) -> AvailabilitySubmission {
    AvailabilitySubmission {
        id: Uuid::new_v4(),
        event_id,
        participant_name: name.to_string(),
        slots,
        day_preference: None,
        time_preference: None,
        submitted_at: Utc::now(),
    }
}

pub fn with_preferences(
    mut submission: AvailabilitySubmission,
    day_preference: Option<DayPreference>,
    time_preference: Option<TimePreference>,
) -> AvailabilitySubmission {
    submission.day_preference = day_preference;
    submission.time_preference = time_preference;
    submission
}

pub fn test_submission_request(event_id: i64, name: &str, slots: Vec<RawSlot>) -> CreateSubmissionRequest {
    CreateSubmissionRequest {
        event_id,
        participant_name: name.to_string(),
        slots,
        day_preference: None,
        time_preference: None,
    }
}

/// Scheduling service wired from default settings (in-memory cache)
pub fn test_scheduling_service() -> SchedulingService {
    init_test_env();
    ServiceFactory::new(Settings::default())
        .expect("Failed to build services")
        .scheduling_service
}
