//! Availability submission model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::utils::errors::{MeetSmartError, Result};
use crate::utils::helpers::{self, wall_clock};

/// Which days of the week a participant would rather meet on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPreference {
    Weekdays,
    Weekends,
}

/// Which part of the day a participant would rather meet in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePreference {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl FromStr for DayPreference {
    type Err = MeetSmartError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekdays" => Ok(DayPreference::Weekdays),
            "weekends" => Ok(DayPreference::Weekends),
            other => Err(MeetSmartError::InvalidInput(format!("Unknown day preference: {}", other))),
        }
    }
}

impl FromStr for TimePreference {
    type Err = MeetSmartError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(TimePreference::Morning),
            "afternoon" => Ok(TimePreference::Afternoon),
            "evening" => Ok(TimePreference::Evening),
            "night" => Ok(TimePreference::Night),
            other => Err(MeetSmartError::InvalidInput(format!("Unknown time preference: {}", other))),
        }
    }
}

impl fmt::Display for DayPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayPreference::Weekdays => write!(f, "weekdays"),
            DayPreference::Weekends => write!(f, "weekends"),
        }
    }
}

impl fmt::Display for TimePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimePreference::Morning => write!(f, "morning"),
            TimePreference::Afternoon => write!(f, "afternoon"),
            TimePreference::Evening => write!(f, "evening"),
            TimePreference::Night => write!(f, "night"),
        }
    }
}

/// Treats a missing value, `null` and `""` alike as "no preference".
fn optional_preference<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some).map_err(de::Error::custom),
    }
}

/// A single availability entry as typed by the participant.
///
/// An `end_time` of `00:00` means midnight at the end of `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSlot {
    pub date: NaiveDate,
    #[serde(rename = "startTime", alias = "start_time", with = "wall_clock")]
    pub start_time: NaiveTime,
    #[serde(rename = "endTime", alias = "end_time", with = "wall_clock")]
    pub end_time: NaiveTime,
}

impl RawSlot {
    pub fn new(date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self { date, start_time, end_time }
    }

    /// Build a slot from a pair of `YYYY-MM-DD HH:MM:SS` strings.
    ///
    /// Both ends must fall on the same calendar date, except that the end
    /// may be the midnight that closes it.
    pub fn from_datetime_strings(start: &str, end: &str) -> Result<Self> {
        let start = helpers::parse_local_datetime(start)?;
        let end = helpers::parse_local_datetime(end)?;

        let closes_day = end.time() == NaiveTime::MIN && start.date().succ_opt() == Some(end.date());
        if start.date() != end.date() && !closes_day {
            return Err(MeetSmartError::InvalidInput(format!(
                "Slot spans two dates: {} and {}",
                start.date(),
                end.date()
            )));
        }

        Ok(Self::new(start.date(), start.time(), end.time()))
    }
}

/// One participant's answer for an event. Never mutated once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySubmission {
    pub id: Uuid,
    pub event_id: i64,
    pub participant_name: String,
    pub slots: Vec<RawSlot>,
    pub day_preference: Option<DayPreference>,
    pub time_preference: Option<TimePreference>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubmissionRequest {
    pub event_id: i64,
    pub participant_name: String,
    #[serde(alias = "availability")]
    pub slots: Vec<RawSlot>,
    #[serde(default, alias = "preference_day", deserialize_with = "optional_preference")]
    pub day_preference: Option<DayPreference>,
    #[serde(default, alias = "preference_time", deserialize_with = "optional_preference")]
    pub time_preference: Option<TimePreference>,
}

/// A submission as it appears in an offline snapshot, before it is tied to an event id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionDraft {
    #[serde(alias = "name")]
    pub participant_name: String,
    #[serde(alias = "availability")]
    pub slots: Vec<RawSlot>,
    #[serde(default, alias = "preference_day", deserialize_with = "optional_preference")]
    pub day_preference: Option<DayPreference>,
    #[serde(default, alias = "preference_time", deserialize_with = "optional_preference")]
    pub time_preference: Option<TimePreference>,
}

impl SubmissionDraft {
    pub fn into_request(self, event_id: i64) -> CreateSubmissionRequest {
        CreateSubmissionRequest {
            event_id,
            participant_name: self.participant_name,
            slots: self.slots,
            day_preference: self.day_preference,
            time_preference: self.time_preference,
        }
    }
}
