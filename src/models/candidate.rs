//! Derived scheduling types: normalized intervals, candidates and the
//! recommendation handed back to callers. None of these are persisted.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::submission::{DayPreference, RawSlot, TimePreference};
use crate::utils::errors::SlotError;
use crate::utils::helpers::format_window_label;

/// Participants are identified by the submission that introduced them.
pub type ParticipantId = Uuid;

/// A validated slot as a UTC instant pair. `end > start` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedInterval {
    pub participant: ParticipantId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub day_preference: Option<DayPreference>,
    pub time_preference: Option<TimePreference>,
}

/// A slot excluded from ranking, with the reason it was dropped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedSlot {
    pub submission_id: Uuid,
    pub participant_name: String,
    pub slot_index: usize,
    pub slot: RawSlot,
    pub reason: SlotError,
}

/// The (coverage, preference ratio) pair, ordered coverage first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    pub coverage: usize,
    pub preference_ratio: f64,
}

impl CompositeScore {
    pub fn new(coverage: usize, preference_ratio: f64) -> Self {
        Self { coverage, preference_ratio }
    }

    /// Single display number: `coverage + ratio / 2`.
    ///
    /// The fractional part never reaches 1, so a higher coverage always
    /// yields a higher value regardless of ratio.
    pub fn value(&self) -> f64 {
        self.coverage as f64 + self.preference_ratio / 2.0
    }
}

impl Eq for CompositeScore {}

impl Ord for CompositeScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.coverage
            .cmp(&other.coverage)
            .then_with(|| self.preference_ratio.total_cmp(&other.preference_ratio))
    }
}

impl PartialOrd for CompositeScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A recommended meeting window of exactly the event's duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub coverage_count: usize,
    pub preference_ratio: f64,
    pub score: f64,
}

impl Candidate {
    pub fn composite(&self) -> CompositeScore {
        CompositeScore::new(self.coverage_count, self.preference_ratio)
    }

    /// `"<startISO>~<endISO>"`
    pub fn window_label(&self) -> String {
        format_window_label(self.start, self.end)
    }

    /// Whether the two windows share any instant beyond a touching boundary
    pub fn overlaps(&self, other: &Candidate) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Display entry in the shape the front end consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestTime {
    pub time: String,
    pub score: f64,
}

/// Everything one engine run produces for an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub event_id: i64,
    pub candidates: Vec<Candidate>,
    pub rejected_slots: Vec<RejectedSlot>,
    pub response_count: usize,
    pub participation_rate: f64,
}

impl Recommendation {
    pub fn best(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    pub fn best_times(&self) -> Vec<BestTime> {
        self.candidates
            .iter()
            .map(|candidate| BestTime {
                time: candidate.window_label(),
                score: candidate.score,
            })
            .collect()
    }
}
