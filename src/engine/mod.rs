//! Meeting-time recommendation engine
//!
//! A pure function of an event and its submissions: normalize the slots,
//! sweep for coverage, score preferences, rank. Nothing here performs I/O
//! or touches shared state, so callers may run it concurrently and memoize
//! it freely.

pub mod normalizer;
pub mod overlap;
pub mod preference;
pub mod ranker;
pub mod participation;

pub use normalizer::{normalize, normalize_slot, Normalized};
pub use overlap::{CoverageSegment, OverlapScanner, WindowCoverage};
pub use participation::{participation_rate, response_count};
pub use preference::{day_bucket, time_bucket, PreferenceScorer};
pub use ranker::CandidateRanker;

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::models::{AvailabilitySubmission, Candidate, CompositeScore, Event, Recommendation};
use crate::utils::logging;

/// Rank candidate windows for `event` from the given submissions.
///
/// Submissions belonging to another event are ignored. An empty candidate
/// list is a valid outcome meaning no window could be covered.
pub fn recommend(event: &Event, submissions: &[AvailabilitySubmission], config: &EngineConfig) -> Recommendation {
    let (own, foreign): (Vec<_>, Vec<_>) = submissions
        .iter()
        .cloned()
        .partition(|submission| submission.event_id == event.id);
    if !foreign.is_empty() {
        warn!(event_id = event.id, ignored = foreign.len(), "Ignoring submissions for other events");
    }

    let Normalized { intervals, rejected } = normalize(event, &own);

    let scanner = OverlapScanner::new(event.duration());
    let windows = scanner.scan(&intervals);
    let scorer = PreferenceScorer::new(&intervals);

    let scored = windows
        .into_iter()
        .map(|window| {
            let ratio = scorer.score(window.start, window.end);
            Candidate {
                start: window.start,
                end: window.end,
                coverage_count: window.coverage,
                preference_ratio: ratio,
                score: CompositeScore::new(window.coverage, ratio).value(),
            }
        })
        .collect::<Vec<_>>();
    debug!(event_id = event.id, scored = scored.len(), "Candidate windows scored");

    let candidates = CandidateRanker::new(config).rank(scored);
    let responses = response_count(&own);

    logging::log_recommendation_computed(event.id, candidates.len(), rejected.len(), responses);

    Recommendation {
        event_id: event.id,
        candidates,
        rejected_slots: rejected,
        response_count: responses,
        participation_rate: participation_rate(event.participants_count, responses),
    }
}
