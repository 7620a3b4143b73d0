//! Final ordering and truncation of candidate windows

use tracing::trace;

use crate::config::EngineConfig;
use crate::models::Candidate;

#[derive(Debug, Clone, Copy)]
pub struct CandidateRanker {
    max_candidates: usize,
    allow_overlapping: bool,
}

impl CandidateRanker {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            max_candidates: config.max_candidates,
            allow_overlapping: config.allow_overlapping,
        }
    }

    /// Order by coverage descending, then preference ratio descending, then
    /// start ascending. Zero-coverage candidates are dropped; unless
    /// overlapping is allowed, a candidate sharing time with a better one is
    /// skipped. At most `max_candidates` survive.
    pub fn rank(&self, mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates.retain(|candidate| candidate.coverage_count > 0);
        candidates.sort_by(|a, b| {
            b.composite()
                .cmp(&a.composite())
                .then_with(|| a.start.cmp(&b.start))
        });

        let mut ranked: Vec<Candidate> = Vec::with_capacity(self.max_candidates.min(candidates.len()));
        for candidate in candidates {
            if ranked.len() == self.max_candidates {
                break;
            }
            if !self.allow_overlapping && ranked.iter().any(|kept| kept.overlaps(&candidate)) {
                trace!(window = %candidate.window_label(), "Skipping candidate overlapping a better one");
                continue;
            }
            ranked.push(candidate);
        }

        ranked
    }
}

impl Default for CandidateRanker {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
