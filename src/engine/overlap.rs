//! Sweep-line overlap scanning
//!
//! Two sweeps run over the normalized intervals, both O(n log n) in the
//! number of interval endpoints:
//!
//! 1. Over availability itself, producing the piecewise-constant
//!    [`CoverageSegment`] profile: how many participants are available at
//!    each instant.
//! 2. Over feasible window *starts*. A participant is counted for the
//!    window `[s, s + d]` only if one of their intervals `[a, b]` contains
//!    it entirely, i.e. `a <= s <= b - d`. Sweeping those start ranges
//!    gives the exact coverage of every window as a function of its start.
//!
//! Candidate starts are anchored at segment and interval boundaries (a
//! window that begins, or ends, where someone's availability changes),
//! scored against the second sweep, and thinned so that anchors within one
//! coverage plateau never yield overlapping windows.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::models::{NormalizedInterval, ParticipantId};

/// Stretch of time over which the number of available participants is constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageSegment {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub count: usize,
}

/// A window of the event's duration and how many participants cover it fully
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowCoverage {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub coverage: usize,
}

/// Half-open `[start, end)` span in whole seconds since the epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: i64,
    end: i64,
}

/// Constant-count run produced by a sweep, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Level {
    start: i64,
    end: i64,
    count: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct OverlapScanner {
    duration: i64,
}

impl OverlapScanner {
    /// # Panics
    ///
    /// Panics if `duration` is not positive; events validate this on creation.
    pub fn new(duration: Duration) -> Self {
        let duration = duration.num_seconds();
        assert!(duration > 0, "meeting duration must be positive");
        Self { duration }
    }

    /// Piecewise-constant availability profile, positive segments only, ordered by start
    pub fn coverage_segments(&self, intervals: &[NormalizedInterval]) -> Vec<CoverageSegment> {
        availability_levels(intervals)
            .into_iter()
            .map(|level| CoverageSegment {
                start: instant(level.start),
                end: instant(level.end),
                count: level.count,
            })
            .collect()
    }

    /// Candidate windows with positive coverage, ordered by start
    pub fn scan(&self, intervals: &[NormalizedInterval]) -> Vec<WindowCoverage> {
        let d = self.duration;
        let levels = availability_levels(intervals);
        let plateaus = self.start_plateaus(intervals);

        let anchors = self.anchors(&levels, intervals);
        let mut windows = Vec::new();
        let mut last_kept: Option<(usize, i64)> = None;

        for s in anchors {
            let idx = plateaus.partition_point(|p| p.end <= s);
            let Some(plateau) = plateaus.get(idx).filter(|p| p.start <= s) else {
                continue;
            };

            if let Some((kept_idx, kept_start)) = last_kept {
                if kept_idx == idx && s < kept_start + d {
                    trace!(start = s, kept = kept_start, "Anchor overlaps an earlier window on the same plateau");
                    continue;
                }
            }

            last_kept = Some((idx, s));
            windows.push(WindowCoverage {
                start: instant(s),
                end: instant(s + d),
                coverage: plateau.count,
            });
        }

        debug!(
            segments = levels.len(),
            plateaus = plateaus.len(),
            windows = windows.len(),
            "Overlap scan finished"
        );

        windows
    }

    /// Sweep over feasible window starts: each participant contributes the
    /// union of `[a, b - d]` over their intervals, so nobody is counted twice.
    fn start_plateaus(&self, intervals: &[NormalizedInterval]) -> Vec<Level> {
        let d = self.duration;
        let mut edges = Vec::new();

        for spans in spans_by_participant(intervals).into_values() {
            let ranges = spans
                .into_iter()
                .filter(|span| span.end - span.start >= d)
                .map(|span| Span { start: span.start, end: span.end - d + 1 })
                .collect();

            for range in merge_spans(ranges) {
                edges.push((range.start, 1));
                edges.push((range.end, -1));
            }
        }

        sweep(edges)
    }

    /// Window starts worth evaluating, ascending.
    ///
    /// Every boundary `t` of the availability profile and of each interval
    /// proposes `t` and `t - d`; a proposal survives only if the whole window
    /// fits inside one contiguous run of positive availability at least `d` long.
    fn anchors(&self, levels: &[Level], intervals: &[NormalizedInterval]) -> BTreeSet<i64> {
        let d = self.duration;
        let runs = contiguous_runs(levels);

        let mut boundaries: BTreeSet<i64> = levels
            .iter()
            .flat_map(|level| [level.start, level.end])
            .collect();
        for interval in intervals {
            boundaries.insert(interval.start.timestamp());
            boundaries.insert(interval.end.timestamp());
        }

        boundaries
            .into_iter()
            .flat_map(|t| [t - d, t])
            .filter(|&s| {
                let idx = runs.partition_point(|run| run.end < s + d);
                runs.get(idx).is_some_and(|run| run.start <= s)
            })
            .collect()
    }
}

/// Runs of back-to-back positive segments, merged into single spans
fn contiguous_runs(levels: &[Level]) -> Vec<Span> {
    let mut runs: Vec<Span> = Vec::new();
    for level in levels {
        match runs.last_mut() {
            Some(run) if run.end == level.start => run.end = level.end,
            _ => runs.push(Span { start: level.start, end: level.end }),
        }
    }
    runs
}

/// Availability profile with each participant's intervals unioned first
fn availability_levels(intervals: &[NormalizedInterval]) -> Vec<Level> {
    let mut edges = Vec::new();
    for spans in spans_by_participant(intervals).into_values() {
        for span in merge_spans(spans) {
            edges.push((span.start, 1));
            edges.push((span.end, -1));
        }
    }
    sweep(edges)
}

fn spans_by_participant(intervals: &[NormalizedInterval]) -> BTreeMap<ParticipantId, Vec<Span>> {
    let mut by_participant: BTreeMap<ParticipantId, Vec<Span>> = BTreeMap::new();
    for interval in intervals {
        by_participant.entry(interval.participant).or_default().push(Span {
            start: interval.start.timestamp(),
            end: interval.end.timestamp(),
        });
    }
    by_participant
}

/// Union of half-open spans; touching spans merge
fn merge_spans(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort_unstable_by_key(|span| (span.start, span.end));
    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}

/// Walk `(instant, delta)` edges in order, closing at `-1` before opening at
/// `+1` on equal instants, and emit positive constant-count levels. Adjacent
/// levels with the same count are coalesced.
fn sweep(mut edges: Vec<(i64, i32)>) -> Vec<Level> {
    edges.sort_unstable();

    let mut levels: Vec<Level> = Vec::new();
    let mut active: i64 = 0;
    let mut cursor: Option<i64> = None;

    for (t, delta) in edges {
        if let Some(prev) = cursor {
            if t > prev && active > 0 {
                let count = active as usize;
                match levels.last_mut() {
                    Some(last) if last.end == prev && last.count == count => last.end = t,
                    _ => levels.push(Level { start: prev, end: t, count }),
                }
            }
        }
        active += i64::from(delta);
        cursor = Some(t);
    }

    levels
}

fn instant(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
