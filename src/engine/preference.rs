//! Day and time-of-day preference matching

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};

use crate::models::{DayPreference, NormalizedInterval, ParticipantId, TimePreference};

/// Day bucket of an instant: Monday to Friday are weekdays
pub fn day_bucket(instant: DateTime<Utc>) -> DayPreference {
    match instant.weekday() {
        Weekday::Sat | Weekday::Sun => DayPreference::Weekends,
        _ => DayPreference::Weekdays,
    }
}

/// Time bucket of an instant, by hour of day.
///
/// Night wraps past midnight (21:00 to 01:59); 02:00 to 05:59 falls in no
/// bucket, so a stated time preference can never match it.
pub fn time_bucket(instant: DateTime<Utc>) -> Option<TimePreference> {
    match instant.hour() {
        6..=11 => Some(TimePreference::Morning),
        12..=16 => Some(TimePreference::Afternoon),
        17..=20 => Some(TimePreference::Evening),
        21..=23 | 0..=1 => Some(TimePreference::Night),
        _ => None,
    }
}

/// One participant's intervals, sorted by start, with a running maximum of
/// interval ends so containment checks are a binary search.
#[derive(Debug, Clone)]
struct ParticipantProfile {
    day_preference: Option<DayPreference>,
    time_preference: Option<TimePreference>,
    starts: Vec<DateTime<Utc>>,
    max_end_so_far: Vec<DateTime<Utc>>,
}

impl ParticipantProfile {
    fn covers(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        let eligible = self.starts.partition_point(|s| *s <= start);
        eligible > 0 && self.max_end_so_far[eligible - 1] >= end
    }

    fn has_preference(&self) -> bool {
        self.day_preference.is_some() || self.time_preference.is_some()
    }

    /// Each stated axis must agree; unstated axes are ignored.
    fn matches(&self, day: DayPreference, time: Option<TimePreference>) -> bool {
        let day_ok = self.day_preference.map_or(true, |pref| pref == day);
        let time_ok = self.time_preference.map_or(true, |pref| Some(pref) == time);
        day_ok && time_ok
    }
}

#[derive(Debug, Clone, Default)]
pub struct PreferenceScorer {
    participants: BTreeMap<ParticipantId, ParticipantProfile>,
}

impl PreferenceScorer {
    pub fn new(intervals: &[NormalizedInterval]) -> Self {
        let mut grouped: BTreeMap<ParticipantId, Vec<&NormalizedInterval>> = BTreeMap::new();
        for interval in intervals {
            grouped.entry(interval.participant).or_default().push(interval);
        }

        let participants = grouped
            .into_iter()
            .map(|(participant, mut owned)| {
                owned.sort_by_key(|interval| interval.start);

                let mut max_end_so_far = Vec::with_capacity(owned.len());
                for interval in &owned {
                    let running = max_end_so_far.last().map_or(interval.end, |m: &DateTime<Utc>| (*m).max(interval.end));
                    max_end_so_far.push(running);
                }

                let profile = ParticipantProfile {
                    day_preference: owned[0].day_preference,
                    time_preference: owned[0].time_preference,
                    starts: owned.iter().map(|interval| interval.start).collect(),
                    max_end_so_far,
                };
                (participant, profile)
            })
            .collect();

        Self { participants }
    }

    /// Participants with a single interval containing `[start, end]`
    pub fn covering_count(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> usize {
        self.participants
            .values()
            .filter(|profile| profile.covers(start, end))
            .count()
    }

    /// Fraction of covering, preference-expressing participants whose
    /// preferences match the window's buckets. Zero when nobody covering
    /// the window stated a preference.
    pub fn score(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
        let day = day_bucket(start);
        let time = time_bucket(start);

        let (matched, expressed) = self
            .participants
            .values()
            .filter(|profile| profile.has_preference() && profile.covers(start, end))
            .fold((0usize, 0usize), |(matched, expressed), profile| {
                let hit = usize::from(profile.matches(day, time));
                (matched + hit, expressed + 1)
            });

        if expressed == 0 {
            0.0
        } else {
            matched as f64 / expressed as f64
        }
    }
}
