//! End-to-end engine scenarios
//!
//! Runs the pure engine entry point over hand-built submission sets.

mod helpers;

use helpers::*;
use meetsmart::config::EngineConfig;
use meetsmart::models::{DayPreference, TimePreference};
use meetsmart::recommend;
use meetsmart::utils::SlotError;

#[test]
fn test_identical_slots_single_candidate() {
    init_test_env();
    let event = test_event(60, 3);
    let subs: Vec<_> = ["Ada", "Grace", "Linus"]
        .iter()
        .map(|name| test_submission(event.id, name, vec![slot(20, (10, 0), (11, 0))]))
        .collect();

    let rec = recommend(&event, &subs, &EngineConfig::default());

    assert_eq!(rec.candidates.len(), 1);
    let only = &rec.candidates[0];
    assert_eq!(only.start, at(20, 10, 0));
    assert_eq!(only.end, at(20, 11, 0));
    assert_eq!(only.coverage_count, 3);
    assert_eq!(rec.participation_rate, 1.0);
}

#[test]
fn test_partial_overlap_prefers_shared_half_hour() {
    init_test_env();
    let event = test_event(30, 2);
    let subs = vec![
        test_submission(event.id, "Ada", vec![slot(21, (9, 0), (10, 0))]),
        test_submission(event.id, "Grace", vec![slot(21, (9, 30), (10, 30))]),
    ];

    let rec = recommend(&event, &subs, &EngineConfig::default());

    let best = rec.best().expect("a candidate");
    assert_eq!(best.start, at(21, 9, 30));
    assert_eq!(best.end, at(21, 10, 0));
    assert_eq!(best.coverage_count, 2);
    assert!(rec.candidates[1..].iter().all(|c| c.coverage_count == 1));
}

#[test]
fn test_late_night_window_reaches_midnight() {
    init_test_env();
    let event = test_event(60, 2);
    let subs = vec![
        test_submission(event.id, "Ada", vec![slot(21, (22, 0), (0, 0))]),
        test_submission(event.id, "Grace", vec![slot(21, (23, 0), (0, 0))]),
    ];

    let rec = recommend(&event, &subs, &EngineConfig::default());

    assert!(rec.rejected_slots.is_empty());
    let best = rec.best().expect("a candidate");
    assert_eq!(best.start, at(21, 23, 0));
    assert_eq!(best.end, at(22, 0, 0));
    assert_eq!(best.coverage_count, 2);
}

#[test]
fn test_no_submissions() {
    init_test_env();
    let rec = recommend(&test_event(60, 4), &[], &EngineConfig::default());

    assert!(rec.candidates.is_empty());
    assert!(rec.best_times().is_empty());
    assert_eq!(rec.response_count, 0);
    assert_eq!(rec.participation_rate, 0.0);
}

#[test]
fn test_short_slot_excluded_but_counted() {
    init_test_env();
    let event = test_event(60, 2);
    let subs = vec![
        test_submission(event.id, "Ada", vec![slot(21, (10, 0), (11, 0))]),
        test_submission(event.id, "Grace", vec![slot(21, (10, 0), (10, 30))]),
    ];

    let rec = recommend(&event, &subs, &EngineConfig::default());

    assert_eq!(rec.candidates.len(), 1);
    assert_eq!(rec.candidates[0].coverage_count, 1);
    assert_eq!(rec.rejected_slots.len(), 1);
    assert_eq!(rec.rejected_slots[0].participant_name, "Grace");
    assert_eq!(rec.rejected_slots[0].reason, SlotError::ShorterThanDuration);
    assert_eq!(rec.response_count, 2);
    assert_eq!(rec.participation_rate, 1.0);
}

#[test]
fn test_malformed_slots_reported_individually() {
    init_test_env();
    let event = test_event(60, 1);
    let subs = vec![test_submission(
        event.id,
        "Ada",
        vec![
            slot(21, (11, 0), (10, 0)),
            slot(26, (9, 0), (12, 0)),
            slot(22, (14, 0), (16, 0)),
        ],
    )];

    let rec = recommend(&event, &subs, &EngineConfig::default());

    let reasons: Vec<_> = rec.rejected_slots.iter().map(|r| (r.slot_index, r.reason)).collect();
    assert_eq!(
        reasons,
        vec![(0, SlotError::EndNotAfterStart), (1, SlotError::OutsideEventBounds)]
    );
    assert_eq!(rec.candidates[0].start, at(22, 14, 0));
}

#[test]
fn test_touching_slots_do_not_overlap() {
    init_test_env();
    let event = test_event(30, 2);
    let subs = vec![
        test_submission(event.id, "Ada", vec![slot(21, (9, 0), (10, 0))]),
        test_submission(event.id, "Grace", vec![slot(21, (10, 0), (11, 0))]),
    ];

    let rec = recommend(&event, &subs, &EngineConfig { max_candidates: 10, allow_overlapping: true });

    assert!(!rec.candidates.is_empty());
    assert!(rec.candidates.iter().all(|c| c.coverage_count == 1));
}

#[test]
fn test_overlapping_slots_of_one_participant_count_once() {
    init_test_env();
    let event = test_event(60, 1);
    let subs = vec![test_submission(
        event.id,
        "Ada",
        vec![slot(21, (9, 0), (11, 0)), slot(21, (10, 0), (12, 0))],
    )];

    let rec = recommend(&event, &subs, &EngineConfig { max_candidates: 10, allow_overlapping: true });

    assert!(rec.candidates.iter().all(|c| c.coverage_count == 1));
}

#[test]
fn test_window_must_fit_inside_one_slot() {
    init_test_env();
    let event = test_event(60, 2);
    // Union 09:00-11:00, but neither slot alone holds 09:30-10:30 for Grace
    let subs = vec![
        test_submission(event.id, "Ada", vec![slot(21, (9, 0), (11, 0))]),
        test_submission(event.id, "Grace", vec![slot(21, (9, 0), (10, 0)), slot(21, (10, 0), (11, 0))]),
    ];

    let rec = recommend(&event, &subs, &EngineConfig { max_candidates: 10, allow_overlapping: true });

    for candidate in &rec.candidates {
        let expected = if candidate.start == at(21, 9, 0) || candidate.start == at(21, 10, 0) { 2 } else { 1 };
        assert_eq!(candidate.coverage_count, expected, "window {}", candidate.window_label());
    }
    assert_eq!(rec.best().unwrap().start, at(21, 9, 0));
}

#[test]
fn test_preferences_break_coverage_ties() {
    init_test_env();
    let event = test_event(60, 2);
    let subs = vec![
        with_preferences(
            test_submission(event.id, "Ada", vec![slot(19, (10, 0), (11, 0))]),
            Some(DayPreference::Weekdays),
            None,
        ),
        with_preferences(
            test_submission(event.id, "Grace", vec![slot(21, (18, 0), (19, 0))]),
            Some(DayPreference::Weekdays),
            Some(TimePreference::Evening),
        ),
    ];

    let rec = recommend(&event, &subs, &EngineConfig::default());

    assert_eq!(rec.candidates.len(), 2);
    assert_eq!(rec.candidates[0].start, at(21, 18, 0));
    assert_eq!(rec.candidates[0].preference_ratio, 1.0);
    assert_eq!(rec.candidates[1].start, at(19, 10, 0));
    assert_eq!(rec.candidates[1].preference_ratio, 0.0);
    assert!(rec.candidates[0].score > rec.candidates[1].score);
}

#[test]
fn test_equal_candidates_ordered_by_start() {
    init_test_env();
    let event = test_event(60, 3);
    let subs = vec![
        test_submission(event.id, "Ada", vec![slot(23, (15, 0), (16, 0))]),
        test_submission(event.id, "Grace", vec![slot(21, (15, 0), (16, 0))]),
        test_submission(event.id, "Linus", vec![slot(22, (15, 0), (16, 0))]),
    ];

    let rec = recommend(&event, &subs, &EngineConfig::default());

    let starts: Vec<_> = rec.candidates.iter().map(|c| c.start).collect();
    assert_eq!(starts, vec![at(21, 15, 0), at(22, 15, 0), at(23, 15, 0)]);
}

#[test]
fn test_result_is_capped() {
    init_test_env();
    let event = test_event(60, 7);
    let subs: Vec<_> = (0..7)
        .map(|i| test_submission(event.id, "P", vec![slot(19 + i, (9, 0), (10, 0))]))
        .collect();

    let rec = recommend(&event, &subs, &EngineConfig::default());
    assert_eq!(rec.candidates.len(), 5);

    let rec = recommend(&event, &subs, &EngineConfig { max_candidates: 2, allow_overlapping: false });
    assert_eq!(rec.candidates.len(), 2);
}

#[test]
fn test_recommendation_is_idempotent() {
    init_test_env();
    let event = test_event(45, 3);
    let subs = vec![
        test_submission(event.id, "Ada", vec![slot(21, (9, 0), (12, 0)), slot(22, (13, 0), (17, 0))]),
        test_submission(event.id, "Grace", vec![slot(21, (10, 15), (11, 45))]),
        test_submission(event.id, "Linus", vec![slot(22, (14, 0), (15, 0))]),
    ];

    let first = recommend(&event, &subs, &EngineConfig::default());
    let second = recommend(&event, &subs, &EngineConfig::default());
    assert_eq!(first, second);
}

#[test]
fn test_covering_submission_never_lowers_top_coverage() {
    init_test_env();
    let event = test_event(60, 3);
    let mut subs = vec![
        test_submission(event.id, "Ada", vec![slot(21, (9, 0), (12, 0))]),
        test_submission(event.id, "Grace", vec![slot(21, (10, 0), (13, 0))]),
    ];

    let before = recommend(&event, &subs, &EngineConfig::default());
    let top = before.best().unwrap().clone();

    subs.push(test_submission(
        event.id,
        "Linus",
        vec![meetsmart::models::RawSlot::new(day(21), top.start.time(), top.end.time())],
    ));
    let after = recommend(&event, &subs, &EngineConfig::default());

    assert!(after.best().unwrap().coverage_count >= top.coverage_count + 1);
}

#[test]
fn test_best_times_render_labels() {
    init_test_env();
    let event = test_event(60, 1);
    let subs = vec![test_submission(event.id, "Ada", vec![slot(21, (9, 0), (10, 0))])];

    let rec = recommend(&event, &subs, &EngineConfig::default());
    let best_times = rec.best_times();

    assert_eq!(best_times.len(), 1);
    assert_eq!(best_times[0].time, "2024-10-21T09:00:00Z~2024-10-21T10:00:00Z");
    assert_eq!(best_times[0].score, 1.0);
}
