//! Availability normalization
//!
//! Turns raw wall-clock slots into UTC [`NormalizedInterval`]s. Wall-clock
//! values are taken to already be in the operating timezone; no DST
//! shifting is attempted. Sub-second components are dropped so every
//! instant the engine works with is a whole second.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use tracing::debug;

use crate::models::{AvailabilitySubmission, Event, NormalizedInterval, RawSlot, RejectedSlot};
use crate::utils::errors::SlotError;
use crate::utils::logging;

/// Result of normalizing every slot of every submission for one event
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub intervals: Vec<NormalizedInterval>,
    pub rejected: Vec<RejectedSlot>,
}

/// Validate a single slot against the event and convert it to instants.
///
/// Checks run in a fixed order: inverted or empty slot, date outside the
/// event range, then too short to host the meeting. An end time of `00:00`
/// is the midnight closing the slot's date.
pub fn normalize_slot(event: &Event, slot: &RawSlot) -> Result<(DateTime<Utc>, DateTime<Utc>), SlotError> {
    let start = to_instant(slot.date, slot.start_time);
    let end = slot_end(slot).ok_or(SlotError::EndNotAfterStart)?;

    if end <= start {
        return Err(SlotError::EndNotAfterStart);
    }

    if !event.contains_date(slot.date) {
        return Err(SlotError::OutsideEventBounds);
    }

    if end - start < event.duration() {
        return Err(SlotError::ShorterThanDuration);
    }

    Ok((start, end))
}

/// Normalize all submissions. Failures are reported per slot and never
/// abort the remaining slots of a submission.
pub fn normalize(event: &Event, submissions: &[AvailabilitySubmission]) -> Normalized {
    let mut normalized = Normalized::default();

    for submission in submissions {
        for (slot_index, slot) in submission.slots.iter().enumerate() {
            match normalize_slot(event, slot) {
                Ok((start, end)) => normalized.intervals.push(NormalizedInterval {
                    participant: submission.id,
                    start,
                    end,
                    day_preference: submission.day_preference,
                    time_preference: submission.time_preference,
                }),
                Err(reason) => {
                    logging::log_slot_rejected(submission.id, slot_index, &reason.to_string());
                    normalized.rejected.push(RejectedSlot {
                        submission_id: submission.id,
                        participant_name: submission.participant_name.clone(),
                        slot_index,
                        slot: slot.clone(),
                        reason,
                    });
                }
            }
        }
    }

    debug!(
        event_id = event.id,
        intervals = normalized.intervals.len(),
        rejected = normalized.rejected.len(),
        "Availability normalized"
    );

    normalized
}

fn slot_end(slot: &RawSlot) -> Option<DateTime<Utc>> {
    if slot.end_time.num_seconds_from_midnight() == 0 {
        return slot.date.succ_opt().map(|next| to_instant(next, NaiveTime::MIN));
    }
    Some(to_instant(slot.date, slot.end_time))
}

fn to_instant(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    let time = time.with_nanosecond(0).unwrap_or(time);
    Utc.from_utc_datetime(&date.and_time(time))
}
