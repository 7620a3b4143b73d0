//! Response-rate reporting

use std::collections::HashSet;

use crate::models::AvailabilitySubmission;

/// Number of distinct submissions, by id
pub fn response_count(submissions: &[AvailabilitySubmission]) -> usize {
    submissions
        .iter()
        .map(|submission| submission.id)
        .collect::<HashSet<_>>()
        .len()
}

/// `responses / expected`, unclamped. A rate above 1 means more people
/// answered than the organizer expected and is reported as-is.
pub fn participation_rate(expected: u32, responses: usize) -> f64 {
    if expected == 0 {
        return 0.0;
    }
    responses as f64 / f64::from(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate() {
        assert_eq!(participation_rate(4, 0), 0.0);
        assert_eq!(participation_rate(4, 2), 0.5);
        assert_eq!(participation_rate(2, 3), 1.5);
        assert_eq!(participation_rate(0, 3), 0.0);
    }
}
