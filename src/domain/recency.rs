use chrono::{DateTime, Duration, Utc};

use crate::domain::EnrollmentStatus;

/// Window used for "new announcement" and "new user" badges.
pub fn new_badge_window() -> Duration {
    Duration::hours(24)
}

/// Wider window used for the admin user-list highlight.
pub fn admin_highlight_window() -> Duration {
    Duration::hours(48)
}

/// True iff `timestamp` falls within `threshold` of `now`. A missing
/// timestamp is never recent.
pub fn is_recent(
    timestamp: Option<DateTime<Utc>>,
    threshold: Duration,
    now: DateTime<Utc>,
) -> bool {
    match timestamp {
        Some(t) => now.signed_duration_since(t) < threshold,
        None => false,
    }
}

/// Heuristic: a pending enrollment whose `updated_at` trails `created_at` by
/// more than a minute was most likely re-submitted after a rejection. The
/// data model keeps no transition history, only the two timestamps, so this
/// cannot distinguish a genuine reapply from any other late touch of a
/// pending row; it deliberately prefers a false positive over missing a real
/// resubmission. Missing timestamps classify as "not a resubmission".
pub fn is_likely_resubmission(
    status: EnrollmentStatus,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
) -> bool {
    if status != EnrollmentStatus::Pending {
        return false;
    }
    match (created_at, updated_at) {
        (Some(created), Some(updated)) => {
            updated.signed_duration_since(created) > Duration::seconds(60)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn recent_within_window() {
        let now = t0();
        assert!(is_recent(Some(now - Duration::hours(1)), new_badge_window(), now));
        assert!(is_recent(Some(now - Duration::hours(23)), new_badge_window(), now));
        assert!(!is_recent(Some(now - Duration::hours(40)), new_badge_window(), now));
        assert!(is_recent(Some(now - Duration::hours(40)), admin_highlight_window(), now));
        assert!(!is_recent(Some(now - Duration::hours(48)), admin_highlight_window(), now));
    }

    #[test]
    fn missing_timestamp_is_not_recent() {
        assert!(!is_recent(None, new_badge_window(), t0()));
    }

    #[test]
    fn thirty_second_gap_is_not_a_resubmission() {
        let created = t0();
        assert!(!is_likely_resubmission(
            EnrollmentStatus::Pending,
            Some(created),
            Some(created + Duration::seconds(30)),
        ));
    }

    #[test]
    fn ninety_second_gap_is_a_resubmission() {
        let created = t0();
        assert!(is_likely_resubmission(
            EnrollmentStatus::Pending,
            Some(created),
            Some(created + Duration::seconds(90)),
        ));
    }

    #[test]
    fn non_pending_is_never_a_resubmission() {
        let created = t0();
        for status in [EnrollmentStatus::Active, EnrollmentStatus::Rejected] {
            assert!(!is_likely_resubmission(
                status,
                Some(created),
                Some(created + Duration::hours(6)),
            ));
        }
    }

    #[test]
    fn missing_timestamps_fail_closed() {
        assert!(!is_likely_resubmission(EnrollmentStatus::Pending, None, Some(t0())));
        assert!(!is_likely_resubmission(EnrollmentStatus::Pending, Some(t0()), None));
    }
}
