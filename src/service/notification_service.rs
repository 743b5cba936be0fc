use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    domain::recency::{is_recent, new_badge_window},
    domain::{
        Announcement, Enrollment, EnrollmentStatus, Notification, Profile, TargetGroup,
    },
    error::Result,
    repository::{AnnouncementRepository, EnrollmentRepository},
};

/// Computes the dashboard feed for one user: active announcements filtered by
/// their audience selector, newest first, with a synthetic welcome item for
/// accounts younger than 24 hours.
pub struct NotificationService {
    announcement_repo: Arc<dyn AnnouncementRepository>,
    enrollment_repo: Arc<dyn EnrollmentRepository>,
}

impl NotificationService {
    pub fn new(
        announcement_repo: Arc<dyn AnnouncementRepository>,
        enrollment_repo: Arc<dyn EnrollmentRepository>,
    ) -> Self {
        Self {
            announcement_repo,
            enrollment_repo,
        }
    }

    pub async fn feed_for(&self, profile: &Profile) -> Result<Vec<Notification>> {
        let announcements = self.announcement_repo.list_active().await?;
        let enrollments = self.enrollment_repo.list_by_user(profile.id).await?;
        Ok(resolve_feed(announcements, &enrollments, profile, Utc::now()))
    }
}

/// Pure audience resolution. A user with no enrollment rows is simply "not
/// registered"; unrecognized selectors hide the announcement (fail closed).
pub fn resolve_feed(
    announcements: Vec<Announcement>,
    enrollments: &[Enrollment],
    profile: &Profile,
    now: DateTime<Utc>,
) -> Vec<Notification> {
    let active_courses: HashSet<&str> = enrollments
        .iter()
        .filter(|e| e.status == EnrollmentStatus::Active)
        .map(|e| e.course_id.as_str())
        .collect();
    let registered = !active_courses.is_empty();

    let mut feed: Vec<Notification> = announcements
        .into_iter()
        .filter(|a| match &a.target {
            TargetGroup::All => true,
            TargetGroup::Registered => registered,
            TargetGroup::NotRegistered => !registered,
            TargetGroup::Course(key) => active_courses.contains(key.as_str()),
            TargetGroup::Unknown(_) => false,
        })
        .map(Notification::Broadcast)
        .collect();

    // Stable sort: equal timestamps keep their stored order.
    feed.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

    if is_recent(Some(profile.created_at), new_badge_window(), now) {
        feed.insert(
            0,
            Notification::Welcome {
                title: "Welcome aboard".to_string(),
                message: format!(
                    "Glad to have you with us, {}. Browse the course catalog to begin.",
                    profile.full_name
                ),
                created_at: now,
            },
        );
    }

    feed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Severity;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn profile(created_at: DateTime<Utc>) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            email: "pilot@example.com".to_string(),
            full_name: "Test Pilot".to_string(),
            rank: "Cadet".to_string(),
            created_at,
            updated_at: created_at,
        }
    }

    fn enrollment(user_id: Uuid, course: &str, status: EnrollmentStatus) -> Enrollment {
        Enrollment {
            id: Uuid::new_v4(),
            user_id,
            user_email: "pilot@example.com".to_string(),
            user_name: "Test Pilot".to_string(),
            course_id: course.to_string(),
            status,
            created_at: t0() - Duration::days(3),
            updated_at: t0() - Duration::days(3),
        }
    }

    fn announcement(title: &str, target: &str, created_at: DateTime<Utc>) -> Announcement {
        Announcement {
            id: Uuid::new_v4(),
            title: title.to_string(),
            message: "msg".to_string(),
            severity: Severity::Info,
            target: TargetGroup::parse(target),
            is_active: true,
            created_at,
        }
    }

    fn titles(feed: &[Notification]) -> Vec<String> {
        feed.iter()
            .map(|n| match n {
                Notification::Welcome { title, .. } => title.clone(),
                Notification::Broadcast(a) => a.title.clone(),
            })
            .collect()
    }

    #[test]
    fn targets_filter_by_active_enrollment() {
        let user = profile(t0() - Duration::days(30));
        let enrollments = vec![enrollment(user.id, "aerogenesis", EnrollmentStatus::Active)];
        let announcements = vec![
            announcement("all", "all", t0()),
            announcement("registered", "registered", t0()),
            announcement("not_registered", "not_registered", t0()),
            announcement("course", "course:aerogenesis", t0()),
        ];

        let feed = resolve_feed(announcements, &enrollments, &user, t0());
        assert_eq!(titles(&feed), vec!["all", "registered", "course"]);
    }

    #[test]
    fn pending_enrollment_does_not_count_as_registered() {
        let user = profile(t0() - Duration::days(30));
        let enrollments = vec![enrollment(user.id, "aerogenesis", EnrollmentStatus::Pending)];
        let announcements = vec![
            announcement("registered", "registered", t0()),
            announcement("not_registered", "not_registered", t0()),
            announcement("course", "course:aerogenesis", t0()),
        ];

        let feed = resolve_feed(announcements, &enrollments, &user, t0());
        assert_eq!(titles(&feed), vec!["not_registered"]);
    }

    #[test]
    fn unknown_selector_is_hidden() {
        let user = profile(t0() - Duration::days(30));
        let announcements = vec![
            announcement("weird", "vip_only", t0()),
            announcement("all", "all", t0()),
        ];

        let feed = resolve_feed(announcements, &[], &user, t0());
        assert_eq!(titles(&feed), vec!["all"]);
    }

    #[test]
    fn sorted_newest_first() {
        let user = profile(t0() - Duration::days(30));
        let announcements = vec![
            announcement("older", "all", t0() - Duration::hours(5)),
            announcement("newer", "all", t0() - Duration::hours(1)),
        ];

        let feed = resolve_feed(announcements, &[], &user, t0());
        assert_eq!(titles(&feed), vec!["newer", "older"]);
    }

    #[test]
    fn fresh_account_gets_welcome_item_first() {
        let user = profile(t0() - Duration::hours(1));
        let announcements = vec![
            announcement("all", "all", t0()),
            announcement("not_registered", "not_registered", t0()),
        ];

        let feed = resolve_feed(announcements, &[], &user, t0());
        let titles = titles(&feed);
        assert_eq!(titles[0], "Welcome aboard");
        assert_eq!(&titles[1..], &["all", "not_registered"]);
    }

    #[test]
    fn older_account_gets_no_welcome_item() {
        let user = profile(t0() - Duration::hours(40));
        let feed = resolve_feed(vec![announcement("all", "all", t0())], &[], &user, t0());
        assert_eq!(titles(&feed), vec!["all"]);
    }

    #[test]
    fn no_enrollment_data_means_not_registered() {
        let user = profile(t0() - Duration::days(30));
        let announcements = vec![
            announcement("registered", "registered", t0()),
            announcement("not_registered", "not_registered", t0()),
        ];

        let feed = resolve_feed(announcements, &[], &user, t0());
        assert_eq!(titles(&feed), vec!["not_registered"]);
    }
}
