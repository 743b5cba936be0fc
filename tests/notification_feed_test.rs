use std::sync::Arc;

use aeroportal::{
    auth::AuthService,
    domain::{
        Announcement, EnrollmentStatus, Notification, Severity, SignupRequest, TargetGroup,
    },
    repository::{
        AnnouncementRepository, EnrollmentRepository, ProfileRepository,
        SqliteAnnouncementRepository, SqliteEnrollmentRepository, SqliteProfileRepository,
    },
    service::NotificationService,
};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

fn announcement(title: &str, target: TargetGroup) -> Announcement {
    Announcement {
        id: Uuid::new_v4(),
        title: title.to_string(),
        message: "body".to_string(),
        severity: Severity::Info,
        target,
        is_active: true,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn feed_reflects_enrollment_and_deactivation() -> anyhow::Result<()> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let profile_repo = SqliteProfileRepository::new(pool.clone());
    let announcement_repo = Arc::new(SqliteAnnouncementRepository::new(pool.clone()));
    let enrollment_repo = Arc::new(SqliteEnrollmentRepository::new(pool.clone()));

    let hash = AuthService::hash_password("password123").await?;
    let profile = profile_repo
        .create(
            &SignupRequest {
                email: "student@example.com".to_string(),
                password: "password123".to_string(),
                full_name: "Test Student".to_string(),
            },
            &hash,
        )
        .await?;

    let enrollment = enrollment_repo.upsert_pending(&profile, "aerogenesis").await?;
    enrollment_repo
        .update_status(enrollment.id, EnrollmentStatus::Active)
        .await?;

    announcement_repo
        .create(announcement("for everyone", TargetGroup::All))
        .await?;
    announcement_repo
        .create(announcement(
            "for my course",
            TargetGroup::Course("aerogenesis".to_string()),
        ))
        .await?;
    announcement_repo
        .create(announcement(
            "for another course",
            TargetGroup::Course("mentorship".to_string()),
        ))
        .await?;
    let muted = announcement_repo
        .create(announcement("soon muted", TargetGroup::All))
        .await?;
    announcement_repo.set_active(muted.id, false).await?;

    let service = NotificationService::new(announcement_repo.clone(), enrollment_repo);
    let feed = service.feed_for(&profile).await?;

    let titles: Vec<&str> = feed
        .iter()
        .filter_map(|n| match n {
            Notification::Broadcast(a) => Some(a.title.as_str()),
            Notification::Welcome { .. } => None,
        })
        .collect();

    assert!(titles.contains(&"for everyone"));
    assert!(titles.contains(&"for my course"));
    assert!(!titles.contains(&"for another course"));
    assert!(!titles.contains(&"soon muted"));

    // The account was just created, so the welcome item leads the feed
    assert!(matches!(feed.first(), Some(Notification::Welcome { .. })));

    Ok(())
}
