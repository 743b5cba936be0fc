use aeroportal::{
    auth::AuthService,
    domain::{EnrollmentStatus, Profile, SignupRequest},
    repository::{
        EnrollmentRepository, ProfileRepository, SqliteEnrollmentRepository,
        SqliteProfileRepository,
    },
};
use sqlx::SqlitePool;

async fn setup() -> anyhow::Result<(SqlitePool, Profile)> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let profile_repo = SqliteProfileRepository::new(pool.clone());
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

    Ok((pool, profile))
}

#[tokio::test]
async fn upsert_is_idempotent_per_user_and_course() -> anyhow::Result<()> {
    let (pool, profile) = setup().await?;
    let repo = SqliteEnrollmentRepository::new(pool);

    let first = repo.upsert_pending(&profile, "aerogenesis").await?;
    assert_eq!(first.status, EnrollmentStatus::Pending);
    assert_eq!(first.user_email, "student@example.com");

    // A second request returns the same row, not a duplicate
    let second = repo.upsert_pending(&profile, "aerogenesis").await?;
    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);

    let all = repo.list_by_user(profile.id).await?;
    assert_eq!(all.len(), 1);

    Ok(())
}

#[tokio::test]
async fn upsert_does_not_reset_an_existing_status() -> anyhow::Result<()> {
    let (pool, profile) = setup().await?;
    let repo = SqliteEnrollmentRepository::new(pool);

    let enrollment = repo.upsert_pending(&profile, "aerogenesis").await?;
    repo.update_status(enrollment.id, EnrollmentStatus::Active)
        .await?;

    let after = repo.upsert_pending(&profile, "aerogenesis").await?;
    assert_eq!(after.id, enrollment.id);
    assert_eq!(after.status, EnrollmentStatus::Active);

    Ok(())
}

#[tokio::test]
async fn update_status_keeps_created_at() -> anyhow::Result<()> {
    let (pool, profile) = setup().await?;
    let repo = SqliteEnrollmentRepository::new(pool);

    let enrollment = repo.upsert_pending(&profile, "mentorship").await?;
    let updated = repo
        .update_status(enrollment.id, EnrollmentStatus::Rejected)
        .await?;

    assert_eq!(updated.status, EnrollmentStatus::Rejected);
    assert_eq!(updated.created_at, enrollment.created_at);
    assert!(updated.updated_at >= enrollment.updated_at);

    Ok(())
}

#[tokio::test]
async fn separate_courses_get_separate_rows() -> anyhow::Result<()> {
    let (pool, profile) = setup().await?;
    let repo = SqliteEnrollmentRepository::new(pool);

    repo.upsert_pending(&profile, "aerogenesis").await?;
    repo.upsert_pending(&profile, "mentorship").await?;

    let all = repo.list_by_user(profile.id).await?;
    assert_eq!(all.len(), 2);

    let found = repo
        .find_by_user_and_course(profile.id, "mentorship")
        .await?;
    assert!(found.is_some());
    assert_eq!(found.unwrap().course_id, "mentorship");

    Ok(())
}
