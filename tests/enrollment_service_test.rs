use std::sync::Arc;

use aeroportal::{
    auth::AuthService,
    domain::{EnrollmentAction, EnrollmentStatus, Profile, SignupRequest},
    error::AppError,
    repository::{ProfileRepository, SqliteEnrollmentRepository, SqliteProfileRepository},
    service::EnrollmentService,
};
use sqlx::SqlitePool;

async fn setup() -> anyhow::Result<(EnrollmentService, Profile, Profile)> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let profile_repo = SqliteProfileRepository::new(pool.clone());
    let hash = AuthService::hash_password("password123").await?;

    let student = profile_repo
        .create(
            &SignupRequest {
                email: "student@example.com".to_string(),
                password: "password123".to_string(),
                full_name: "Test Student".to_string(),
            },
            &hash,
        )
        .await?;
    let admin = profile_repo
        .create(
            &SignupRequest {
                email: "admin@example.com".to_string(),
                password: "password123".to_string(),
                full_name: "Test Admin".to_string(),
            },
            &hash,
        )
        .await?;

    let service = EnrollmentService::new(Arc::new(SqliteEnrollmentRepository::new(pool)));

    Ok((service, student, admin))
}

#[tokio::test]
async fn full_lifecycle_through_admin_actions() -> anyhow::Result<()> {
    let (service, student, admin) = setup().await?;

    let enrollment = service.request_enrollment(&student, "aerogenesis").await?;
    assert_eq!(enrollment.status, EnrollmentStatus::Pending);

    let approved = service
        .transition(enrollment.id, EnrollmentAction::Approve, &admin, true)
        .await?;
    assert_eq!(approved.status, EnrollmentStatus::Active);

    let revoked = service
        .transition(enrollment.id, EnrollmentAction::Revoke, &admin, true)
        .await?;
    assert_eq!(revoked.status, EnrollmentStatus::Pending);

    let rejected = service
        .transition(enrollment.id, EnrollmentAction::Reject, &admin, true)
        .await?;
    assert_eq!(rejected.status, EnrollmentStatus::Rejected);

    let reopened = service
        .transition(enrollment.id, EnrollmentAction::Reopen, &admin, true)
        .await?;
    assert_eq!(reopened.status, EnrollmentStatus::Pending);

    Ok(())
}

#[tokio::test]
async fn transitions_from_the_wrong_status_are_rejected() -> anyhow::Result<()> {
    let (service, student, admin) = setup().await?;

    let enrollment = service.request_enrollment(&student, "aerogenesis").await?;
    service
        .transition(enrollment.id, EnrollmentAction::Approve, &admin, true)
        .await?;

    // Already active; approving again is not a valid edge
    let result = service
        .transition(enrollment.id, EnrollmentAction::Approve, &admin, true)
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    // Reopen only applies to rejected enrollments
    let result = service
        .transition(enrollment.id, EnrollmentAction::Reopen, &admin, true)
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    Ok(())
}

#[tokio::test]
async fn admin_actions_require_an_admin_caller() -> anyhow::Result<()> {
    let (service, student, _admin) = setup().await?;

    let enrollment = service.request_enrollment(&student, "aerogenesis").await?;

    let result = service
        .transition(enrollment.id, EnrollmentAction::Approve, &student, false)
        .await;
    assert!(matches!(result, Err(AppError::Forbidden)));

    Ok(())
}

#[tokio::test]
async fn reapply_is_limited_to_the_owning_user() -> anyhow::Result<()> {
    let (service, student, admin) = setup().await?;

    let enrollment = service.request_enrollment(&student, "mentorship").await?;
    service
        .transition(enrollment.id, EnrollmentAction::Reject, &admin, true)
        .await?;

    // A different user cannot reapply on someone else's enrollment
    let result = service
        .transition(enrollment.id, EnrollmentAction::Reapply, &admin, false)
        .await;
    assert!(matches!(result, Err(AppError::Forbidden)));

    let reapplied = service
        .transition(enrollment.id, EnrollmentAction::Reapply, &student, false)
        .await?;
    assert_eq!(reapplied.status, EnrollmentStatus::Pending);
    assert_eq!(reapplied.created_at, enrollment.created_at);

    Ok(())
}

#[tokio::test]
async fn unknown_courses_cannot_be_requested() -> anyhow::Result<()> {
    let (service, student, _admin) = setup().await?;

    let result = service.request_enrollment(&student, "astrogation").await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let result = service.request_enrollment(&student, "").await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    Ok(())
}

#[tokio::test]
async fn missing_enrollment_reads_as_not_enrolled() -> anyhow::Result<()> {
    let (service, student, _admin) = setup().await?;

    let standing = service
        .standing_for_course(student.id, "aerogenesis")
        .await?;
    assert_eq!(standing, aeroportal::domain::CourseStanding::NotEnrolled);

    Ok(())
}
