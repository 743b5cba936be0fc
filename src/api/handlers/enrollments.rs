use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{Enrollment, EnrollmentAction, EnrollmentOverview},
    error::Result,
};

#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    pub course_id: String,
}

/// POST /api/enrollments
///
/// Idempotent: enrolling twice in the same course returns the existing row.
pub async fn request_enrollment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<EnrollRequest>,
) -> Result<(StatusCode, Json<Enrollment>)> {
    let enrollment = state
        .service_context
        .enrollment_service
        .request_enrollment(&user.profile, &req.course_id)
        .await?;

    Ok((StatusCode::CREATED, Json(enrollment)))
}

/// GET /api/enrollments
pub async fn my_enrollments(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<Enrollment>>> {
    let enrollments = state
        .service_context
        .enrollment_service
        .enrollments_for(user.profile.id)
        .await?;

    Ok(Json(enrollments))
}

/// GET /api/enrollments/course/:course_id
///
/// `null` body means the user has never enrolled in this course.
pub async fn my_enrollment_for_course(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(course_id): Path<String>,
) -> Result<Json<Option<Enrollment>>> {
    let enrollment = state
        .service_context
        .enrollment_service
        .enrollment_for_course(user.profile.id, &course_id)
        .await?;

    Ok(Json(enrollment))
}

/// POST /api/enrollments/:id/reapply
///
/// The one transition a non-admin may perform, and only on their own
/// rejected enrollment.
pub async fn reapply(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Enrollment>> {
    let enrollment = state
        .service_context
        .enrollment_service
        .transition(id, EnrollmentAction::Reapply, &user.profile, user.is_admin)
        .await?;

    Ok(Json(enrollment))
}

/// GET /api/admin/enrollments
pub async fn roster(State(state): State<AppState>) -> Result<Json<Vec<EnrollmentOverview>>> {
    let roster = state.service_context.enrollment_service.roster().await?;

    Ok(Json(roster))
}

async fn admin_transition(
    state: AppState,
    user: CurrentUser,
    id: Uuid,
    action: EnrollmentAction,
) -> Result<Json<Enrollment>> {
    let enrollment = state
        .service_context
        .enrollment_service
        .transition(id, action, &user.profile, user.is_admin)
        .await?;

    Ok(Json(enrollment))
}

/// POST /api/admin/enrollments/:id/approve
pub async fn approve(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Enrollment>> {
    admin_transition(state, user, id, EnrollmentAction::Approve).await
}

/// POST /api/admin/enrollments/:id/reject
pub async fn reject(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Enrollment>> {
    admin_transition(state, user, id, EnrollmentAction::Reject).await
}

/// POST /api/admin/enrollments/:id/revoke
pub async fn revoke(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Enrollment>> {
    admin_transition(state, user, id, EnrollmentAction::Revoke).await
}

/// POST /api/admin/enrollments/:id/reopen
pub async fn reopen(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Enrollment>> {
    admin_transition(state, user, id, EnrollmentAction::Reopen).await
}
