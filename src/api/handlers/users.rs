use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::recency::{admin_highlight_window, is_recent},
    domain::{Enrollment, Profile, ProfileOverview, UpdateRankRequest, RANKS},
    error::{AppError, Result},
};

/// GET /api/admin/users
///
/// Every account, newest first, joined with its enrollments and a highlight
/// for accounts created in the last 48 hours.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProfileOverview>>> {
    let now = Utc::now();
    let profiles = state.service_context.profile_repo.list().await?;
    let enrollments = state.service_context.enrollment_repo.list_all().await?;

    let mut by_user: HashMap<Uuid, Vec<Enrollment>> = HashMap::new();
    for enrollment in enrollments {
        by_user.entry(enrollment.user_id).or_default().push(enrollment);
    }

    let overviews = profiles
        .into_iter()
        .map(|profile| {
            let is_new = is_recent(Some(profile.created_at), admin_highlight_window(), now);
            let enrollments = by_user.remove(&profile.id).unwrap_or_default();
            ProfileOverview {
                profile,
                enrollments,
                is_new,
            }
        })
        .collect();

    Ok(Json(overviews))
}

/// PUT /api/admin/users/:id/rank
pub async fn update_rank(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRankRequest>,
) -> Result<Json<Profile>> {
    if !req.is_known_rank() {
        return Err(AppError::Validation(format!(
            "Unknown rank. Expected one of: {}",
            RANKS.join(", ")
        )));
    }

    let profile = state
        .service_context
        .profile_repo
        .update_rank(id, &req.rank)
        .await?;

    Ok(Json(profile))
}

/// DELETE /api/admin/users/:id
///
/// Admins cannot delete their own account.
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    if user.profile.id == id {
        return Err(AppError::Validation(
            "Cannot delete your own account".to_string(),
        ));
    }

    state
        .service_context
        .auth_service
        .invalidate_sessions_for(id)
        .await?;
    state.service_context.profile_repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
