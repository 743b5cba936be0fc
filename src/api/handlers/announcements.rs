use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    api::state::AppState,
    domain::{Announcement, Severity, TargetGroup},
    error::{AppError, Result},
};

#[derive(Debug, Deserialize)]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub message: String,
    #[serde(default = "default_severity")]
    pub severity: Severity,
    #[serde(default = "default_target")]
    pub target: TargetGroup,
}

fn default_severity() -> Severity {
    Severity::Info
}

fn default_target() -> TargetGroup {
    TargetGroup::All
}

#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

/// POST /api/admin/announcements
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateAnnouncementRequest>,
) -> Result<(StatusCode, Json<Announcement>)> {
    if req.title.trim().is_empty() || req.message.trim().is_empty() {
        return Err(AppError::Validation(
            "Title and message are required".to_string(),
        ));
    }
    // Unknown selectors are hidden from every feed, so storing one would
    // create an announcement nobody can see.
    if let TargetGroup::Unknown(raw) = &req.target {
        return Err(AppError::Validation(format!(
            "Unknown target group: {}",
            raw
        )));
    }

    let announcement = state
        .service_context
        .announcement_repo
        .create(Announcement {
            id: Uuid::new_v4(),
            title: req.title,
            message: req.message,
            severity: req.severity,
            target: req.target,
            is_active: true,
            created_at: Utc::now(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(announcement)))
}

/// GET /api/admin/announcements
///
/// Includes deactivated rows; the user feed only ever sees active ones.
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Announcement>>> {
    let announcements = state.service_context.announcement_repo.list_all().await?;

    Ok(Json(announcements))
}

/// PUT /api/admin/announcements/:id/active
pub async fn set_active(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetActiveRequest>,
) -> Result<Json<Announcement>> {
    let announcement = state
        .service_context
        .announcement_repo
        .set_active(id, req.is_active)
        .await?;

    Ok(Json(announcement))
}

/// DELETE /api/admin/announcements/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.service_context.announcement_repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
