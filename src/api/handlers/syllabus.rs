use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::state::AppState,
    domain::{find_course, CreateSyllabusItemRequest, SyllabusItem},
    error::{AppError, Result},
};

/// POST /api/admin/courses/:key/syllabus
pub async fn create(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<CreateSyllabusItemRequest>,
) -> Result<(StatusCode, Json<SyllabusItem>)> {
    if find_course(&key).is_none() {
        return Err(AppError::NotFound(format!("Unknown course: {}", key)));
    }
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let item = state
        .service_context
        .syllabus_repo
        .create(SyllabusItem {
            id: Uuid::new_v4(),
            course_id: key,
            week_label: req.week_label,
            title: req.title,
            description: req.description,
            order_index: req.order_index,
            created_at: Utc::now(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// DELETE /api/admin/syllabus/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    state.service_context.syllabus_repo.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
