use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{ContactRequest, CreateMessageRequest, SupportMessage},
    error::{AppError, Result},
};

/// POST /api/messages
///
/// Dashboard support form; sender identity comes from the session.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateMessageRequest>,
) -> Result<(StatusCode, Json<SupportMessage>)> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let message = state
        .service_context
        .message_repo
        .create(SupportMessage {
            id: Uuid::new_v4(),
            profile_id: Some(user.profile.id),
            sender_name: user.profile.full_name.clone(),
            sender_email: user.profile.email.clone(),
            inquiry_type: format!("Support: {}", req.subject),
            body: req.body,
            created_at: Utc::now(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

/// POST /public/contact
///
/// Landing-page contact form; no session, the sender identifies themselves
/// in the body.
pub async fn contact(
    State(state): State<AppState>,
    Json(req): Json<ContactRequest>,
) -> Result<(StatusCode, Json<SupportMessage>)> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let message = state
        .service_context
        .message_repo
        .create(SupportMessage {
            id: Uuid::new_v4(),
            profile_id: None,
            sender_name: req.name,
            sender_email: req.email,
            inquiry_type: req.inquiry_type,
            body: req.message,
            created_at: Utc::now(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/admin/messages
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<SupportMessage>>> {
    let messages = state.service_context.message_repo.list_all().await?;

    Ok(Json(messages))
}
