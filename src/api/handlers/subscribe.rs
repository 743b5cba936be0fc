use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    api::state::AppState,
    error::{AppError, Result},
};

#[derive(Debug, Deserialize, Validate)]
pub struct SubscribeRequest {
    #[validate(email)]
    pub email: String,
}

/// POST /public/subscribe
///
/// Mailing-list signup from the public landing page. Subscribing an address
/// that is already on the list reads as success.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(req): Json<SubscribeRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let client = state
        .service_context
        .mailing_list
        .as_ref()
        .ok_or_else(|| AppError::External("Mailing list is not configured".to_string()))?;

    client.subscribe(&req.email).await?;

    Ok((StatusCode::OK, Json(json!({ "subscribed": true }))))
}
