use axum::{extract::State, Extension, Json};

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::Notification,
    error::Result,
};

/// GET /api/notifications
pub async fn feed(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<Notification>>> {
    let feed = state
        .service_context
        .notification_service
        .feed_for(&user.profile)
        .await?;

    Ok(Json(feed))
}
