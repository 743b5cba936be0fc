use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{
    api::state::AppState,
    domain::Profile,
    error::AppError,
};

/// The authenticated caller, resolved once per request and threaded through
/// handler signatures as an extension. Handlers and services never reach for
/// ambient session state.
#[derive(Clone)]
pub struct CurrentUser {
    pub profile: Profile,
    pub is_admin: bool,
}

async fn resolve_user(state: &AppState, jar: &CookieJar) -> Result<CurrentUser, AppError> {
    let session_cookie = jar.get("session").ok_or(AppError::Unauthenticated)?;

    let session = state
        .service_context
        .auth_service
        .validate_session(session_cookie.value())
        .await?
        .ok_or(AppError::Unauthenticated)?;

    let profile = state
        .service_context
        .profile_repo
        .find_by_id(session.profile_id)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    let is_admin = state.service_context.admin_policy.is_admin(&profile);

    Ok(CurrentUser { profile, is_admin })
}

pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = resolve_user(&state, &jar).await?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

pub async fn require_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = resolve_user(&state, &jar).await?;

    if !user.is_admin {
        return Err(AppError::Forbidden);
    }

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
