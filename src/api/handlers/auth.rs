use axum::{extract::State, http::StatusCode, Extension, Json};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    auth,
    auth::view::{reduce, AuthEvent, AuthView},
    domain::{Profile, SignupRequest},
    error::{AppError, Result},
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub profile: Profile,
    pub is_admin: bool,
}

pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<SignupRequest>,
) -> Result<(CookieJar, (StatusCode, Json<SessionResponse>))> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if state
        .service_context
        .profile_repo
        .find_by_email(&request.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = auth::AuthService::hash_password(&request.password).await?;
    let profile = state
        .service_context
        .profile_repo
        .create(&request, &password_hash)
        .await?;

    let (_session, token) = state
        .service_context
        .auth_service
        .create_session(profile.id, state.settings.auth.session_duration_hours)
        .await?;

    let cookie = state
        .service_context
        .auth_service
        .create_session_cookie(&token, false);

    let is_admin = state.service_context.admin_policy.is_admin(&profile);

    Ok((
        jar.add(cookie),
        (
            StatusCode::CREATED,
            Json(SessionResponse { profile, is_admin }),
        ),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let password_hash = auth::get_password_hash(&state.service_context.db_pool, &req.email)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    if !auth::AuthService::verify_password(&req.password, &password_hash).await? {
        return Err(AppError::Unauthenticated);
    }

    let profile = auth::get_profile_by_email(&state.service_context.db_pool, &req.email)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    let (_session, token) = state
        .service_context
        .auth_service
        .create_session(profile.id, state.settings.auth.session_duration_hours)
        .await?;

    let cookie = state
        .service_context
        .auth_service
        .create_session_cookie(&token, false);

    let is_admin = state.service_context.admin_policy.is_admin(&profile);

    Ok((jar.add(cookie), Json(SessionResponse { profile, is_admin })))
}

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode)> {
    if let Some(session_cookie) = jar.get("session") {
        let _ = state
            .service_context
            .auth_service
            .invalidate_session(session_cookie.value())
            .await;
    }

    let jar = jar.add(auth::AuthService::create_logout_cookie());

    Ok((jar, StatusCode::NO_CONTENT))
}

pub async fn me(Extension(user): Extension<CurrentUser>) -> Json<SessionResponse> {
    Json(SessionResponse {
        profile: user.profile,
        is_admin: user.is_admin,
    })
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    #[validate(length(min = 8, message = "New password must be at least 8 characters"))]
    pub new_password: String,
}

/// PUT /api/password
///
/// Changing the password drops every existing session for the account and
/// hands back a fresh cookie, so stolen sessions die with the old password.
pub async fn change_password(
    State(state): State<AppState>,
    jar: CookieJar,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<(CookieJar, StatusCode)> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let password_hash =
        auth::get_password_hash(&state.service_context.db_pool, &user.profile.email)
            .await?
            .ok_or(AppError::Unauthenticated)?;

    if !auth::AuthService::verify_password(&req.current_password, &password_hash).await? {
        return Err(AppError::Unauthenticated);
    }

    let new_hash = auth::AuthService::hash_password(&req.new_password).await?;
    auth::set_password_hash(&state.service_context.db_pool, user.profile.id, &new_hash).await?;

    state
        .service_context
        .auth_service
        .invalidate_sessions_for(user.profile.id)
        .await?;

    let (_session, token) = state
        .service_context
        .auth_service
        .create_session(user.profile.id, state.settings.auth.session_duration_hours)
        .await?;

    let cookie = state
        .service_context
        .auth_service
        .create_session_cookie(&token, false);

    Ok((jar.add(cookie), StatusCode::NO_CONTENT))
}

#[derive(Debug, Deserialize)]
pub struct ViewStateRequest {
    #[serde(flatten)]
    pub view: AuthView,
    #[serde(flatten)]
    pub event: AuthEvent,
}

/// Pure view-state reducer for the auth form; lets the frontend drive view
/// switches through one validated transition function.
pub async fn view_state(Json(req): Json<ViewStateRequest>) -> Json<AuthView> {
    Json(reduce(req.view, req.event))
}
