pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};

use crate::{config::Settings, service::ServiceContext};
use state::AppState;

pub fn create_app(service_context: Arc<ServiceContext>, settings: Arc<Settings>) -> Router {
    let uploads_dir = settings.uploads.dir.clone();
    let app_state = AppState::new(service_context, settings);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))
        // Auth routes
        .nest("/auth", auth_routes(app_state.clone()))
        // Public routes (no session required)
        .nest("/public", public_routes())
        // Authenticated user routes
        .nest("/api", api_routes(app_state.clone()))
        // Admin routes
        .nest("/api/admin", admin_routes(app_state.clone()))
        // Uploaded course files are served as static content
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .with_state(app_state)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive()) // Configure properly for production
        .layer(TraceLayer::new_for_http())
}

fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/signup", post(handlers::auth::signup))
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/view-state", post(handlers::auth::view_state))
        .nest(
            "/",
            Router::new()
                .route("/me", get(handlers::auth::me))
                .route_layer(axum::middleware::from_fn_with_state(
                    state,
                    middleware::auth::require_auth,
                )),
        )
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/subscribe", post(handlers::subscribe::subscribe))
        .route("/contact", post(handlers::messages::contact))
        .route("/blog", get(handlers::blog::list))
        .route("/blog/:slug", get(handlers::blog::get_by_slug))
        .route("/feed/rss", get(handlers::blog::rss_feed))
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/courses", get(handlers::courses::catalog))
        .route("/courses/:key/syllabus", get(handlers::courses::syllabus))
        .route("/courses/:key/materials", get(handlers::courses::materials))
        .route("/enrollments", post(handlers::enrollments::request_enrollment))
        .route("/enrollments", get(handlers::enrollments::my_enrollments))
        .route(
            "/enrollments/course/:course_id",
            get(handlers::enrollments::my_enrollment_for_course),
        )
        .route("/enrollments/:id/reapply", post(handlers::enrollments::reapply))
        .route("/notifications", get(handlers::notifications::feed))
        .route("/messages", post(handlers::messages::create))
        .route("/password", put(handlers::auth::change_password))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_auth,
        ))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/enrollments", get(handlers::enrollments::roster))
        .route("/enrollments/:id/approve", post(handlers::enrollments::approve))
        .route("/enrollments/:id/reject", post(handlers::enrollments::reject))
        .route("/enrollments/:id/revoke", post(handlers::enrollments::revoke))
        .route("/enrollments/:id/reopen", post(handlers::enrollments::reopen))
        .route("/announcements", post(handlers::announcements::create))
        .route("/announcements", get(handlers::announcements::list_all))
        .route(
            "/announcements/:id/active",
            put(handlers::announcements::set_active),
        )
        .route("/announcements/:id", delete(handlers::announcements::delete))
        .route("/users", get(handlers::users::list))
        .route("/users/:id/rank", put(handlers::users::update_rank))
        .route("/users/:id", delete(handlers::users::delete))
        .route("/courses/:key/materials", post(handlers::materials::upload))
        .route("/materials/:id", delete(handlers::materials::delete))
        .route("/courses/:key/syllabus", post(handlers::syllabus::create))
        .route("/syllabus/:id", delete(handlers::syllabus::delete))
        .route("/messages", get(handlers::messages::list))
        .route("/blog", post(handlers::blog::create))
        .route("/blog/:id", put(handlers::blog::update))
        .route("/blog/:id", delete(handlers::blog::delete))
        .route("/blog/cover-image", post(handlers::blog::upload_cover_image))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_admin,
        ))
}
