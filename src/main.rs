use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aeroportal::{
    api,
    auth::{AuthService, EmailAllowList},
    config::Settings,
    integrations::MailingListClient,
    repository,
    service::ServiceContext,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aeroportal=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::new().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        Settings::default()
    });

    tracing::info!(
        "Starting Aeroportal server on {}:{}",
        settings.server.host,
        settings.server.port
    );

    // Initialize database
    let db_pool = SqlitePoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(&settings.database.url)
        .await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    // Initialize auth service and admin policy
    let auth_service = Arc::new(AuthService::new(db_pool.clone()));
    let admin_policy = Arc::new(EmailAllowList::new(settings.admin.emails.clone()));
    if settings.admin.emails.is_empty() {
        tracing::warn!("No admin emails configured; admin surfaces are unreachable");
    }

    // Expired sessions are swept hourly
    {
        let auth = auth_service.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(3600));
            loop {
                interval.tick().await;
                match auth.cleanup_expired_sessions().await {
                    Ok(removed) if removed > 0 => {
                        tracing::debug!("Removed {} expired sessions", removed)
                    }
                    Ok(_) => {}
                    Err(e) => tracing::warn!("Session cleanup failed: {}", e),
                }
            }
        });
    }

    // Initialize repositories
    let profile_repo = Arc::new(repository::SqliteProfileRepository::new(db_pool.clone()));
    let enrollment_repo = Arc::new(repository::SqliteEnrollmentRepository::new(db_pool.clone()));
    let announcement_repo = Arc::new(repository::SqliteAnnouncementRepository::new(db_pool.clone()));
    let material_repo = Arc::new(repository::SqliteMaterialRepository::new(db_pool.clone()));
    let syllabus_repo = Arc::new(repository::SqliteSyllabusRepository::new(db_pool.clone()));
    let message_repo = Arc::new(repository::SqliteMessageRepository::new(db_pool.clone()));
    let blog_repo = Arc::new(repository::SqliteBlogRepository::new(db_pool.clone()));

    // Mailing-list pass-through is optional; the portal runs without it
    let mailing_list = MailingListClient::new(settings.mailing_list.clone()).map(Arc::new);
    match &mailing_list {
        Some(_) => tracing::info!("Mailing-list subscriptions enabled"),
        None => tracing::info!("Mailing-list subscriptions disabled"),
    }

    // Create service context
    let service_context = Arc::new(ServiceContext::new(
        profile_repo,
        enrollment_repo,
        announcement_repo,
        material_repo,
        syllabus_repo,
        message_repo,
        blog_repo,
        auth_service,
        admin_policy,
        mailing_list,
        db_pool.clone(),
    ));

    let app = api::create_app(service_context, Arc::new(settings.clone()));

    let listener = tokio::net::TcpListener::bind(format!(
        "{}:{}",
        settings.server.host, settings.server.port
    ))
    .await?;

    tracing::info!(
        "Server listening on http://{}:{}",
        settings.server.host,
        settings.server.port
    );

    axum::serve(listener, app).await?;

    Ok(())
}
