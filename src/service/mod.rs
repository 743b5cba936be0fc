pub mod enrollment_service;
pub mod notification_service;

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{AdminPolicy, AuthService};
use crate::integrations::MailingListClient;
use crate::repository::*;

pub use enrollment_service::EnrollmentService;
pub use notification_service::{resolve_feed, NotificationService};

pub struct ServiceContext {
    pub profile_repo: Arc<dyn ProfileRepository>,
    pub enrollment_repo: Arc<dyn EnrollmentRepository>,
    pub announcement_repo: Arc<dyn AnnouncementRepository>,
    pub material_repo: Arc<dyn MaterialRepository>,
    pub syllabus_repo: Arc<dyn SyllabusRepository>,
    pub message_repo: Arc<dyn MessageRepository>,
    pub blog_repo: Arc<dyn BlogRepository>,
    pub enrollment_service: Arc<EnrollmentService>,
    pub notification_service: Arc<NotificationService>,
    pub auth_service: Arc<AuthService>,
    pub admin_policy: Arc<dyn AdminPolicy>,
    pub mailing_list: Option<Arc<MailingListClient>>,
    pub db_pool: SqlitePool,
}

impl ServiceContext {
    pub fn new(
        profile_repo: Arc<dyn ProfileRepository>,
        enrollment_repo: Arc<dyn EnrollmentRepository>,
        announcement_repo: Arc<dyn AnnouncementRepository>,
        material_repo: Arc<dyn MaterialRepository>,
        syllabus_repo: Arc<dyn SyllabusRepository>,
        message_repo: Arc<dyn MessageRepository>,
        blog_repo: Arc<dyn BlogRepository>,
        auth_service: Arc<AuthService>,
        admin_policy: Arc<dyn AdminPolicy>,
        mailing_list: Option<Arc<MailingListClient>>,
        db_pool: SqlitePool,
    ) -> Self {
        let enrollment_service = Arc::new(EnrollmentService::new(enrollment_repo.clone()));
        let notification_service = Arc::new(NotificationService::new(
            announcement_repo.clone(),
            enrollment_repo.clone(),
        ));

        Self {
            profile_repo,
            enrollment_repo,
            announcement_repo,
            material_repo,
            syllabus_repo,
            message_repo,
            blog_repo,
            enrollment_service,
            notification_service,
            auth_service,
            admin_policy,
            mailing_list,
            db_pool,
        }
    }
}
