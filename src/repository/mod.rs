use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::*;
use crate::error::Result;

pub mod announcement_repository;
pub mod blog_repository;
pub mod enrollment_repository;
pub mod material_repository;
pub mod message_repository;
pub mod profile_repository;
pub mod syllabus_repository;

pub use announcement_repository::SqliteAnnouncementRepository;
pub use blog_repository::SqliteBlogRepository;
pub use enrollment_repository::SqliteEnrollmentRepository;
pub use material_repository::SqliteMaterialRepository;
pub use message_repository::SqliteMessageRepository;
pub use profile_repository::SqliteProfileRepository;
pub use syllabus_repository::SqliteSyllabusRepository;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn create(&self, request: &SignupRequest, password_hash: &str) -> Result<Profile>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>>;
    /// Newest accounts first.
    async fn list(&self) -> Result<Vec<Profile>>;
    async fn update_rank(&self, id: Uuid, rank: &str) -> Result<Profile>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Atomic upsert keyed on (user_id, course_id): creates a `pending` row
    /// if none exists, otherwise leaves the existing row untouched. Returns
    /// the row that is in place after the call either way.
    async fn upsert_pending(&self, user: &Profile, course_id: &str) -> Result<Enrollment>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Enrollment>>;
    async fn find_by_user_and_course(
        &self,
        user_id: Uuid,
        course_id: &str,
    ) -> Result<Option<Enrollment>>;
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Enrollment>>;
    /// Most recently touched first, so resubmissions float to the top of the
    /// admin roster.
    async fn list_all(&self) -> Result<Vec<Enrollment>>;
    /// Writes the new status and refreshes `updated_at`; `created_at` is
    /// never touched after insert.
    async fn update_status(&self, id: Uuid, status: EnrollmentStatus) -> Result<Enrollment>;
}

#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    async fn create(&self, announcement: Announcement) -> Result<Announcement>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>>;
    async fn list_all(&self) -> Result<Vec<Announcement>>;
    async fn list_active(&self) -> Result<Vec<Announcement>>;
    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Announcement>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn create(&self, post: BlogPost) -> Result<BlogPost>;
    async fn update(&self, post: BlogPost) -> Result<BlogPost>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>>;
    /// Newest posts first.
    async fn list_all(&self) -> Result<Vec<BlogPost>>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait MaterialRepository: Send + Sync {
    async fn create(&self, material: CourseMaterial) -> Result<CourseMaterial>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CourseMaterial>>;
    /// Oldest first: modules are consumed in upload order.
    async fn list_by_course(&self, course_id: &str) -> Result<Vec<CourseMaterial>>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait SyllabusRepository: Send + Sync {
    async fn create(&self, item: SyllabusItem) -> Result<SyllabusItem>;
    async fn list_by_course(&self, course_id: &str) -> Result<Vec<SyllabusItem>>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(&self, message: SupportMessage) -> Result<SupportMessage>;
    async fn list_all(&self) -> Result<Vec<SupportMessage>>;
}
