pub mod announcements;
pub mod auth;
pub mod blog;
pub mod courses;
pub mod enrollments;
pub mod materials;
pub mod messages;
pub mod notifications;
pub mod root;
pub mod subscribe;
pub mod syllabus;
pub mod users;
