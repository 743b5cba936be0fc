use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A classroom module: an uploaded file or an external link, visible only to
/// users with an active enrollment in the course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseMaterial {
    pub id: Uuid,
    pub course_id: String,
    pub title: String,
    pub kind: MaterialKind,
    /// Public URL: an `uploads/...` path for stored files, or the external
    /// URL for `Link` materials.
    pub file_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Pdf,
    Video,
    Link,
}

impl MaterialKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialKind::Pdf => "pdf",
            MaterialKind::Video => "video",
            MaterialKind::Link => "link",
        }
    }
}
