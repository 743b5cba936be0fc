use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// One topic in a course's curriculum outline, ordered by `order_index`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyllabusItem {
    pub id: Uuid,
    pub course_id: String,
    pub week_label: String,
    pub title: String,
    pub description: String,
    pub order_index: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSyllabusItemRequest {
    #[validate(length(min = 1))]
    pub week_label: String,
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order_index: i64,
}
