use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A message for the admin inbox: either a public contact-form submission
/// (no profile) or a support request from a signed-in student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportMessage {
    pub id: Uuid,
    pub profile_id: Option<Uuid>,
    pub sender_name: String,
    pub sender_email: String,
    pub inquiry_type: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Dashboard support form. The sender's name and email come from their
/// session, never from the body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMessageRequest {
    #[validate(length(min = 1))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub body: String,
}

/// Public contact form on the landing page; no session required.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default = "default_inquiry_type")]
    pub inquiry_type: String,
    #[validate(length(min = 1))]
    pub message: String,
}

fn default_inquiry_type() -> String {
    "Course Inquiry".to_string()
}
