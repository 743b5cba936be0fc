use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A public blog post. Content is stored as sanitized HTML from the admin
/// editor; the cover image is an `uploads/...` path when one was uploaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub content: String,
    pub image_url: Option<String>,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBlogPostRequest {
    #[validate(length(min = 1))]
    pub title: String,
    /// Explicit slug; generated from the title when omitted.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[validate(length(min = 1))]
    pub author: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBlogPostRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[validate(length(min = 1))]
    pub author: String,
}

/// Derives a URL slug from a title: lowercased, spaces to hyphens, anything
/// outside `[a-z0-9_-]` dropped.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_are_lowercase_hyphenated() {
        assert_eq!(slugify("My First Post"), "my-first-post");
        assert_eq!(slugify("Cleared for Takeoff!"), "cleared-for-takeoff");
    }

    #[test]
    fn punctuation_is_dropped() {
        assert_eq!(slugify("What's Next? (2026)"), "whats-next-2026");
    }
}
