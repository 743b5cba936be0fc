use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Promotional ranks, lowest to highest. Purely a label edited by admins.
pub const RANKS: &[&str] = &[
    "Cadet",
    "Flight Officer",
    "Senior Officer",
    "Commander",
    "Captain",
];

pub const DEFAULT_RANK: &str = "Cadet";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub rank: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1))]
    pub full_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRankRequest {
    pub rank: String,
}

impl UpdateRankRequest {
    pub fn is_known_rank(&self) -> bool {
        RANKS.contains(&self.rank.as_str())
    }
}

/// Admin user-list entry: a profile joined with its enrollments and the
/// 48-hour "new" highlight.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileOverview {
    #[serde(flatten)]
    pub profile: Profile,
    pub enrollments: Vec<crate::domain::Enrollment>,
    pub is_new: bool,
}
