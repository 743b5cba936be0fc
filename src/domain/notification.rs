use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::Announcement;

/// One entry in a user's dashboard feed. The welcome item is synthesized
/// per-request for accounts younger than 24 hours; it has no id and no
/// repository path, so it can never be written to storage.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Notification {
    Welcome {
        title: String,
        message: String,
        created_at: DateTime<Utc>,
    },
    Broadcast(Announcement),
}

impl Notification {
    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Notification::Welcome { created_at, .. } => *created_at,
            Notification::Broadcast(a) => a.created_at,
        }
    }
}
