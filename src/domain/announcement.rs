use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An admin-authored broadcast message. Soft-deactivated via `is_active`
/// rather than deleted in normal flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub target: TargetGroup,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Alert,
    Success,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Alert => "alert",
            Severity::Success => "success",
        }
    }
}

/// Audience selector stored as a plain string on the wire
/// (`all`, `registered`, `not_registered`, `course:<key>`). Anything else
/// parses to `Unknown` and is never shown to anyone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum TargetGroup {
    All,
    Registered,
    NotRegistered,
    Course(String),
    Unknown(String),
}

impl TargetGroup {
    pub fn parse(s: &str) -> Self {
        match s {
            "all" => TargetGroup::All,
            "registered" => TargetGroup::Registered,
            "not_registered" => TargetGroup::NotRegistered,
            _ => match s.strip_prefix("course:") {
                Some(key) if !key.is_empty() => TargetGroup::Course(key.to_string()),
                _ => TargetGroup::Unknown(s.to_string()),
            },
        }
    }

    pub fn as_wire(&self) -> String {
        match self {
            TargetGroup::All => "all".to_string(),
            TargetGroup::Registered => "registered".to_string(),
            TargetGroup::NotRegistered => "not_registered".to_string(),
            TargetGroup::Course(key) => format!("course:{}", key),
            TargetGroup::Unknown(raw) => raw.clone(),
        }
    }
}

impl From<String> for TargetGroup {
    fn from(s: String) -> Self {
        TargetGroup::parse(&s)
    }
}

impl From<TargetGroup> for String {
    fn from(t: TargetGroup) -> Self {
        t.as_wire()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_selectors() {
        assert_eq!(TargetGroup::parse("all"), TargetGroup::All);
        assert_eq!(TargetGroup::parse("registered"), TargetGroup::Registered);
        assert_eq!(TargetGroup::parse("not_registered"), TargetGroup::NotRegistered);
        assert_eq!(
            TargetGroup::parse("course:aerogenesis"),
            TargetGroup::Course("aerogenesis".to_string())
        );
    }

    #[test]
    fn unrecognized_selectors_round_trip_as_unknown() {
        let t = TargetGroup::parse("vip_only");
        assert_eq!(t, TargetGroup::Unknown("vip_only".to_string()));
        assert_eq!(t.as_wire(), "vip_only");
        // A bare "course:" prefix with no key is not a valid course selector.
        assert!(matches!(TargetGroup::parse("course:"), TargetGroup::Unknown(_)));
    }
}
