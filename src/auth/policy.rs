use crate::domain::Profile;

/// Decides whether a signed-in user may use the admin surfaces. Call sites
/// depend on this trait only; the configured email allow-list is one backing
/// implementation, not a baked-in policy.
pub trait AdminPolicy: Send + Sync {
    fn is_admin(&self, profile: &Profile) -> bool;
}

/// Allow-list of admin email addresses, case-insensitive on the local
/// comparison and trimmed of stray whitespace from config.
pub struct EmailAllowList {
    emails: Vec<String>,
}

impl EmailAllowList {
    pub fn new(emails: Vec<String>) -> Self {
        Self {
            emails: emails
                .into_iter()
                .map(|e| e.trim().to_ascii_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }
}

impl AdminPolicy for EmailAllowList {
    fn is_admin(&self, profile: &Profile) -> bool {
        let email = profile.email.to_ascii_lowercase();
        self.emails.iter().any(|e| *e == email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn profile(email: &str) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            email: email.to_string(),
            full_name: "Test".to_string(),
            rank: "Cadet".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn allow_list_matches_trimmed_case_insensitive() {
        let policy = EmailAllowList::new(vec![
            " ops@example.com ".to_string(),
            "Chief@Example.com".to_string(),
        ]);
        assert!(policy.is_admin(&profile("ops@example.com")));
        assert!(policy.is_admin(&profile("chief@example.com")));
        assert!(!policy.is_admin(&profile("cadet@example.com")));
    }

    #[test]
    fn empty_list_grants_nothing() {
        let policy = EmailAllowList::new(vec![]);
        assert!(!policy.is_admin(&profile("ops@example.com")));
    }
}
