use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One user's claim on one course offering. At most one row exists per
/// (user, course) pair; a missing row means the user never attempted to
/// enroll ("absent" in the lifecycle, not persisted).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_email: String,
    pub user_name: String,
    pub course_id: String,
    pub status: EnrollmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Pending,
    Active,
    Rejected,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Pending => "pending",
            EnrollmentStatus::Active => "active",
            EnrollmentStatus::Rejected => "rejected",
        }
    }
}

/// A lifecycle transition request. Each action fixes both the status it is
/// valid from and the status it moves to, so illegal edges are unrepresentable
/// once an action has been validated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentAction {
    /// pending -> active (admin)
    Approve,
    /// pending -> rejected (admin)
    Reject,
    /// active -> pending (admin)
    Revoke,
    /// rejected -> pending (admin)
    Reopen,
    /// rejected -> pending (the owning user)
    Reapply,
}

impl EnrollmentAction {
    pub fn valid_from(&self) -> EnrollmentStatus {
        match self {
            EnrollmentAction::Approve | EnrollmentAction::Reject => EnrollmentStatus::Pending,
            EnrollmentAction::Revoke => EnrollmentStatus::Active,
            EnrollmentAction::Reopen | EnrollmentAction::Reapply => EnrollmentStatus::Rejected,
        }
    }

    pub fn target(&self) -> EnrollmentStatus {
        match self {
            EnrollmentAction::Approve => EnrollmentStatus::Active,
            EnrollmentAction::Reject => EnrollmentStatus::Rejected,
            EnrollmentAction::Revoke
            | EnrollmentAction::Reopen
            | EnrollmentAction::Reapply => EnrollmentStatus::Pending,
        }
    }

    pub fn requires_admin(&self) -> bool {
        !matches!(self, EnrollmentAction::Reapply)
    }
}

/// Admin roster entry: an enrollment with its recency badges.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentOverview {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    pub is_new: bool,
    pub is_likely_resubmission: bool,
}

/// A user's standing in a specific course, as shown in the catalog.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CourseStanding {
    NotEnrolled,
    Pending,
    Active,
    Rejected,
}

impl From<EnrollmentStatus> for CourseStanding {
    fn from(status: EnrollmentStatus) -> Self {
        match status {
            EnrollmentStatus::Pending => CourseStanding::Pending,
            EnrollmentStatus::Active => CourseStanding::Active,
            EnrollmentStatus::Rejected => CourseStanding::Rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_table_matches_lifecycle() {
        let cases = [
            (EnrollmentAction::Approve, EnrollmentStatus::Pending, EnrollmentStatus::Active),
            (EnrollmentAction::Reject, EnrollmentStatus::Pending, EnrollmentStatus::Rejected),
            (EnrollmentAction::Revoke, EnrollmentStatus::Active, EnrollmentStatus::Pending),
            (EnrollmentAction::Reopen, EnrollmentStatus::Rejected, EnrollmentStatus::Pending),
            (EnrollmentAction::Reapply, EnrollmentStatus::Rejected, EnrollmentStatus::Pending),
        ];
        for (action, from, to) in cases {
            assert_eq!(action.valid_from(), from);
            assert_eq!(action.target(), to);
        }
    }

    #[test]
    fn only_reapply_is_a_user_action() {
        assert!(!EnrollmentAction::Reapply.requires_admin());
        for action in [
            EnrollmentAction::Approve,
            EnrollmentAction::Reject,
            EnrollmentAction::Revoke,
            EnrollmentAction::Reopen,
        ] {
            assert!(action.requires_admin());
        }
    }
}
