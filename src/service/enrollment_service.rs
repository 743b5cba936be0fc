use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    domain::recency::{is_likely_resubmission, is_recent, new_badge_window},
    domain::{
        find_course, CourseStanding, Enrollment, EnrollmentAction, EnrollmentOverview, Profile,
    },
    error::{AppError, Result},
    repository::EnrollmentRepository,
};

/// Owns the enrollment lifecycle: the idempotent enroll request and the
/// status transitions an admin or the owning user may perform. The caller
/// identity is always passed in explicitly; nothing here reaches for ambient
/// session state.
pub struct EnrollmentService {
    repo: Arc<dyn EnrollmentRepository>,
}

impl EnrollmentService {
    pub fn new(repo: Arc<dyn EnrollmentRepository>) -> Self {
        Self { repo }
    }

    /// Idempotent: if the (user, course) enrollment already exists it is
    /// returned unchanged, otherwise a `pending` row is created. The
    /// underlying write is an atomic upsert, so concurrent duplicate
    /// requests cannot produce two rows.
    pub async fn request_enrollment(
        &self,
        caller: &Profile,
        course_id: &str,
    ) -> Result<Enrollment> {
        if course_id.trim().is_empty() {
            return Err(AppError::Validation("Course key is required".to_string()));
        }
        if find_course(course_id).is_none() {
            return Err(AppError::Validation(format!("Unknown course: {}", course_id)));
        }

        self.repo.upsert_pending(caller, course_id).await
    }

    /// Applies a lifecycle action after checking both the actor's role and
    /// the transition table. Returns the authoritative post-write row; the
    /// caller decides whether to update any UI optimistically.
    pub async fn transition(
        &self,
        enrollment_id: Uuid,
        action: EnrollmentAction,
        caller: &Profile,
        caller_is_admin: bool,
    ) -> Result<Enrollment> {
        let enrollment = self
            .repo
            .find_by_id(enrollment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Enrollment not found".to_string()))?;

        if action.requires_admin() {
            if !caller_is_admin {
                return Err(AppError::Forbidden);
            }
        } else if enrollment.user_id != caller.id {
            // Reapply is only available to the user who owns the enrollment.
            return Err(AppError::Forbidden);
        }

        if enrollment.status != action.valid_from() {
            return Err(AppError::Validation(format!(
                "Cannot {:?} an enrollment in status {}",
                action,
                enrollment.status.as_str()
            )));
        }

        let updated = self.repo.update_status(enrollment_id, action.target()).await?;

        tracing::info!(
            enrollment = %enrollment_id,
            from = enrollment.status.as_str(),
            to = updated.status.as_str(),
            "enrollment transition applied"
        );

        Ok(updated)
    }

    pub async fn enrollments_for(&self, user_id: Uuid) -> Result<Vec<Enrollment>> {
        self.repo.list_by_user(user_id).await
    }

    pub async fn enrollment_for_course(
        &self,
        user_id: Uuid,
        course_id: &str,
    ) -> Result<Option<Enrollment>> {
        self.repo.find_by_user_and_course(user_id, course_id).await
    }

    /// The user's standing per catalog course; a missing row reads as
    /// `NotEnrolled`, never as an error.
    pub async fn standing_for_course(
        &self,
        user_id: Uuid,
        course_id: &str,
    ) -> Result<CourseStanding> {
        Ok(self
            .repo
            .find_by_user_and_course(user_id, course_id)
            .await?
            .map(|e| e.status.into())
            .unwrap_or(CourseStanding::NotEnrolled))
    }

    /// Admin roster: every enrollment, most recently touched first, with the
    /// 24-hour "new" badge and the resubmission heuristic applied.
    pub async fn roster(&self) -> Result<Vec<EnrollmentOverview>> {
        let now = Utc::now();
        let enrollments = self.repo.list_all().await?;

        Ok(enrollments
            .into_iter()
            .map(|e| {
                let is_new = is_recent(Some(e.created_at), new_badge_window(), now);
                let resubmission =
                    is_likely_resubmission(e.status, Some(e.created_at), Some(e.updated_at));
                EnrollmentOverview {
                    enrollment: e,
                    is_new,
                    is_likely_resubmission: resubmission,
                }
            })
            .collect())
    }
}
