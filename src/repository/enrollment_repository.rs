use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Enrollment, EnrollmentStatus, Profile},
    error::{AppError, Result},
    repository::EnrollmentRepository,
};

#[derive(FromRow)]
struct EnrollmentRow {
    id: String,
    user_id: String,
    user_email: String,
    user_name: String,
    course_id: String,
    status: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteEnrollmentRepository {
    pool: SqlitePool,
}

impl SqliteEnrollmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_enrollment(row: EnrollmentRow) -> Result<Enrollment> {
        Ok(Enrollment {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            user_id: Uuid::parse_str(&row.user_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            user_email: row.user_email,
            user_name: row.user_name,
            course_id: row.course_id,
            status: Self::parse_status(&row.status)?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }

    fn parse_status(s: &str) -> Result<EnrollmentStatus> {
        match s {
            "pending" => Ok(EnrollmentStatus::Pending),
            "active" => Ok(EnrollmentStatus::Active),
            "rejected" => Ok(EnrollmentStatus::Rejected),
            _ => Err(AppError::Database(format!("Invalid enrollment status: {}", s))),
        }
    }
}

#[async_trait]
impl EnrollmentRepository for SqliteEnrollmentRepository {
    async fn upsert_pending(&self, user: &Profile, course_id: &str) -> Result<Enrollment> {
        let id_str = Uuid::new_v4().to_string();
        let user_id_str = user.id.to_string();
        let now_naive = Utc::now().naive_utc();

        // The unique (user_id, course_id) index makes this a no-op when a row
        // already exists, so a double-submitted enroll can never create a
        // duplicate.
        sqlx::query(
            r#"
            INSERT INTO enrollments (
                id, user_id, user_email, user_name, course_id, status,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id, course_id) DO NOTHING
            "#,
        )
        .bind(&id_str)
        .bind(&user_id_str)
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(course_id)
        .bind(EnrollmentStatus::Pending.as_str())
        .bind(now_naive)
        .bind(now_naive)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_user_and_course(user.id, course_id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve enrollment".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Enrollment>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            SELECT id, user_id, user_email, user_name, course_id, status,
                   created_at, updated_at
            FROM enrollments
            WHERE id = ?
            "#,
        )
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_enrollment(r)?)),
            None => Ok(None),
        }
    }

    async fn find_by_user_and_course(
        &self,
        user_id: Uuid,
        course_id: &str,
    ) -> Result<Option<Enrollment>> {
        let user_id_str = user_id.to_string();
        let row = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            SELECT id, user_id, user_email, user_name, course_id, status,
                   created_at, updated_at
            FROM enrollments
            WHERE user_id = ? AND course_id = ?
            "#,
        )
        .bind(user_id_str)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_enrollment(r)?)),
            None => Ok(None),
        }
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Enrollment>> {
        let user_id_str = user_id.to_string();
        let rows = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            SELECT id, user_id, user_email, user_name, course_id, status,
                   created_at, updated_at
            FROM enrollments
            WHERE user_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id_str)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_enrollment).collect()
    }

    async fn list_all(&self) -> Result<Vec<Enrollment>> {
        let rows = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            SELECT id, user_id, user_email, user_name, course_id, status,
                   created_at, updated_at
            FROM enrollments
            ORDER BY updated_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_enrollment).collect()
    }

    async fn update_status(&self, id: Uuid, status: EnrollmentStatus) -> Result<Enrollment> {
        let id_str = id.to_string();
        let now_naive = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            UPDATE enrollments
            SET status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(status.as_str())
        .bind(now_naive)
        .bind(&id_str)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Enrollment not found".to_string()));
        }

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve updated enrollment".to_string())
        })
    }
}
