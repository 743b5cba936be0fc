use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::SyllabusItem,
    error::{AppError, Result},
    repository::SyllabusRepository,
};

#[derive(FromRow)]
struct SyllabusRow {
    id: String,
    course_id: String,
    week_label: String,
    title: String,
    description: String,
    order_index: i64,
    created_at: NaiveDateTime,
}

pub struct SqliteSyllabusRepository {
    pool: SqlitePool,
}

impl SqliteSyllabusRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_item(row: SyllabusRow) -> Result<SyllabusItem> {
        Ok(SyllabusItem {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            course_id: row.course_id,
            week_label: row.week_label,
            title: row.title,
            description: row.description,
            order_index: row.order_index,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }
}

#[async_trait]
impl SyllabusRepository for SqliteSyllabusRepository {
    async fn create(&self, item: SyllabusItem) -> Result<SyllabusItem> {
        let id_str = item.id.to_string();
        let created_at_naive = item.created_at.naive_utc();

        sqlx::query(
            r#"
            INSERT INTO course_syllabus (
                id, course_id, week_label, title, description, order_index, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&item.course_id)
        .bind(&item.week_label)
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.order_index)
        .bind(created_at_naive)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(item)
    }

    async fn list_by_course(&self, course_id: &str) -> Result<Vec<SyllabusItem>> {
        let rows = sqlx::query_as::<_, SyllabusRow>(
            r#"
            SELECT id, course_id, week_label, title, description, order_index, created_at
            FROM course_syllabus
            WHERE course_id = ?
            ORDER BY order_index ASC
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_item).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();
        sqlx::query("DELETE FROM course_syllabus WHERE id = ?")
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
