use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{CourseMaterial, MaterialKind},
    error::{AppError, Result},
    repository::MaterialRepository,
};

#[derive(FromRow)]
struct MaterialRow {
    id: String,
    course_id: String,
    title: String,
    kind: String,
    file_url: String,
    created_at: NaiveDateTime,
}

pub struct SqliteMaterialRepository {
    pool: SqlitePool,
}

impl SqliteMaterialRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_material(row: MaterialRow) -> Result<CourseMaterial> {
        Ok(CourseMaterial {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            course_id: row.course_id,
            title: row.title,
            kind: Self::parse_kind(&row.kind)?,
            file_url: row.file_url,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }

    fn parse_kind(s: &str) -> Result<MaterialKind> {
        match s {
            "pdf" => Ok(MaterialKind::Pdf),
            "video" => Ok(MaterialKind::Video),
            "link" => Ok(MaterialKind::Link),
            _ => Err(AppError::Database(format!("Invalid material kind: {}", s))),
        }
    }
}

#[async_trait]
impl MaterialRepository for SqliteMaterialRepository {
    async fn create(&self, material: CourseMaterial) -> Result<CourseMaterial> {
        let id_str = material.id.to_string();
        let created_at_naive = material.created_at.naive_utc();

        sqlx::query(
            r#"
            INSERT INTO course_materials (id, course_id, title, kind, file_url, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&material.course_id)
        .bind(&material.title)
        .bind(material.kind.as_str())
        .bind(&material.file_url)
        .bind(created_at_naive)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(material.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created material".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CourseMaterial>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, MaterialRow>(
            r#"
            SELECT id, course_id, title, kind, file_url, created_at
            FROM course_materials
            WHERE id = ?
            "#,
        )
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_material(r)?)),
            None => Ok(None),
        }
    }

    async fn list_by_course(&self, course_id: &str) -> Result<Vec<CourseMaterial>> {
        let rows = sqlx::query_as::<_, MaterialRow>(
            r#"
            SELECT id, course_id, title, kind, file_url, created_at
            FROM course_materials
            WHERE course_id = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_material).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();
        sqlx::query("DELETE FROM course_materials WHERE id = ?")
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
