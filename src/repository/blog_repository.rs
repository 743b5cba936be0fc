use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::BlogPost,
    error::{AppError, Result},
    repository::BlogRepository,
};

#[derive(FromRow)]
struct BlogPostRow {
    id: String,
    title: String,
    slug: String,
    description: String,
    content: String,
    image_url: Option<String>,
    author: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteBlogRepository {
    pool: SqlitePool,
}

impl SqliteBlogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_post(row: BlogPostRow) -> Result<BlogPost> {
        Ok(BlogPost {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            title: row.title,
            slug: row.slug,
            description: row.description,
            content: row.content,
            image_url: row.image_url,
            author: row.author,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

#[async_trait]
impl BlogRepository for SqliteBlogRepository {
    async fn create(&self, post: BlogPost) -> Result<BlogPost> {
        let id_str = post.id.to_string();
        let created_at_naive = post.created_at.naive_utc();
        let updated_at_naive = post.updated_at.naive_utc();

        sqlx::query(
            r#"
            INSERT INTO blog_posts (
                id, title, slug, description, content, image_url, author,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.description)
        .bind(&post.content)
        .bind(&post.image_url)
        .bind(&post.author)
        .bind(created_at_naive)
        .bind(updated_at_naive)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(post.id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created post".to_string()))
    }

    async fn update(&self, post: BlogPost) -> Result<BlogPost> {
        let id_str = post.id.to_string();
        let updated_at_naive = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            UPDATE blog_posts
            SET title = ?, slug = ?, description = ?, content = ?,
                image_url = ?, author = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.description)
        .bind(&post.content)
        .bind(&post.image_url)
        .bind(&post.author)
        .bind(updated_at_naive)
        .bind(&id_str)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Post not found".to_string()));
        }

        self.find_by_id(post.id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve updated post".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, BlogPostRow>(
            r#"
            SELECT id, title, slug, description, content, image_url, author,
                   created_at, updated_at
            FROM blog_posts
            WHERE id = ?
            "#,
        )
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_post(r)?)),
            None => Ok(None),
        }
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>> {
        let row = sqlx::query_as::<_, BlogPostRow>(
            r#"
            SELECT id, title, slug, description, content, image_url, author,
                   created_at, updated_at
            FROM blog_posts
            WHERE slug = ?
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_post(r)?)),
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<BlogPost>> {
        let rows = sqlx::query_as::<_, BlogPostRow>(
            r#"
            SELECT id, title, slug, description, content, image_url, author,
                   created_at, updated_at
            FROM blog_posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_post).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();
        sqlx::query("DELETE FROM blog_posts WHERE id = ?")
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
