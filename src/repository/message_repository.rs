use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::SupportMessage,
    error::{AppError, Result},
    repository::MessageRepository,
};

#[derive(FromRow)]
struct MessageRow {
    id: String,
    profile_id: Option<String>,
    sender_name: String,
    sender_email: String,
    inquiry_type: String,
    body: String,
    created_at: NaiveDateTime,
}

pub struct SqliteMessageRepository {
    pool: SqlitePool,
}

impl SqliteMessageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_message(row: MessageRow) -> Result<SupportMessage> {
        let profile_id = match row.profile_id {
            Some(s) => {
                Some(Uuid::parse_str(&s).map_err(|e| AppError::Database(e.to_string()))?)
            }
            None => None,
        };

        Ok(SupportMessage {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            profile_id,
            sender_name: row.sender_name,
            sender_email: row.sender_email,
            inquiry_type: row.inquiry_type,
            body: row.body,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }
}

#[async_trait]
impl MessageRepository for SqliteMessageRepository {
    async fn create(&self, message: SupportMessage) -> Result<SupportMessage> {
        let id_str = message.id.to_string();
        let profile_id_str = message.profile_id.map(|id| id.to_string());
        let created_at_naive = message.created_at.naive_utc();

        sqlx::query(
            r#"
            INSERT INTO messages (
                id, profile_id, sender_name, sender_email, inquiry_type, body, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&profile_id_str)
        .bind(&message.sender_name)
        .bind(&message.sender_email)
        .bind(&message.inquiry_type)
        .bind(&message.body)
        .bind(created_at_naive)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(message)
    }

    async fn list_all(&self) -> Result<Vec<SupportMessage>> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, profile_id, sender_name, sender_email, inquiry_type, body, created_at
            FROM messages
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_message).collect()
    }
}
