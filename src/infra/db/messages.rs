use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    application::repos::{CreateMessageParams, MessagesWriteRepo, RepoError},
    domain::entities::MessageRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct MessageRow {
    id: i64,
    sender_id: i64,
    recipient_id: i64,
    content: String,
    spirit_post_id: Option<i64>,
    created_at: OffsetDateTime,
}

impl From<MessageRow> for MessageRecord {
    fn from(row: MessageRow) -> Self {
        Self {
            id: row.id,
            sender_id: row.sender_id,
            recipient_id: row.recipient_id,
            content: row.content,
            spirit_post_id: row.spirit_post_id,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl MessagesWriteRepo for PostgresRepositories {
    async fn create_message(
        &self,
        params: CreateMessageParams,
    ) -> Result<MessageRecord, RepoError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO messages (sender_id, recipient_id, content, spirit_post_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, sender_id, recipient_id, content, spirit_post_id, created_at
            "#,
        )
        .bind(params.sender_id)
        .bind(params.recipient_id)
        .bind(params.content)
        .bind(params.spirit_post_id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }
}
