use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    application::repos::{CreatePostParams, PostsWriteRepo, RepoError, UpdatePostParams},
    domain::entities::PostRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    author_id: i64,
    title: String,
    content: String,
    prompt: Option<String>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<PostRow> for PostRecord {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            author_id: row.author_id,
            title: row.title,
            content: row.content,
            prompt: row.prompt,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl PostsWriteRepo for PostgresRepositories {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (author_id, title, content, prompt)
            VALUES ($1, $2, $3, $4)
            RETURNING id, author_id, title, content, prompt, created_at, updated_at
            "#,
        )
        .bind(params.author_id)
        .bind(params.title)
        .bind(params.content)
        .bind(params.prompt)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn update_post(
        &self,
        params: UpdatePostParams,
    ) -> Result<Option<PostRecord>, RepoError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title),
                content = COALESCE($3, content),
                prompt = COALESCE($4, prompt),
                updated_at = now()
            WHERE id = $1
            RETURNING id, author_id, title, content, prompt, created_at, updated_at
            "#,
        )
        .bind(params.id)
        .bind(params.title)
        .bind(params.content)
        .bind(params.prompt)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(PostRecord::from))
    }
}
