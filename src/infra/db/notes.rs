use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    application::repos::{CreateNoteParams, NotesWriteRepo, RepoError, UpdateNoteParams},
    domain::entities::NoteRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct NoteRow {
    id: i64,
    author_id: i64,
    title: String,
    content: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<NoteRow> for NoteRecord {
    fn from(row: NoteRow) -> Self {
        Self {
            id: row.id,
            author_id: row.author_id,
            title: row.title,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl NotesWriteRepo for PostgresRepositories {
    async fn create_note(&self, params: CreateNoteParams) -> Result<NoteRecord, RepoError> {
        let row = sqlx::query_as::<_, NoteRow>(
            r#"
            INSERT INTO notes (author_id, title, content)
            VALUES ($1, $2, $3)
            RETURNING id, author_id, title, content, created_at, updated_at
            "#,
        )
        .bind(params.author_id)
        .bind(params.title)
        .bind(params.content)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn update_note(
        &self,
        params: UpdateNoteParams,
    ) -> Result<Option<NoteRecord>, RepoError> {
        let row = sqlx::query_as::<_, NoteRow>(
            r#"
            UPDATE notes
            SET title = COALESCE($2, title),
                content = COALESCE($3, content),
                updated_at = now()
            WHERE id = $1
            RETURNING id, author_id, title, content, created_at, updated_at
            "#,
        )
        .bind(params.id)
        .bind(params.title)
        .bind(params.content)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(NoteRecord::from))
    }
}
