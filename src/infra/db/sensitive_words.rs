use async_trait::async_trait;

use crate::{
    application::repos::{RepoError, SensitiveWordsRepo, SensitiveWordsWriteRepo},
    domain::entities::SensitiveWordRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct SensitiveWordRow {
    id: i64,
    word: String,
}

impl From<SensitiveWordRow> for SensitiveWordRecord {
    fn from(row: SensitiveWordRow) -> Self {
        Self {
            id: row.id,
            word: row.word,
        }
    }
}

#[async_trait]
impl SensitiveWordsRepo for PostgresRepositories {
    async fn list_all(&self) -> Result<Vec<SensitiveWordRecord>, RepoError> {
        let rows = sqlx::query_as::<_, SensitiveWordRow>(
            r#"
            SELECT id, word
            FROM sensitive_words
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(SensitiveWordRecord::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<SensitiveWordRecord>, RepoError> {
        let row = sqlx::query_as::<_, SensitiveWordRow>(
            r#"
            SELECT id, word
            FROM sensitive_words
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(SensitiveWordRecord::from))
    }

    async fn find_by_word(&self, word: &str) -> Result<Option<SensitiveWordRecord>, RepoError> {
        let row = sqlx::query_as::<_, SensitiveWordRow>(
            r#"
            SELECT id, word
            FROM sensitive_words
            WHERE word = $1
            "#,
        )
        .bind(word)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(SensitiveWordRecord::from))
    }
}

#[async_trait]
impl SensitiveWordsWriteRepo for PostgresRepositories {
    async fn create_word(&self, word: &str) -> Result<SensitiveWordRecord, RepoError> {
        let row = sqlx::query_as::<_, SensitiveWordRow>(
            r#"
            INSERT INTO sensitive_words (word)
            VALUES ($1)
            RETURNING id, word
            "#,
        )
        .bind(word)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn delete_word(&self, id: i64) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM sensitive_words WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
