use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    application::repos::{
        CreateSpiritPostParams, RepoError, SpiritPostsRepo, SpiritPostsWriteRepo,
        UpdateSpiritPostParams,
    },
    domain::entities::SpiritPostRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

const SPIRIT_POST_COLUMNS: &str =
    "id, author_id, title, content, reward, claimed_by, claimed_at, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct SpiritPostRow {
    id: i64,
    author_id: i64,
    title: String,
    content: String,
    reward: Option<i64>,
    claimed_by: Option<i64>,
    claimed_at: Option<OffsetDateTime>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<SpiritPostRow> for SpiritPostRecord {
    fn from(row: SpiritPostRow) -> Self {
        Self {
            id: row.id,
            author_id: row.author_id,
            title: row.title,
            content: row.content,
            reward: row.reward,
            claimed_by: row.claimed_by,
            claimed_at: row.claimed_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl SpiritPostsRepo for PostgresRepositories {
    async fn find_by_id(&self, id: i64) -> Result<Option<SpiritPostRecord>, RepoError> {
        let sql = format!("SELECT {SPIRIT_POST_COLUMNS} FROM spirit_posts WHERE id = $1");
        let row = sqlx::query_as::<_, SpiritPostRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(SpiritPostRecord::from))
    }
}

#[async_trait]
impl SpiritPostsWriteRepo for PostgresRepositories {
    async fn create_spirit_post(
        &self,
        params: CreateSpiritPostParams,
    ) -> Result<SpiritPostRecord, RepoError> {
        let sql = format!(
            "INSERT INTO spirit_posts (author_id, title, content, reward) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {SPIRIT_POST_COLUMNS}"
        );
        let row = sqlx::query_as::<_, SpiritPostRow>(&sql)
            .bind(params.author_id)
            .bind(params.title)
            .bind(params.content)
            .bind(params.reward)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn update_spirit_post(
        &self,
        params: UpdateSpiritPostParams,
    ) -> Result<Option<SpiritPostRecord>, RepoError> {
        let sql = format!(
            "UPDATE spirit_posts \
             SET title = COALESCE($2, title), \
                 content = COALESCE($3, content), \
                 reward = COALESCE($4, reward), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {SPIRIT_POST_COLUMNS}"
        );
        let row = sqlx::query_as::<_, SpiritPostRow>(&sql)
            .bind(params.id)
            .bind(params.title)
            .bind(params.content)
            .bind(params.reward)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(SpiritPostRecord::from))
    }

    async fn claim_spirit_post(
        &self,
        id: i64,
        claimant_id: i64,
    ) -> Result<Option<SpiritPostRecord>, RepoError> {
        // Only an unclaimed row matches, so the loser of a race gets no row back.
        let sql = format!(
            "UPDATE spirit_posts \
             SET claimed_by = $2, claimed_at = now(), updated_at = now() \
             WHERE id = $1 AND claimed_by IS NULL \
             RETURNING {SPIRIT_POST_COLUMNS}"
        );
        let row = sqlx::query_as::<_, SpiritPostRow>(&sql)
            .bind(id)
            .bind(claimant_id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(SpiritPostRecord::from))
    }
}
