use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    application::repos::{CreatorsWriteRepo, RepoError, UpsertCreatorProfileParams},
    domain::entities::CreatorProfileRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct CreatorProfileRow {
    user_id: i64,
    display_name: String,
    bio: Option<String>,
    expertise: Option<String>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<CreatorProfileRow> for CreatorProfileRecord {
    fn from(row: CreatorProfileRow) -> Self {
        Self {
            user_id: row.user_id,
            display_name: row.display_name,
            bio: row.bio,
            expertise: row.expertise,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CreatorsWriteRepo for PostgresRepositories {
    async fn upsert_profile(
        &self,
        params: UpsertCreatorProfileParams,
    ) -> Result<CreatorProfileRecord, RepoError> {
        let row = sqlx::query_as::<_, CreatorProfileRow>(
            r#"
            INSERT INTO creator_profiles (user_id, display_name, bio, expertise)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE
            SET display_name = EXCLUDED.display_name,
                bio = EXCLUDED.bio,
                expertise = EXCLUDED.expertise,
                updated_at = now()
            RETURNING user_id, display_name, bio, expertise, created_at, updated_at
            "#,
        )
        .bind(params.user_id)
        .bind(params.display_name)
        .bind(params.bio)
        .bind(params.expertise)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }
}
