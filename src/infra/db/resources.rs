use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    application::repos::{
        CreateResourceParams, RepoError, ResourcesWriteRepo, UpdateResourceParams,
    },
    domain::entities::ResourceRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct ResourceRow {
    id: i64,
    author_id: i64,
    title: String,
    description: String,
    url: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<ResourceRow> for ResourceRecord {
    fn from(row: ResourceRow) -> Self {
        Self {
            id: row.id,
            author_id: row.author_id,
            title: row.title,
            description: row.description,
            url: row.url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ResourcesWriteRepo for PostgresRepositories {
    async fn create_resource(
        &self,
        params: CreateResourceParams,
    ) -> Result<ResourceRecord, RepoError> {
        let row = sqlx::query_as::<_, ResourceRow>(
            r#"
            INSERT INTO resources (author_id, title, description, url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, author_id, title, description, url, created_at, updated_at
            "#,
        )
        .bind(params.author_id)
        .bind(params.title)
        .bind(params.description)
        .bind(params.url)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn update_resource(
        &self,
        params: UpdateResourceParams,
    ) -> Result<Option<ResourceRecord>, RepoError> {
        let row = sqlx::query_as::<_, ResourceRow>(
            r#"
            UPDATE resources
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                url = COALESCE($4, url),
                updated_at = now()
            WHERE id = $1
            RETURNING id, author_id, title, description, url, created_at, updated_at
            "#,
        )
        .bind(params.id)
        .bind(params.title)
        .bind(params.description)
        .bind(params.url)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(ResourceRecord::from))
    }
}
