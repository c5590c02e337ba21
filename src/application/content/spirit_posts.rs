//! Spirit posts: requests for inspiration that another creator can claim.

use std::sync::Arc;

use tracing::info;

use crate::application::moderation::{ModeratedDraft, ModerationGuard};
use crate::application::repos::{
    CreateSpiritPostParams, SpiritPostsRepo, SpiritPostsWriteRepo, UpdateSpiritPostParams,
};
use crate::domain::entities::SpiritPostRecord;

use super::{ContentError, changed_text, required_text};

#[derive(Debug, Clone)]
pub struct CreateSpiritPostCommand {
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub reward: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateSpiritPostCommand {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub reward: Option<i64>,
}

impl ModeratedDraft for CreateSpiritPostParams {
    fn moderated_texts(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.content.as_str()]
    }
}

impl ModeratedDraft for UpdateSpiritPostParams {
    fn moderated_texts(&self) -> Vec<&str> {
        [&self.title, &self.content]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .collect()
    }
}

fn checked_reward(reward: Option<i64>) -> Result<Option<i64>, ContentError> {
    match reward {
        Some(value) if value < 0 => Err(ContentError::ConstraintViolation("reward")),
        other => Ok(other),
    }
}

#[derive(Clone)]
pub struct SpiritPostService {
    reader: Arc<dyn SpiritPostsRepo>,
    writer: Arc<dyn SpiritPostsWriteRepo>,
    moderation: ModerationGuard,
}

impl SpiritPostService {
    pub fn new(
        reader: Arc<dyn SpiritPostsRepo>,
        writer: Arc<dyn SpiritPostsWriteRepo>,
        moderation: ModerationGuard,
    ) -> Self {
        Self {
            reader,
            writer,
            moderation,
        }
    }

    pub async fn create_spirit_post(
        &self,
        command: CreateSpiritPostCommand,
    ) -> Result<SpiritPostRecord, ContentError> {
        let params = CreateSpiritPostParams {
            author_id: command.author_id,
            title: required_text(command.title, "title")?,
            content: required_text(command.content, "content")?,
            reward: checked_reward(command.reward)?,
        };

        let writer = self.writer.clone();
        self.moderation
            .guard(params, move |params| async move {
                writer
                    .create_spirit_post(params)
                    .await
                    .map_err(ContentError::from)
            })
            .await
    }

    pub async fn update_spirit_post(
        &self,
        command: UpdateSpiritPostCommand,
    ) -> Result<SpiritPostRecord, ContentError> {
        let params = UpdateSpiritPostParams {
            id: command.id,
            title: changed_text(command.title, "title")?,
            content: changed_text(command.content, "content")?,
            reward: checked_reward(command.reward)?,
        };
        if params.title.is_none() && params.content.is_none() && params.reward.is_none() {
            return Err(ContentError::ConstraintViolation("update"));
        }

        let writer = self.writer.clone();
        self.moderation
            .guard(params, move |params| async move {
                writer
                    .update_spirit_post(params)
                    .await
                    .map_err(ContentError::from)
                    .and_then(|post| post.ok_or(ContentError::NotFound))
            })
            .await
    }

    /// Claims carry no free text, so they skip moderation.
    pub async fn claim_spirit_post(
        &self,
        id: i64,
        claimant_id: i64,
    ) -> Result<SpiritPostRecord, ContentError> {
        let post = self
            .reader
            .find_by_id(id)
            .await?
            .ok_or(ContentError::NotFound)?;

        if post.author_id == claimant_id {
            return Err(ContentError::ConstraintViolation("claimant_id"));
        }
        if post.is_claimed() {
            return Err(ContentError::AlreadyClaimed);
        }

        let claimed = self
            .writer
            .claim_spirit_post(id, claimant_id)
            .await?
            .ok_or(ContentError::AlreadyClaimed)?;

        info!(
            target = "linggan::content::spirit_posts",
            id,
            claimant_id,
            "Spirit post claimed"
        );
        Ok(claimed)
    }
}
