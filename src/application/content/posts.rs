use std::sync::Arc;

use crate::application::moderation::{ModeratedDraft, ModerationGuard};
use crate::application::repos::{CreatePostParams, PostsWriteRepo, UpdatePostParams};
use crate::domain::entities::PostRecord;

use super::{ContentError, changed_text, optional_text, required_text};

#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePostCommand {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub prompt: Option<String>,
}

impl ModeratedDraft for CreatePostParams {
    fn moderated_texts(&self) -> Vec<&str> {
        let mut texts = vec![self.title.as_str(), self.content.as_str()];
        texts.extend(self.prompt.as_deref());
        texts
    }
}

impl ModeratedDraft for UpdatePostParams {
    fn moderated_texts(&self) -> Vec<&str> {
        [&self.title, &self.content, &self.prompt]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .collect()
    }
}

#[derive(Clone)]
pub struct PostService {
    writer: Arc<dyn PostsWriteRepo>,
    moderation: ModerationGuard,
}

impl PostService {
    pub fn new(writer: Arc<dyn PostsWriteRepo>, moderation: ModerationGuard) -> Self {
        Self { writer, moderation }
    }

    pub async fn create_post(&self, command: CreatePostCommand) -> Result<PostRecord, ContentError> {
        let params = CreatePostParams {
            author_id: command.author_id,
            title: required_text(command.title, "title")?,
            content: required_text(command.content, "content")?,
            prompt: optional_text(command.prompt),
        };

        let writer = self.writer.clone();
        self.moderation
            .guard(params, move |params| async move {
                writer.create_post(params).await.map_err(ContentError::from)
            })
            .await
    }

    pub async fn update_post(&self, command: UpdatePostCommand) -> Result<PostRecord, ContentError> {
        let params = UpdatePostParams {
            id: command.id,
            title: changed_text(command.title, "title")?,
            content: changed_text(command.content, "content")?,
            prompt: changed_text(command.prompt, "prompt")?,
        };
        if params.title.is_none() && params.content.is_none() && params.prompt.is_none() {
            return Err(ContentError::ConstraintViolation("update"));
        }

        let writer = self.writer.clone();
        self.moderation
            .guard(params, move |params| async move {
                writer
                    .update_post(params)
                    .await
                    .map_err(ContentError::from)
                    .and_then(|post| post.ok_or(ContentError::NotFound))
            })
            .await
    }
}
