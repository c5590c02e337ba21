use std::sync::Arc;

use crate::application::moderation::{ModeratedDraft, ModerationGuard};
use crate::application::repos::{CreateResourceParams, ResourcesWriteRepo, UpdateResourceParams};
use crate::domain::entities::ResourceRecord;

use super::{ContentError, changed_text, required_text};

#[derive(Debug, Clone)]
pub struct CreateResourceCommand {
    pub author_id: i64,
    pub title: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateResourceCommand {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

// The url is a link, not prose, and is left out of screening.
impl ModeratedDraft for CreateResourceParams {
    fn moderated_texts(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }
}

impl ModeratedDraft for UpdateResourceParams {
    fn moderated_texts(&self) -> Vec<&str> {
        [&self.title, &self.description]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .collect()
    }
}

fn checked_url(url: String) -> Result<String, ContentError> {
    let url = required_text(url, "url")?;
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url)
    } else {
        Err(ContentError::ConstraintViolation("url"))
    }
}

#[derive(Clone)]
pub struct ResourceService {
    writer: Arc<dyn ResourcesWriteRepo>,
    moderation: ModerationGuard,
}

impl ResourceService {
    pub fn new(writer: Arc<dyn ResourcesWriteRepo>, moderation: ModerationGuard) -> Self {
        Self { writer, moderation }
    }

    pub async fn create_resource(
        &self,
        command: CreateResourceCommand,
    ) -> Result<ResourceRecord, ContentError> {
        let params = CreateResourceParams {
            author_id: command.author_id,
            title: required_text(command.title, "title")?,
            description: required_text(command.description, "description")?,
            url: checked_url(command.url)?,
        };

        let writer = self.writer.clone();
        self.moderation
            .guard(params, move |params| async move {
                writer
                    .create_resource(params)
                    .await
                    .map_err(ContentError::from)
            })
            .await
    }

    pub async fn update_resource(
        &self,
        command: UpdateResourceCommand,
    ) -> Result<ResourceRecord, ContentError> {
        let params = UpdateResourceParams {
            id: command.id,
            title: changed_text(command.title, "title")?,
            description: changed_text(command.description, "description")?,
            url: command.url.map(checked_url).transpose()?,
        };
        if params.title.is_none() && params.description.is_none() && params.url.is_none() {
            return Err(ContentError::ConstraintViolation("update"));
        }

        let writer = self.writer.clone();
        self.moderation
            .guard(params, move |params| async move {
                writer
                    .update_resource(params)
                    .await
                    .map_err(ContentError::from)
                    .and_then(|resource| resource.ok_or(ContentError::NotFound))
            })
            .await
    }
}
