use std::sync::Arc;

use crate::application::moderation::{ModeratedDraft, ModerationGuard};
use crate::application::repos::{CreatorsWriteRepo, UpsertCreatorProfileParams};
use crate::domain::entities::CreatorProfileRecord;

use super::{ContentError, optional_text, required_text};

#[derive(Debug, Clone)]
pub struct UpsertCreatorProfileCommand {
    pub user_id: i64,
    pub display_name: String,
    pub bio: Option<String>,
    pub expertise: Option<String>,
}

impl ModeratedDraft for UpsertCreatorProfileParams {
    fn moderated_texts(&self) -> Vec<&str> {
        let mut texts = vec![self.display_name.as_str()];
        texts.extend(self.bio.as_deref());
        texts.extend(self.expertise.as_deref());
        texts
    }
}

#[derive(Clone)]
pub struct CreatorService {
    writer: Arc<dyn CreatorsWriteRepo>,
    moderation: ModerationGuard,
}

impl CreatorService {
    pub fn new(writer: Arc<dyn CreatorsWriteRepo>, moderation: ModerationGuard) -> Self {
        Self { writer, moderation }
    }

    /// Create the profile or replace every field of an existing one.
    pub async fn upsert_profile(
        &self,
        command: UpsertCreatorProfileCommand,
    ) -> Result<CreatorProfileRecord, ContentError> {
        let params = UpsertCreatorProfileParams {
            user_id: command.user_id,
            display_name: required_text(command.display_name, "display_name")?,
            bio: optional_text(command.bio),
            expertise: optional_text(command.expertise),
        };

        let writer = self.writer.clone();
        self.moderation
            .guard(params, move |params| async move {
                writer.upsert_profile(params).await.map_err(ContentError::from)
            })
            .await
    }
}
