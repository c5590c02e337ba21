use std::sync::Arc;

use crate::application::moderation::{ModeratedDraft, ModerationGuard};
use crate::application::repos::{CreateNoteParams, NotesWriteRepo, UpdateNoteParams};
use crate::domain::entities::NoteRecord;

use super::{ContentError, changed_text, required_text};

#[derive(Debug, Clone)]
pub struct CreateNoteCommand {
    pub author_id: i64,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateNoteCommand {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl ModeratedDraft for CreateNoteParams {
    fn moderated_texts(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.content.as_str()]
    }
}

impl ModeratedDraft for UpdateNoteParams {
    fn moderated_texts(&self) -> Vec<&str> {
        [&self.title, &self.content]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .collect()
    }
}

#[derive(Clone)]
pub struct NoteService {
    writer: Arc<dyn NotesWriteRepo>,
    moderation: ModerationGuard,
}

impl NoteService {
    pub fn new(writer: Arc<dyn NotesWriteRepo>, moderation: ModerationGuard) -> Self {
        Self { writer, moderation }
    }

    pub async fn create_note(&self, command: CreateNoteCommand) -> Result<NoteRecord, ContentError> {
        let params = CreateNoteParams {
            author_id: command.author_id,
            title: required_text(command.title, "title")?,
            content: required_text(command.content, "content")?,
        };

        let writer = self.writer.clone();
        self.moderation
            .guard(params, move |params| async move {
                writer.create_note(params).await.map_err(ContentError::from)
            })
            .await
    }

    pub async fn update_note(&self, command: UpdateNoteCommand) -> Result<NoteRecord, ContentError> {
        let params = UpdateNoteParams {
            id: command.id,
            title: changed_text(command.title, "title")?,
            content: changed_text(command.content, "content")?,
        };
        if params.title.is_none() && params.content.is_none() {
            return Err(ContentError::ConstraintViolation("update"));
        }

        let writer = self.writer.clone();
        self.moderation
            .guard(params, move |params| async move {
                writer
                    .update_note(params)
                    .await
                    .map_err(ContentError::from)
                    .and_then(|note| note.ok_or(ContentError::NotFound))
            })
            .await
    }
}
