use std::sync::Arc;

use crate::application::moderation::{ModeratedDraft, ModerationGuard};
use crate::application::repos::{CreateMessageParams, MessagesWriteRepo};
use crate::domain::entities::MessageRecord;

use super::{ContentError, required_text};

#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub sender_id: i64,
    pub recipient_id: i64,
    pub content: String,
    pub spirit_post_id: Option<i64>,
}

impl ModeratedDraft for CreateMessageParams {
    fn moderated_texts(&self) -> Vec<&str> {
        vec![self.content.as_str()]
    }
}

#[derive(Clone)]
pub struct MessageService {
    writer: Arc<dyn MessagesWriteRepo>,
    moderation: ModerationGuard,
}

impl MessageService {
    pub fn new(writer: Arc<dyn MessagesWriteRepo>, moderation: ModerationGuard) -> Self {
        Self { writer, moderation }
    }

    pub async fn send_message(
        &self,
        command: SendMessageCommand,
    ) -> Result<MessageRecord, ContentError> {
        if command.sender_id == command.recipient_id {
            return Err(ContentError::ConstraintViolation("recipient_id"));
        }

        let params = CreateMessageParams {
            sender_id: command.sender_id,
            recipient_id: command.recipient_id,
            content: required_text(command.content, "content")?,
            spirit_post_id: command.spirit_post_id,
        };

        let writer = self.writer.clone();
        self.moderation
            .guard(params, move |params| async move {
                writer.create_message(params).await.map_err(ContentError::from)
            })
            .await
    }
}
