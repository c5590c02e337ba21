use std::sync::Arc;

use crate::application::admin::sensitive_words::AdminSensitiveWordService;
use crate::application::content::{
    creators::CreatorService, messages::MessageService, notes::NoteService, posts::PostService,
    resources::ResourceService, spirit_posts::SpiritPostService,
};
use crate::cache::SensitiveWordCache;
use crate::infra::db::PostgresRepositories;

#[derive(Clone)]
pub struct ApiState {
    pub sensitive_words: Arc<AdminSensitiveWordService>,
    pub cache: Arc<SensitiveWordCache>,
    pub posts: Arc<PostService>,
    pub notes: Arc<NoteService>,
    pub spirit_posts: Arc<SpiritPostService>,
    pub resources: Arc<ResourceService>,
    pub creators: Arc<CreatorService>,
    pub messages: Arc<MessageService>,
    pub admin_token: Option<Arc<str>>,
    pub db: Option<Arc<PostgresRepositories>>,
}

impl ApiState {
    /// Actor recorded in logs for requests authenticated by the admin token.
    pub const ADMIN_ACTOR: &'static str = "admin_token";
}
