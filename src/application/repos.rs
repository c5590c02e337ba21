//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{
    CreatorProfileRecord, MessageRecord, NoteRecord, PostRecord, ResourceRecord,
    SensitiveWordRecord, SpiritPostRecord,
};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

// ----- Word store -----

#[async_trait]
pub trait SensitiveWordsRepo: Send + Sync {
    /// Every stored word, ordered by id.
    async fn list_all(&self) -> Result<Vec<SensitiveWordRecord>, RepoError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<SensitiveWordRecord>, RepoError>;

    async fn find_by_word(&self, word: &str) -> Result<Option<SensitiveWordRecord>, RepoError>;
}

#[async_trait]
pub trait SensitiveWordsWriteRepo: Send + Sync {
    async fn create_word(&self, word: &str) -> Result<SensitiveWordRecord, RepoError>;

    /// Returns `false` when no row carried the id.
    async fn delete_word(&self, id: i64) -> Result<bool, RepoError>;
}

// ----- Posts -----

#[derive(Debug, Clone)]
pub struct CreatePostParams {
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePostParams {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub prompt: Option<String>,
}

#[async_trait]
pub trait PostsWriteRepo: Send + Sync {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError>;

    /// Applies only the `Some` fields. `Ok(None)` when the post does not exist.
    async fn update_post(&self, params: UpdatePostParams)
    -> Result<Option<PostRecord>, RepoError>;
}

// ----- Notes -----

#[derive(Debug, Clone)]
pub struct CreateNoteParams {
    pub author_id: i64,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateNoteParams {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
}

#[async_trait]
pub trait NotesWriteRepo: Send + Sync {
    async fn create_note(&self, params: CreateNoteParams) -> Result<NoteRecord, RepoError>;

    async fn update_note(&self, params: UpdateNoteParams)
    -> Result<Option<NoteRecord>, RepoError>;
}

// ----- Spirit posts -----

#[derive(Debug, Clone)]
pub struct CreateSpiritPostParams {
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub reward: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateSpiritPostParams {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub reward: Option<i64>,
}

#[async_trait]
pub trait SpiritPostsRepo: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<SpiritPostRecord>, RepoError>;
}

#[async_trait]
pub trait SpiritPostsWriteRepo: Send + Sync {
    async fn create_spirit_post(
        &self,
        params: CreateSpiritPostParams,
    ) -> Result<SpiritPostRecord, RepoError>;

    async fn update_spirit_post(
        &self,
        params: UpdateSpiritPostParams,
    ) -> Result<Option<SpiritPostRecord>, RepoError>;

    /// Marks the post as claimed unless someone got there first.
    /// `Ok(None)` when the post is missing or already claimed.
    async fn claim_spirit_post(
        &self,
        id: i64,
        claimant_id: i64,
    ) -> Result<Option<SpiritPostRecord>, RepoError>;
}

// ----- Resources -----

#[derive(Debug, Clone)]
pub struct CreateResourceParams {
    pub author_id: i64,
    pub title: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateResourceParams {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

#[async_trait]
pub trait ResourcesWriteRepo: Send + Sync {
    async fn create_resource(
        &self,
        params: CreateResourceParams,
    ) -> Result<ResourceRecord, RepoError>;

    async fn update_resource(
        &self,
        params: UpdateResourceParams,
    ) -> Result<Option<ResourceRecord>, RepoError>;
}

// ----- Creator profiles -----

#[derive(Debug, Clone)]
pub struct UpsertCreatorProfileParams {
    pub user_id: i64,
    pub display_name: String,
    pub bio: Option<String>,
    pub expertise: Option<String>,
}

#[async_trait]
pub trait CreatorsWriteRepo: Send + Sync {
    async fn upsert_profile(
        &self,
        params: UpsertCreatorProfileParams,
    ) -> Result<CreatorProfileRecord, RepoError>;
}

// ----- Messages -----

#[derive(Debug, Clone)]
pub struct CreateMessageParams {
    pub sender_id: i64,
    pub recipient_id: i64,
    pub content: String,
    pub spirit_post_id: Option<i64>,
}

#[async_trait]
pub trait MessagesWriteRepo: Send + Sync {
    async fn create_message(&self, params: CreateMessageParams)
    -> Result<MessageRecord, RepoError>;
}
