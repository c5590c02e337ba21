use serde::{Deserialize, Serialize};

use crate::domain::entities::SensitiveWordRecord;

#[derive(Debug, Deserialize, Serialize)]
pub struct SensitiveWordCreateRequest {
    pub word: String,
}

#[derive(Debug, Serialize)]
pub struct SensitiveWordListResponse {
    pub words: Vec<SensitiveWordRecord>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ModerationCheckRequest {
    pub texts: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PostCreateRequest {
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub prompt: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PostUpdateRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub prompt: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct NoteCreateRequest {
    pub author_id: i64,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NoteUpdateRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SpiritPostCreateRequest {
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub reward: Option<i64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SpiritPostUpdateRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub reward: Option<i64>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SpiritPostClaimRequest {
    pub claimant_id: i64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ResourceCreateRequest {
    pub author_id: i64,
    pub title: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ResourceUpdateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreatorProfileRequest {
    pub display_name: String,
    pub bio: Option<String>,
    pub expertise: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MessageCreateRequest {
    pub sender_id: i64,
    pub recipient_id: i64,
    pub content: String,
    pub spirit_post_id: Option<i64>,
}
