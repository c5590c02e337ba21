//! In-memory repositories shared by the integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use time::OffsetDateTime;

use linggan::application::admin::sensitive_words::AdminSensitiveWordService;
use linggan::application::content::{
    creators::CreatorService, messages::MessageService, notes::NoteService, posts::PostService,
    resources::ResourceService, spirit_posts::SpiritPostService,
};
use linggan::application::moderation::ModerationGuard;
use linggan::application::repos::{
    CreateMessageParams, CreateNoteParams, CreatePostParams, CreateResourceParams,
    CreateSpiritPostParams, CreatorsWriteRepo, MessagesWriteRepo, NotesWriteRepo, PostsWriteRepo,
    RepoError, ResourcesWriteRepo, SensitiveWordsRepo, SensitiveWordsWriteRepo, SpiritPostsRepo,
    SpiritPostsWriteRepo, UpdateNoteParams, UpdatePostParams, UpdateResourceParams,
    UpdateSpiritPostParams, UpsertCreatorProfileParams,
};
use linggan::cache::{CacheConfig, ManualClock, SensitiveWordCache};
use linggan::domain::entities::{
    CreatorProfileRecord, MessageRecord, NoteRecord, PostRecord, ResourceRecord,
    SensitiveWordRecord, SpiritPostRecord,
};
use linggan::infra::http::ApiState;

/// A single in-memory store standing in for every Postgres repository.
#[derive(Default)]
pub struct MemoryStore {
    words: Mutex<Vec<SensitiveWordRecord>>,
    posts: Mutex<Vec<PostRecord>>,
    notes: Mutex<Vec<NoteRecord>>,
    spirit_posts: Mutex<Vec<SpiritPostRecord>>,
    resources: Mutex<Vec<ResourceRecord>>,
    profiles: Mutex<Vec<CreatorProfileRecord>>,
    messages: Mutex<Vec<MessageRecord>>,
    next_id: AtomicUsize,
    word_loads: AtomicUsize,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn seeded(words: &[&str]) -> Arc<Self> {
        let store = Self::default();
        {
            let mut rows = store.words.lock().unwrap();
            for word in words {
                let id = store.allocate_id();
                rows.push(SensitiveWordRecord {
                    id,
                    word: word.to_string(),
                });
            }
        }
        Arc::new(store)
    }

    /// Make every word-store read fail until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of full word-list loads served so far.
    pub fn word_loads(&self) -> usize {
        self.word_loads.load(Ordering::SeqCst)
    }

    pub fn word_rows(&self, word: &str) -> usize {
        self.words
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.word == word)
            .count()
    }

    pub fn word_id(&self, word: &str) -> Option<i64> {
        self.words
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.word == word)
            .map(|row| row.id)
    }

    pub fn post_count(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    pub fn message_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1
    }

    fn check_available(&self) -> Result<(), RepoError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepoError::from_persistence("word store unavailable"));
        }
        Ok(())
    }
}

fn now() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH
}

#[async_trait]
impl SensitiveWordsRepo for MemoryStore {
    async fn list_all(&self) -> Result<Vec<SensitiveWordRecord>, RepoError> {
        self.check_available()?;
        self.word_loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.words.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<SensitiveWordRecord>, RepoError> {
        self.check_available()?;
        Ok(self
            .words
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.id == id)
            .cloned())
    }

    async fn find_by_word(&self, word: &str) -> Result<Option<SensitiveWordRecord>, RepoError> {
        self.check_available()?;
        Ok(self
            .words
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.word == word)
            .cloned())
    }
}

#[async_trait]
impl SensitiveWordsWriteRepo for MemoryStore {
    async fn create_word(&self, word: &str) -> Result<SensitiveWordRecord, RepoError> {
        self.check_available()?;
        let mut rows = self.words.lock().unwrap();
        if rows.iter().any(|row| row.word == word) {
            return Err(RepoError::Duplicate {
                constraint: "sensitive_words_word_key".into(),
            });
        }
        let record = SensitiveWordRecord {
            id: self.allocate_id(),
            word: word.to_string(),
        };
        rows.push(record.clone());
        Ok(record)
    }

    async fn delete_word(&self, id: i64) -> Result<bool, RepoError> {
        self.check_available()?;
        let mut rows = self.words.lock().unwrap();
        let before = rows.len();
        rows.retain(|row| row.id != id);
        Ok(rows.len() != before)
    }
}

#[async_trait]
impl PostsWriteRepo for MemoryStore {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError> {
        let record = PostRecord {
            id: self.allocate_id(),
            author_id: params.author_id,
            title: params.title,
            content: params.content,
            prompt: params.prompt,
            created_at: now(),
            updated_at: now(),
        };
        self.posts.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_post(
        &self,
        params: UpdatePostParams,
    ) -> Result<Option<PostRecord>, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let Some(post) = posts.iter_mut().find(|post| post.id == params.id) else {
            return Ok(None);
        };
        if let Some(title) = params.title {
            post.title = title;
        }
        if let Some(content) = params.content {
            post.content = content;
        }
        if let Some(prompt) = params.prompt {
            post.prompt = Some(prompt);
        }
        Ok(Some(post.clone()))
    }
}

#[async_trait]
impl NotesWriteRepo for MemoryStore {
    async fn create_note(&self, params: CreateNoteParams) -> Result<NoteRecord, RepoError> {
        let record = NoteRecord {
            id: self.allocate_id(),
            author_id: params.author_id,
            title: params.title,
            content: params.content,
            created_at: now(),
            updated_at: now(),
        };
        self.notes.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_note(
        &self,
        params: UpdateNoteParams,
    ) -> Result<Option<NoteRecord>, RepoError> {
        let mut notes = self.notes.lock().unwrap();
        let Some(note) = notes.iter_mut().find(|note| note.id == params.id) else {
            return Ok(None);
        };
        if let Some(title) = params.title {
            note.title = title;
        }
        if let Some(content) = params.content {
            note.content = content;
        }
        Ok(Some(note.clone()))
    }
}

#[async_trait]
impl SpiritPostsRepo for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<SpiritPostRecord>, RepoError> {
        Ok(self
            .spirit_posts
            .lock()
            .unwrap()
            .iter()
            .find(|post| post.id == id)
            .cloned())
    }
}

#[async_trait]
impl SpiritPostsWriteRepo for MemoryStore {
    async fn create_spirit_post(
        &self,
        params: CreateSpiritPostParams,
    ) -> Result<SpiritPostRecord, RepoError> {
        let record = SpiritPostRecord {
            id: self.allocate_id(),
            author_id: params.author_id,
            title: params.title,
            content: params.content,
            reward: params.reward,
            claimed_by: None,
            claimed_at: None,
            created_at: now(),
            updated_at: now(),
        };
        self.spirit_posts.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_spirit_post(
        &self,
        params: UpdateSpiritPostParams,
    ) -> Result<Option<SpiritPostRecord>, RepoError> {
        let mut posts = self.spirit_posts.lock().unwrap();
        let Some(post) = posts.iter_mut().find(|post| post.id == params.id) else {
            return Ok(None);
        };
        if let Some(title) = params.title {
            post.title = title;
        }
        if let Some(content) = params.content {
            post.content = content;
        }
        if let Some(reward) = params.reward {
            post.reward = Some(reward);
        }
        Ok(Some(post.clone()))
    }

    async fn claim_spirit_post(
        &self,
        id: i64,
        claimant_id: i64,
    ) -> Result<Option<SpiritPostRecord>, RepoError> {
        let mut posts = self.spirit_posts.lock().unwrap();
        let Some(post) = posts
            .iter_mut()
            .find(|post| post.id == id && post.claimed_by.is_none())
        else {
            return Ok(None);
        };
        post.claimed_by = Some(claimant_id);
        post.claimed_at = Some(now());
        Ok(Some(post.clone()))
    }
}

#[async_trait]
impl ResourcesWriteRepo for MemoryStore {
    async fn create_resource(
        &self,
        params: CreateResourceParams,
    ) -> Result<ResourceRecord, RepoError> {
        let record = ResourceRecord {
            id: self.allocate_id(),
            author_id: params.author_id,
            title: params.title,
            description: params.description,
            url: params.url,
            created_at: now(),
            updated_at: now(),
        };
        self.resources.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_resource(
        &self,
        params: UpdateResourceParams,
    ) -> Result<Option<ResourceRecord>, RepoError> {
        let mut resources = self.resources.lock().unwrap();
        let Some(resource) = resources.iter_mut().find(|item| item.id == params.id) else {
            return Ok(None);
        };
        if let Some(title) = params.title {
            resource.title = title;
        }
        if let Some(description) = params.description {
            resource.description = description;
        }
        if let Some(url) = params.url {
            resource.url = url;
        }
        Ok(Some(resource.clone()))
    }
}

#[async_trait]
impl CreatorsWriteRepo for MemoryStore {
    async fn upsert_profile(
        &self,
        params: UpsertCreatorProfileParams,
    ) -> Result<CreatorProfileRecord, RepoError> {
        let record = CreatorProfileRecord {
            user_id: params.user_id,
            display_name: params.display_name,
            bio: params.bio,
            expertise: params.expertise,
            created_at: now(),
            updated_at: now(),
        };
        let mut profiles = self.profiles.lock().unwrap();
        profiles.retain(|profile| profile.user_id != record.user_id);
        profiles.push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl MessagesWriteRepo for MemoryStore {
    async fn create_message(
        &self,
        params: CreateMessageParams,
    ) -> Result<MessageRecord, RepoError> {
        let record = MessageRecord {
            id: self.allocate_id(),
            sender_id: params.sender_id,
            recipient_id: params.recipient_id,
            content: params.content,
            spirit_post_id: params.spirit_post_id,
            created_at: now(),
        };
        self.messages.lock().unwrap().push(record.clone());
        Ok(record)
    }
}

/// Cache over `store` driven by a manual clock.
pub fn cache_over(
    store: &Arc<MemoryStore>,
    staleness_seconds: u64,
) -> (Arc<SensitiveWordCache>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::default());
    let cache = Arc::new(SensitiveWordCache::new(
        &CacheConfig { staleness_seconds },
        store.clone(),
        clock.clone(),
    ));
    (cache, clock)
}

pub fn word_service(
    store: &Arc<MemoryStore>,
    cache: &Arc<SensitiveWordCache>,
) -> AdminSensitiveWordService {
    AdminSensitiveWordService::new(store.clone(), store.clone(), cache.clone())
}

/// Full API state over the in-memory store, wired like the composition root.
pub fn api_state(store: &Arc<MemoryStore>, admin_token: Option<&str>) -> ApiState {
    let (cache, _) = cache_over(store, 3600);
    let guard = ModerationGuard::new(cache.clone());

    ApiState {
        sensitive_words: Arc::new(word_service(store, &cache)),
        cache,
        posts: Arc::new(PostService::new(store.clone(), guard.clone())),
        notes: Arc::new(NoteService::new(store.clone(), guard.clone())),
        spirit_posts: Arc::new(SpiritPostService::new(
            store.clone(),
            store.clone(),
            guard.clone(),
        )),
        resources: Arc::new(ResourceService::new(store.clone(), guard.clone())),
        creators: Arc::new(CreatorService::new(store.clone(), guard.clone())),
        messages: Arc::new(MessageService::new(store.clone(), guard)),
        admin_token: admin_token.map(Arc::<str>::from),
        db: None,
    }
}
