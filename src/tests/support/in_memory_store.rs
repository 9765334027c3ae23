use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::BTreeMap;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use crate::auth::application::domain::entities::UserId;
use crate::multimedia::application::{
    domain::entities::{AttachableKind, MediaAttachment},
    ports::outgoing::db::{AttachmentQuery, AttachmentQueryError},
};
use crate::topic::application::{
    domain::entities::{ListDirection, TopicListFilter},
    ports::outgoing::{
        CreateTopicData, CreatedTopic, TopicQuery, TopicQueryError, TopicRepository,
        TopicRepositoryError, TopicSummary,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTopic {
    pub id: i64,
    pub name: String,
    pub logo: Option<i64>,
    pub description: Option<String>,
    pub creator_user_id: i64,
    pub followers_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Step of the creation transaction that should fail on the next write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    TopicInsert,
    FollowerInsert,
    AttachmentClaim,
    Commit,
}

#[derive(Debug, Clone, Default)]
struct StoreState {
    topics: Vec<StoredTopic>,
    followers: Vec<(i64, i64)>,
    attachments: BTreeMap<i64, MediaAttachment>,
    last_topic_id: i64,
}

/// Transactional fake of the topic tables.
///
/// Writes go to a copy of the state that replaces the committed state only
/// when every step succeeded, so a failed transaction leaves nothing behind.
#[derive(Clone, Default)]
pub struct InMemoryTopicStore {
    state: Arc<Mutex<StoreState>>,
    fail_at: Arc<Mutex<Option<FailAt>>>,
    stale_name_check: Arc<Mutex<bool>>,
    claim_after_lookup: Arc<Mutex<Option<AttachableKind>>>,
    storage_calls: Arc<AtomicUsize>,
}

impl InMemoryTopicStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attachment(self, attachment: MediaAttachment) -> Self {
        self.state
            .lock()
            .unwrap()
            .attachments
            .insert(attachment.id, attachment);
        self
    }

    pub fn with_topic(self, name: &str, creator: i64) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.last_topic_id += 1;
            let id = state.last_topic_id;
            state.topics.push(StoredTopic {
                id,
                name: name.to_string(),
                logo: None,
                description: None,
                creator_user_id: creator,
                followers_count: 1,
                created_at: fixed_time(id),
            });
            state.followers.push((id, creator));
        }
        self
    }

    pub fn fail_at(&self, step: FailAt) {
        *self.fail_at.lock().unwrap() = Some(step);
    }

    /// Makes `name_exists` miss every topic, as if a concurrent request
    /// committed the same name right after the pre-check ran.
    pub fn stale_name_check(&self) {
        *self.stale_name_check.lock().unwrap() = true;
    }

    /// Lets the next attachment lookup see the row unclaimed, then claims it for
    /// `kind` before the creation transaction runs.
    pub fn claim_after_lookup(&self, kind: AttachableKind) {
        *self.claim_after_lookup.lock().unwrap() = Some(kind);
    }

    pub fn topics(&self) -> Vec<StoredTopic> {
        self.state.lock().unwrap().topics.clone()
    }

    pub fn followers_of(&self, topic_id: i64) -> Vec<i64> {
        self.state
            .lock()
            .unwrap()
            .followers
            .iter()
            .filter(|(t, _)| *t == topic_id)
            .map(|(_, u)| *u)
            .collect()
    }

    pub fn attachment(&self, id: i64) -> Option<MediaAttachment> {
        self.state.lock().unwrap().attachments.get(&id).cloned()
    }

    pub fn storage_calls(&self) -> usize {
        self.storage_calls.load(Ordering::SeqCst)
    }

    fn take_failure(&self, step: FailAt) -> Result<(), TopicRepositoryError> {
        let mut fail_at = self.fail_at.lock().unwrap();
        if *fail_at == Some(step) {
            *fail_at = None;
            return Err(TopicRepositoryError::DatabaseError(format!(
                "injected failure at {:?}",
                step
            )));
        }
        Ok(())
    }

    fn write_topic(
        &self,
        working: &mut StoreState,
        data: &CreateTopicData,
    ) -> Result<i64, TopicRepositoryError> {
        self.take_failure(FailAt::TopicInsert)?;
        if working.topics.iter().any(|t| t.name == data.name) {
            return Err(TopicRepositoryError::NameTaken(data.name.clone()));
        }
        working.last_topic_id += 1;
        let topic_id = working.last_topic_id;
        working.topics.push(StoredTopic {
            id: topic_id,
            name: data.name.clone(),
            logo: data.logo.as_ref().map(|a| a.id),
            description: data.description.clone(),
            creator_user_id: data.creator.value(),
            followers_count: 1,
            created_at: fixed_time(topic_id),
        });

        self.take_failure(FailAt::FollowerInsert)?;
        working.followers.push((topic_id, data.creator.value()));

        if let Some(logo) = &data.logo {
            self.take_failure(FailAt::AttachmentClaim)?;
            let row = working
                .attachments
                .get_mut(&logo.id)
                .filter(|row| !row.is_claimed())
                .ok_or(TopicRepositoryError::AttachmentAlreadyClaimed(logo.id))?;
            row.channel = Some(AttachableKind::Topic.tag().to_string());
            row.raw_reference_id = Some(topic_id);
            row.owner = data.creator;
        }

        self.take_failure(FailAt::Commit)?;
        Ok(topic_id)
    }
}

fn fixed_time(offset_minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(offset_minutes)
}

#[async_trait]
impl TopicQuery for InMemoryTopicStore {
    async fn name_exists(&self, name: &str) -> Result<bool, TopicQueryError> {
        self.storage_calls.fetch_add(1, Ordering::SeqCst);
        if *self.stale_name_check.lock().unwrap() {
            return Ok(false);
        }
        Ok(self
            .state
            .lock()
            .unwrap()
            .topics
            .iter()
            .any(|t| t.name == name))
    }

    async fn list_topics(
        &self,
        filter: &TopicListFilter,
    ) -> Result<Vec<TopicSummary>, TopicQueryError> {
        self.storage_calls.fetch_add(1, Ordering::SeqCst);
        let mut topics: Vec<StoredTopic> = self
            .topics()
            .into_iter()
            .filter(|t| {
                filter.search().map_or(true, |q| {
                    t.name.to_lowercase().contains(&q.to_lowercase())
                })
            })
            .filter(|t| match (filter.cursor(), filter.direction()) {
                (None, _) => true,
                (Some(cursor), ListDirection::Desc) => t.id < cursor,
                (Some(cursor), ListDirection::Asc) => t.id > cursor,
            })
            .collect();

        topics.sort_by_key(|t| t.id);
        if filter.direction() == ListDirection::Desc {
            topics.reverse();
        }

        Ok(topics
            .into_iter()
            .take(filter.limit() as usize)
            .map(|t| TopicSummary {
                id: t.id,
                name: t.name,
                logo: t.logo,
                created_at: t.created_at,
            })
            .collect())
    }
}

#[async_trait]
impl TopicRepository for InMemoryTopicStore {
    async fn create_topic(
        &self,
        data: CreateTopicData,
    ) -> Result<CreatedTopic, TopicRepositoryError> {
        self.storage_calls.fetch_add(1, Ordering::SeqCst);

        let mut working = self.state.lock().unwrap().clone();
        let topic_id = self.write_topic(&mut working, &data)?;
        *self.state.lock().unwrap() = working;

        Ok(CreatedTopic { id: topic_id })
    }
}

#[async_trait]
impl AttachmentQuery for InMemoryTopicStore {
    async fn find_attachment(
        &self,
        attachment_id: i64,
    ) -> Result<Option<MediaAttachment>, AttachmentQueryError> {
        self.storage_calls.fetch_add(1, Ordering::SeqCst);

        let mut state = self.state.lock().unwrap();
        let found = state.attachments.get(&attachment_id).cloned();

        if let Some(kind) = self.claim_after_lookup.lock().unwrap().take() {
            if let Some(row) = state.attachments.get_mut(&attachment_id) {
                row.channel = Some(kind.tag().to_string());
                row.raw_reference_id = Some(1_000);
                row.owner = UserId::from(999);
            }
        }

        Ok(found)
    }
}
