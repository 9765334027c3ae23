use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::multimedia::application::domain::entities::MediaAttachment;

// Input for the topic creation transaction
#[derive(Debug, Clone)]
pub struct CreateTopicData {
    pub creator: UserId,
    pub name: String,
    pub description: Option<String>,
    /// Attachment already checked as claimable; claimed inside the same transaction
    pub logo: Option<MediaAttachment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedTopic {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopicRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Topic \"{0}\" already exists")]
    NameTaken(String),

    #[error("Attachment {0} was claimed by someone else")]
    AttachmentAlreadyClaimed(i64),
}

#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// Inserts the topic, the creator's follow row and the logo claim atomically.
    async fn create_topic(&self, data: CreateTopicData)
        -> Result<CreatedTopic, TopicRepositoryError>;
}
