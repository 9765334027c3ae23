use async_trait::async_trait;

use crate::multimedia::application::{
    ports::outgoing::db::AttachmentQuery,
    services::{AttachmentGuard, AttachmentGuardError},
};
use crate::topic::application::ports::{
    incoming::use_cases::{CreateTopicCommand, CreateTopicError, CreateTopicUseCase},
    outgoing::{CreateTopicData, CreatedTopic, TopicQuery, TopicRepository, TopicRepositoryError},
};

/// Creates a topic: logo guard, name pre-check, then the atomic write.
#[derive(Debug, Clone)]
pub struct CreateTopicService<Q, R, A>
where
    Q: TopicQuery + Send + Sync,
    R: TopicRepository + Send + Sync,
    A: AttachmentQuery + Send + Sync,
{
    query: Q,
    repository: R,
    attachment_guard: AttachmentGuard<A>,
}

impl<Q, R, A> CreateTopicService<Q, R, A>
where
    Q: TopicQuery + Send + Sync,
    R: TopicRepository + Send + Sync,
    A: AttachmentQuery + Send + Sync,
{
    pub fn new(query: Q, repository: R, attachments: A) -> Self {
        Self {
            query,
            repository,
            attachment_guard: AttachmentGuard::new(attachments),
        }
    }
}

#[async_trait]
impl<Q, R, A> CreateTopicUseCase for CreateTopicService<Q, R, A>
where
    Q: TopicQuery + Send + Sync,
    R: TopicRepository + Send + Sync,
    A: AttachmentQuery + Send + Sync,
{
    async fn execute(&self, command: CreateTopicCommand) -> Result<CreatedTopic, CreateTopicError> {
        let logo = self
            .attachment_guard
            .resolve_claimable(command.logo())
            .await
            .map_err(|e| match e {
                AttachmentGuardError::NotFound(id) => CreateTopicError::LogoNotFound(id),
                AttachmentGuardError::AlreadyClaimed(id) => CreateTopicError::LogoNotUsable(id),
                AttachmentGuardError::QueryFailed(msg) => CreateTopicError::RepositoryError(msg),
            })?;

        let taken = self
            .query
            .name_exists(command.name())
            .await
            .map_err(|e| CreateTopicError::RepositoryError(e.to_string()))?;

        if taken {
            tracing::warn!(name = %command.name(), "Topic name already taken");
            return Err(CreateTopicError::NameTaken(command.name().to_string()));
        }

        let data = CreateTopicData {
            creator: command.creator(),
            name: command.name().to_string(),
            description: command.description().map(str::to_string),
            logo,
        };

        let created = self
            .repository
            .create_topic(data)
            .await
            .map_err(|e| match e {
                TopicRepositoryError::NameTaken(name) => CreateTopicError::NameTaken(name),
                TopicRepositoryError::AttachmentAlreadyClaimed(id) => {
                    CreateTopicError::LogoNotUsable(id)
                }
                TopicRepositoryError::DatabaseError(msg) => {
                    tracing::error!(error = %msg, "Topic creation transaction failed");
                    CreateTopicError::RepositoryError(msg)
                }
            })?;

        tracing::info!(
            topic_id = created.id,
            creator = %command.creator(),
            "Topic created"
        );

        Ok(created)
    }
}
