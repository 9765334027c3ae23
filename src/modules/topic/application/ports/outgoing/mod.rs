mod topic_query;
mod topic_repository;

pub use topic_query::{TopicQuery, TopicQueryError, TopicSummary};
pub use topic_repository::{CreateTopicData, CreatedTopic, TopicRepository, TopicRepositoryError};
