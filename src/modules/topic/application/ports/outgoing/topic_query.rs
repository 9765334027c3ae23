use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::topic::application::domain::entities::TopicListFilter;

/// Read-only projection used by the listing endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSummary {
    pub id: i64,
    pub name: String,
    pub logo: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum TopicQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait TopicQuery: Send + Sync {
    /// Exact, case-sensitive match on the topic name.
    async fn name_exists(&self, name: &str) -> Result<bool, TopicQueryError>;

    async fn list_topics(
        &self,
        filter: &TopicListFilter,
    ) -> Result<Vec<TopicSummary>, TopicQueryError>;
}
