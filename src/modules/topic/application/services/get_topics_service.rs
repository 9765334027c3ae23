use async_trait::async_trait;

use crate::topic::application::{
    domain::entities::TopicListFilter,
    ports::incoming::use_cases::{GetTopicsError, GetTopicsUseCase},
    ports::outgoing::{TopicQuery, TopicSummary},
};

#[derive(Debug, Clone)]
pub struct GetTopicsService<Q>
where
    Q: TopicQuery + Send + Sync,
{
    query: Q,
}

impl<Q> GetTopicsService<Q>
where
    Q: TopicQuery + Send + Sync,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> GetTopicsUseCase for GetTopicsService<Q>
where
    Q: TopicQuery + Send + Sync,
{
    async fn execute(&self, filter: TopicListFilter) -> Result<Vec<TopicSummary>, GetTopicsError> {
        self.query.list_topics(&filter).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to list topics");
            GetTopicsError::QueryFailed(e.to_string())
        })
    }
}
