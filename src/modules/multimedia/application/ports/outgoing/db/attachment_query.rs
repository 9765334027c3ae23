use async_trait::async_trait;

use crate::multimedia::application::domain::entities::MediaAttachment;

#[derive(Debug, Clone, thiserror::Error)]
pub enum AttachmentQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait AttachmentQuery: Send + Sync {
    /// `Ok(None)` when no attachment has this id.
    async fn find_attachment(
        &self,
        attachment_id: i64,
    ) -> Result<Option<MediaAttachment>, AttachmentQueryError>;
}
