use crate::multimedia::application::{
    domain::entities::MediaAttachment, ports::outgoing::db::AttachmentQuery,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachmentGuardError {
    #[error("Attachment {0} not found")]
    NotFound(i64),

    #[error("Attachment {0} is already in use")]
    AlreadyClaimed(i64),

    #[error("Failed to look up attachment: {0}")]
    QueryFailed(String),
}

/// Decides whether an attachment may be claimed by a new entity.
///
/// Read-only: it never modifies the attachment it inspects.
#[derive(Debug, Clone)]
pub struct AttachmentGuard<Q>
where
    Q: AttachmentQuery + Send + Sync,
{
    query: Q,
}

impl<Q> AttachmentGuard<Q>
where
    Q: AttachmentQuery + Send + Sync,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }

    /// Returns the unclaimed attachment, or `None` when no id was supplied.
    pub async fn resolve_claimable(
        &self,
        attachment_id: Option<i64>,
    ) -> Result<Option<MediaAttachment>, AttachmentGuardError> {
        let Some(attachment_id) = attachment_id else {
            return Ok(None);
        };

        let attachment = self
            .query
            .find_attachment(attachment_id)
            .await
            .map_err(|e| AttachmentGuardError::QueryFailed(e.to_string()))?
            .ok_or(AttachmentGuardError::NotFound(attachment_id))?;

        if attachment.is_claimed() {
            tracing::warn!(
                attachment_id,
                claimed_by = ?attachment.claimed_by(),
                channel = ?attachment.channel,
                raw_reference_id = ?attachment.raw_reference_id,
                "Attachment is already claimed"
            );
            return Err(AttachmentGuardError::AlreadyClaimed(attachment_id));
        }

        Ok(Some(attachment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use crate::{
        auth::application::domain::entities::UserId,
        multimedia::application::domain::entities::AttachableKind,
        multimedia::application::ports::outgoing::db::AttachmentQueryError,
    };

    // ──────────────────────────────────────────────────────────
    // Mock Query
    // ──────────────────────────────────────────────────────────

    #[derive(Clone)]
    struct MockAttachmentQuery {
        result: Result<Option<MediaAttachment>, AttachmentQueryError>,
        calls: Arc<AtomicUsize>,
    }

    impl MockAttachmentQuery {
        fn returning(result: Result<Option<MediaAttachment>, AttachmentQueryError>) -> Self {
            Self {
                result,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AttachmentQuery for MockAttachmentQuery {
        async fn find_attachment(
            &self,
            _attachment_id: i64,
        ) -> Result<Option<MediaAttachment>, AttachmentQueryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn attachment(id: i64, channel: Option<&str>, raw: Option<i64>) -> MediaAttachment {
        MediaAttachment {
            id,
            media_id: 500,
            owner: UserId::from(42),
            channel: channel.map(str::to_string),
            raw_reference_id: raw,
        }
    }

    // ──────────────────────────────────────────────────────────
    // Tests
    // ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn no_attachment_id_skips_lookup() {
        // Arrange
        let query = MockAttachmentQuery::returning(Ok(None));
        let guard = AttachmentGuard::new(query.clone());

        // Act
        let result = guard.resolve_claimable(None).await;

        // Assert
        assert_eq!(result, Ok(None));
        assert_eq!(query.calls(), 0);
    }

    #[tokio::test]
    async fn unclaimed_attachment_is_returned() {
        let record = attachment(8, None, None);
        let guard = AttachmentGuard::new(MockAttachmentQuery::returning(Ok(Some(record.clone()))));

        let result = guard.resolve_claimable(Some(8)).await;

        assert_eq!(result, Ok(Some(record)));
    }

    #[tokio::test]
    async fn missing_attachment_is_not_found() {
        let guard = AttachmentGuard::new(MockAttachmentQuery::returning(Ok(None)));

        let result = guard.resolve_claimable(Some(404)).await;

        assert_eq!(result, Err(AttachmentGuardError::NotFound(404)));
    }

    #[tokio::test]
    async fn claimed_attachment_is_rejected() {
        let record = attachment(7, Some("Topic"), Some(99));
        let guard = AttachmentGuard::new(MockAttachmentQuery::returning(Ok(Some(record))));

        let result = guard.resolve_claimable(Some(7)).await;

        assert_eq!(result, Err(AttachmentGuardError::AlreadyClaimed(7)));
    }

    #[tokio::test]
    async fn attachment_owned_by_another_kind_is_rejected() {
        let record = attachment(5, Some("Comment"), Some(31));
        assert_eq!(record.claimed_by(), Some(AttachableKind::Comment));
        let guard = AttachmentGuard::new(MockAttachmentQuery::returning(Ok(Some(record))));

        let result = guard.resolve_claimable(Some(5)).await;

        assert_eq!(result, Err(AttachmentGuardError::AlreadyClaimed(5)));
    }

    #[tokio::test]
    async fn attachment_with_only_reference_is_rejected() {
        let record = attachment(9, None, Some(12));
        let guard = AttachmentGuard::new(MockAttachmentQuery::returning(Ok(Some(record))));

        let result = guard.resolve_claimable(Some(9)).await;

        assert_eq!(result, Err(AttachmentGuardError::AlreadyClaimed(9)));
    }

    #[tokio::test]
    async fn query_failure_is_mapped() {
        let guard = AttachmentGuard::new(MockAttachmentQuery::returning(Err(
            AttachmentQueryError::DatabaseError("connection reset".to_string()),
        )));

        let result = guard.resolve_claimable(Some(1)).await;

        match result {
            Err(AttachmentGuardError::QueryFailed(msg)) => {
                assert!(msg.contains("connection reset"))
            }
            other => panic!("Expected QueryFailed, got {:?}", other),
        }
    }
}
