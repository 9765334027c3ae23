use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};
use std::sync::Arc;

use crate::multimedia::application::{
    domain::entities::MediaAttachment,
    ports::outgoing::db::{AttachmentQuery, AttachmentQueryError},
};

use super::sea_orm_entity::media_attachments::Entity as MediaAttachmentEntity;

#[derive(Debug, Clone)]
pub struct AttachmentQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl AttachmentQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AttachmentQuery for AttachmentQueryPostgres {
    async fn find_attachment(
        &self,
        attachment_id: i64,
    ) -> Result<Option<MediaAttachment>, AttachmentQueryError> {
        let model = MediaAttachmentEntity::find_by_id(attachment_id)
            .one(&*self.db)
            .await
            .map_err(|e| AttachmentQueryError::DatabaseError(e.to_string()))?;

        Ok(model.map(|m| m.to_domain()))
    }
}
