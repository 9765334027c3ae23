//! # Media Attachments Table Migration
//!
//! A `media_attachments` row is the metadata record of an uploaded file and the
//! entity it belongs to. An attachment starts out unclaimed (`channel` and
//! `raw_reference_id` are NULL) and is claimed exactly once, when some entity
//! takes it over.
//!
//! ## Key Columns
//! - `media_id`: the stored file. Storage itself lives outside this service.
//! - `user_id`: current owner. Re-parented to the claiming entity's creator.
//! - `channel`: tag of the owning entity kind (`"Topic"`, `"Feed"`, ...).
//! - `raw_reference_id`: id of the owning entity inside that kind.
//!
//! ## Trade-offs
//! - No FK on `raw_reference_id`: it points to different tables depending on
//!   `channel`. Integrity is enforced by the application.
//!
//! ## Usage
//! ```sql
//! -- claim an attachment as a topic logo
//! UPDATE media_attachments
//! SET channel = 'Topic', raw_reference_id = 42, user_id = 7
//! WHERE id = 5 AND channel IS NULL AND raw_reference_id IS NULL;
//! ```

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================
        // Create media_attachments table
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(MediaAttachments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MediaAttachments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MediaAttachments::MediaId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MediaAttachments::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    // =========================================
                    // Polymorphic owner (NULL while unclaimed)
                    // =========================================
                    .col(ColumnDef::new(MediaAttachments::Channel).string_len(100))
                    .col(ColumnDef::new(MediaAttachments::RawReferenceId).big_integer())
                    .col(
                        ColumnDef::new(MediaAttachments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(MediaAttachments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_media_attachments_user_id")
                            .from(MediaAttachments::Table, MediaAttachments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // Indexes
        // =====================================================

        // "get all media for this entity"
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_media_attachments_owner
                ON media_attachments (channel, raw_reference_id);
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_media_attachments_media_id
                ON media_attachments (media_id);
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER update_media_attachments_updated_at
                BEFORE UPDATE ON media_attachments
                FOR EACH ROW
                EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP TRIGGER IF EXISTS update_media_attachments_updated_at ON media_attachments;
                DROP INDEX IF EXISTS idx_media_attachments_owner;
                DROP INDEX IF EXISTS idx_media_attachments_media_id;
                "#,
            )
            .await?;

        manager
            .drop_table(Table::drop().table(MediaAttachments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MediaAttachments {
    Table,
    Id,
    MediaId,
    UserId,
    Channel,
    RawReferenceId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
