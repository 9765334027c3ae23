use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================
        // Create feed_topics table
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(FeedTopics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeedTopics::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FeedTopics::Name).string_len(100).not_null())
                    // Attachment id of the claimed logo, if any
                    .col(ColumnDef::new(FeedTopics::Logo).big_integer())
                    .col(ColumnDef::new(FeedTopics::Description).string_len(500))
                    .col(
                        ColumnDef::new(FeedTopics::CreatorUserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeedTopics::FollowersCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(FeedTopics::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(FeedTopics::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feed_topics_creator_user_id")
                            .from(FeedTopics::Table, FeedTopics::CreatorUserId)
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

        // Topic names are globally unique (exact match)
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE UNIQUE INDEX idx_feed_topics_name_unique
                ON feed_topics (name);
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_feed_topics_creator_user_id
                ON feed_topics (creator_user_id);
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER update_feed_topics_updated_at
                BEFORE UPDATE ON feed_topics
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
                DROP TRIGGER IF EXISTS update_feed_topics_updated_at ON feed_topics;
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP INDEX IF EXISTS idx_feed_topics_name_unique;
                DROP INDEX IF EXISTS idx_feed_topics_creator_user_id;
                "#,
            )
            .await?;

        manager
            .drop_table(Table::drop().table(FeedTopics::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FeedTopics {
    Table,
    Id,
    Name,
    Logo,
    Description,
    CreatorUserId,
    FollowersCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
