use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FeedTopicFollowers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeedTopicFollowers::TopicId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeedTopicFollowers::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeedTopicFollowers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(FeedTopicFollowers::TopicId)
                            .col(FeedTopicFollowers::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feed_topic_followers_topic_id")
                            .from(FeedTopicFollowers::Table, FeedTopicFollowers::TopicId)
                            .to(FeedTopics::Table, FeedTopics::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feed_topic_followers_user_id")
                            .from(FeedTopicFollowers::Table, FeedTopicFollowers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // "which topics does this user follow?"
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_feed_topic_followers_user_id
                ON feed_topic_followers (user_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP INDEX IF EXISTS idx_feed_topic_followers_user_id;")
            .await?;

        manager
            .drop_table(Table::drop().table(FeedTopicFollowers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FeedTopicFollowers {
    Table,
    TopicId,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum FeedTopics {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
