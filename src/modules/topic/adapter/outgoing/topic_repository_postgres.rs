use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, SqlErr, Statement,
    TransactionTrait,
};
use std::sync::Arc;

use crate::multimedia::application::domain::entities::AttachableKind;
use crate::topic::application::ports::outgoing::{
    CreateTopicData, CreatedTopic, TopicRepository, TopicRepositoryError,
};

// ============================================================================
// Repository Implementation (Production)
// ============================================================================

#[derive(Clone)]
pub struct TopicRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl TopicRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    // =====================================================
    // SQL builders
    // =====================================================

    fn insert_topic_stmt(data: &CreateTopicData, now: DateTime<FixedOffset>) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            INSERT INTO feed_topics (
              name, logo, description,
              creator_user_id, followers_count,
              created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id
            "#,
            vec![
                data.name.clone().into(),
                data.logo.as_ref().map(|a| a.id).into(),
                data.description.clone().into(),
                data.creator.value().into(),
                // the creator is the first follower
                1i32.into(),
                now.into(),
            ],
        )
    }

    fn insert_follower_stmt(
        topic_id: i64,
        user_id: i64,
        now: DateTime<FixedOffset>,
    ) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            INSERT INTO feed_topic_followers (topic_id, user_id, created_at)
            VALUES ($1, $2, $3)
            "#,
            vec![topic_id.into(), user_id.into(), now.into()],
        )
    }

    /// Only touches the row while it is still unclaimed.
    fn claim_attachment_stmt(
        attachment_id: i64,
        topic_id: i64,
        user_id: i64,
        now: DateTime<FixedOffset>,
    ) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            UPDATE media_attachments
            SET channel = $1,
                raw_reference_id = $2,
                user_id = $3,
                updated_at = $4
            WHERE id = $5
              AND (channel IS NULL OR channel = '')
              AND (raw_reference_id IS NULL OR raw_reference_id = 0)
            "#,
            vec![
                AttachableKind::Topic.tag().into(),
                topic_id.into(),
                user_id.into(),
                now.into(),
                attachment_id.into(),
            ],
        )
    }

    fn map_db_err(e: DbErr) -> TopicRepositoryError {
        TopicRepositoryError::DatabaseError(e.to_string())
    }

    fn map_insert_err(e: DbErr, name: &str) -> TopicRepositoryError {
        if let Some(SqlErr::UniqueConstraintViolation(_)) = e.sql_err() {
            return TopicRepositoryError::NameTaken(name.to_string());
        }

        let msg = e.to_string().to_lowercase();
        if (msg.contains("duplicate") || msg.contains("unique") || msg.contains("23505"))
            && msg.contains("name")
        {
            TopicRepositoryError::NameTaken(name.to_string())
        } else {
            TopicRepositoryError::DatabaseError(e.to_string())
        }
    }

    // =====================================================
    // Facade hook: lets tests supply a fake DB/txn
    // =====================================================

    async fn write_topic<T: TopicTxn>(
        txn: &mut T,
        data: &CreateTopicData,
        now: DateTime<FixedOffset>,
    ) -> Result<i64, TopicRepositoryError> {
        let topic_id = txn
            .insert_returning_id(Self::insert_topic_stmt(data, now))
            .await
            .map_err(|e| Self::map_insert_err(e, &data.name))?;

        txn.execute(Self::insert_follower_stmt(
            topic_id,
            data.creator.value(),
            now,
        ))
        .await
        .map_err(Self::map_db_err)?;

        if let Some(logo) = &data.logo {
            let claimed = txn
                .execute(Self::claim_attachment_stmt(
                    logo.id,
                    topic_id,
                    data.creator.value(),
                    now,
                ))
                .await
                .map_err(Self::map_db_err)?;

            if claimed == 0 {
                return Err(TopicRepositoryError::AttachmentAlreadyClaimed(logo.id));
            }
        }

        Ok(topic_id)
    }

    async fn create_topic_with_db<D: TopicDb>(
        db: &D,
        data: CreateTopicData,
    ) -> Result<CreatedTopic, TopicRepositoryError> {
        let now = Utc::now().fixed_offset();

        let mut txn = db.begin().await.map_err(Self::map_db_err)?;

        let topic_id = match Self::write_topic(&mut txn, &data, now).await {
            Ok(id) => id,
            Err(e) => {
                let _ = txn.rollback().await;
                return Err(e);
            }
        };

        txn.commit().await.map_err(Self::map_db_err)?;

        Ok(CreatedTopic { id: topic_id })
    }
}

#[async_trait]
impl TopicRepository for TopicRepositoryPostgres {
    async fn create_topic(
        &self,
        data: CreateTopicData,
    ) -> Result<CreatedTopic, TopicRepositoryError> {
        let db = SeaOrmDb {
            db: self.db.clone(),
        };
        Self::create_topic_with_db(&db, data).await
    }
}

// ============================================================================
// Minimal DB Facade
// ============================================================================

#[async_trait]
trait TopicDb: Send + Sync {
    type Txn: TopicTxn;
    async fn begin(&self) -> Result<Self::Txn, DbErr>;
}

#[async_trait]
trait TopicTxn: Send {
    /// Runs an `INSERT .. RETURNING id` and yields the new id.
    async fn insert_returning_id(&mut self, stmt: Statement) -> Result<i64, DbErr>;
    /// Returns the number of affected rows.
    async fn execute(&mut self, stmt: Statement) -> Result<u64, DbErr>;
    async fn commit(self) -> Result<(), DbErr>;
    async fn rollback(self) -> Result<(), DbErr>;
}

struct SeaOrmDb {
    db: Arc<DatabaseConnection>,
}

struct SeaOrmTxn {
    txn: sea_orm::DatabaseTransaction,
}

#[async_trait]
impl TopicDb for SeaOrmDb {
    type Txn = SeaOrmTxn;

    async fn begin(&self) -> Result<Self::Txn, DbErr> {
        let txn = self.db.begin().await?;
        Ok(SeaOrmTxn { txn })
    }
}

#[async_trait]
impl TopicTxn for SeaOrmTxn {
    async fn insert_returning_id(&mut self, stmt: Statement) -> Result<i64, DbErr> {
        let row = self
            .txn
            .query_one(stmt)
            .await?
            .ok_or(DbErr::RecordNotInserted)?;
        row.try_get::<i64>("", "id")
    }

    async fn execute(&mut self, stmt: Statement) -> Result<u64, DbErr> {
        let result = self.txn.execute(stmt).await?;
        Ok(result.rows_affected())
    }

    async fn commit(self) -> Result<(), DbErr> {
        self.txn.commit().await
    }

    async fn rollback(self) -> Result<(), DbErr> {
        self.txn.rollback().await
    }
}

// ============================================================================
// Tests
// ============================================================================
