use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use std::sync::Arc;

use crate::topic::application::{
    domain::entities::{ListDirection, TopicListFilter},
    ports::outgoing::{TopicQuery, TopicQueryError, TopicSummary},
};

use super::sea_orm_entity::{Column, Entity};

#[derive(Debug, Clone)]
pub struct TopicQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl TopicQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn map_db_err(e: DbErr) -> TopicQueryError {
    TopicQueryError::DatabaseError(e.to_string())
}

/// Escapes LIKE wildcards so user input only ever matches literally.
fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl TopicQuery for TopicQueryPostgres {
    async fn name_exists(&self, name: &str) -> Result<bool, TopicQueryError> {
        let found = Entity::find()
            .filter(Column::Name.eq(name))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(found.is_some())
    }

    async fn list_topics(
        &self,
        filter: &TopicListFilter,
    ) -> Result<Vec<TopicSummary>, TopicQueryError> {
        let mut query = Entity::find();

        if let Some(search) = filter.search() {
            query = query.filter(Expr::col(Column::Name).ilike(like_pattern(search)));
        }

        query = match (filter.direction(), filter.cursor()) {
            (ListDirection::Desc, Some(cursor)) => query.filter(Column::Id.lt(cursor)),
            (ListDirection::Asc, Some(cursor)) => query.filter(Column::Id.gt(cursor)),
            (_, None) => query,
        };

        query = match filter.direction() {
            ListDirection::Desc => query.order_by_desc(Column::Id),
            ListDirection::Asc => query.order_by_asc(Column::Id),
        };

        let models = query
            .limit(filter.limit())
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(models.iter().map(|m| m.to_summary()).collect())
    }
}
