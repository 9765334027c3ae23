use crate::auth::adapter::outgoing::sea_orm_entity::users;
use crate::topic::application::ports::outgoing::TopicSummary;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "feed_topics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub name: String,

    /// Id of the claimed `media_attachments` row
    pub logo: Option<i64>,

    pub description: Option<String>,

    pub creator_user_id: i64,

    pub followers_count: i32,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn to_summary(&self) -> TopicSummary {
        TopicSummary {
            id: self.id,
            name: self.name.clone(),
            logo: self.logo,
            created_at: self.created_at.into(),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "users::Entity",
        from = "Column::CreatorUserId",
        to = "users::Column::Id"
    )]
    Creator,
}

impl Related<users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
