mod attachment_query_postgres;
pub mod sea_orm_entity;

pub use attachment_query_postgres::AttachmentQueryPostgres;
