//! Post entity for SeaORM.
//!
//! `state` is stored as text; an unrecognized value in the database is read
//! back as a draft rather than failing the whole query.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::PostState;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub category: String,
    pub author: String,
    pub state: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub read_time: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to domain Post.
impl From<Model> for quill_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            category: model.category,
            author: model.author,
            state: model.state.parse().unwrap_or(PostState::Draft),
            image_url: model.image_url,
            tags: model.tags,
            read_time: model.read_time,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from domain Post to SeaORM ActiveModel.
impl From<quill_core::domain::Post> for ActiveModel {
    fn from(post: quill_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            content: Set(post.content),
            category: Set(post.category),
            author: Set(post.author),
            state: Set(post.state.as_str().to_string()),
            image_url: Set(post.image_url),
            tags: Set(post.tags),
            read_time: Set(post.read_time),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
