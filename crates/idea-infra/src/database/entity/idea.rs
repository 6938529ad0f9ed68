//! Idea entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

/// Row of the `ideas` table. Timestamps are stored without time zone, in UTC.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ideas")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub upvotes: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Idea.
impl From<Model> for idea_core::Idea {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            upvotes: u32::try_from(model.upvotes).unwrap_or_default(),
            created_at: model.created_at.and_utc(),
            updated_at: model.updated_at.and_utc(),
        }
    }
}

/// Conversion from Domain Idea to SeaORM ActiveModel.
impl From<idea_core::Idea> for ActiveModel {
    fn from(idea: idea_core::Idea) -> Self {
        Self {
            id: Set(idea.id),
            title: Set(idea.title),
            description: Set(idea.description),
            upvotes: Set(i32::try_from(idea.upvotes).unwrap_or(i32::MAX)),
            created_at: Set(idea.created_at.naive_utc()),
            updated_at: Set(idea.updated_at.naive_utc()),
        }
    }
}
