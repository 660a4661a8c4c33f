//! Category entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use cookbook_core::error::RepoError;

use crate::database::postgres_base::FromStoredModel;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_id: Uuid,
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl FromStoredModel<Model> for cookbook_core::domain::Category {
    fn from_model(model: Model) -> Result<Self, RepoError> {
        Ok(model.into())
    }
}

impl From<Model> for cookbook_core::domain::Category {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id,
            name: model.name,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<cookbook_core::domain::Category> for ActiveModel {
    fn from(category: cookbook_core::domain::Category) -> Self {
        Self {
            id: Set(category.id),
            author_id: Set(category.author_id),
            name: Set(category.name),
            created_at: Set(category.created_at.into()),
            updated_at: Set(category.updated_at.into()),
        }
    }
}
