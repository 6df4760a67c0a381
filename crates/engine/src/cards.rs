//! Payment cards, each owned by exactly one user.

use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

/// A credit card expenses are charged against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub id: Uuid,
    pub name: String,
    pub bank: String,
    pub user_id: Uuid,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "cards")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub bank: String,
    pub user_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(has_many = "super::expenses::Entity")]
    Expenses,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Card> for ActiveModel {
    fn from(card: &Card) -> Self {
        Self {
            id: ActiveValue::Set(card.id.to_string()),
            name: ActiveValue::Set(card.name.clone()),
            bank: ActiveValue::Set(card.bank.clone()),
            user_id: ActiveValue::Set(card.user_id.to_string()),
        }
    }
}

impl TryFrom<Model> for Card {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "card")?,
            name: model.name,
            bank: model.bank,
            user_id: parse_uuid(&model.user_id, "user")?,
        })
    }
}
