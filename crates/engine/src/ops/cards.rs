//! Card operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QuerySelect,
};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    cards::{self, Card},
    expenses,
    users::User,
};

use super::{Engine, normalize_required_name};

impl Engine {
    pub async fn create_card(&self, name: &str, bank: &str, owner: Uuid) -> ResultEngine<Card> {
        let card = Card {
            id: Uuid::new_v4(),
            name: normalize_required_name(name, "card name")?,
            bank: normalize_required_name(bank, "bank")?,
            user_id: owner,
        };
        cards::ActiveModel::from(&card).insert(self.db()).await?;
        Ok(card)
    }

    /// Role-scoped card visibility.
    ///
    /// Administrators see every card. Other callers see the cards appearing
    /// on at least one expense attributed to their name - visibility derived
    /// from expense history rather than from the card's owner column, kept
    /// as the original system behaves.
    pub async fn list_cards(&self, caller: &User) -> ResultEngine<Vec<Card>> {
        if caller.is_admin() {
            return cards::Entity::find()
                .all(self.db())
                .await?
                .into_iter()
                .map(Card::try_from)
                .collect();
        }

        let card_ids: Vec<String> = expenses::Entity::find()
            .select_only()
            .column(expenses::Column::CardId)
            .filter(expenses::Column::Responsible.eq(caller.name.clone()))
            .distinct()
            .into_tuple()
            .all(self.db())
            .await?;

        if card_ids.is_empty() {
            return Ok(Vec::new());
        }

        cards::Entity::find()
            .filter(cards::Column::Id.is_in(card_ids))
            .all(self.db())
            .await?
            .into_iter()
            .map(Card::try_from)
            .collect()
    }

    /// Delete a card. The card must exist and belong to the caller; a
    /// mismatch is indistinguishable from a missing card.
    pub async fn delete_card(&self, id: Uuid, caller: &User) -> ResultEngine<()> {
        let card = cards::Entity::find_by_id(id.to_string())
            .filter(cards::Column::UserId.eq(caller.id.to_string()))
            .one(self.db())
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("card".to_string()))?;

        card.delete(self.db()).await?;
        Ok(())
    }

    /// Card lookup scoped to an owner, used by the expense paths.
    pub(crate) async fn card_owned_by(&self, card_id: Uuid, owner: Uuid) -> ResultEngine<Card> {
        let model = cards::Entity::find_by_id(card_id.to_string())
            .filter(cards::Column::UserId.eq(owner.to_string()))
            .one(self.db())
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("card".to_string()))?;
        Card::try_from(model)
    }
}
