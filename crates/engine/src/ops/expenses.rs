//! Purchase and installment operations.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    EngineError, ExpenseListFilter, ExpenseUpdateCmd, PurchaseCmd, ResultEngine,
    cards::{self, Card},
    expenses::{self, Expense, installment_due_date, month_window},
    users::User,
};

use super::{Engine, normalize_required_name, with_tx};

impl Engine {
    /// Expand a purchase into its monthly installments.
    ///
    /// Every installment row is written inside one transaction, so a failure
    /// partway never leaves a partial purchase group behind. The per
    /// installment amount is the plain quotient of total over count; the
    /// last installment is not adjusted to absorb rounding drift.
    pub async fn create_purchase(&self, cmd: PurchaseCmd) -> ResultEngine<Uuid> {
        let responsible = normalize_required_name(&cmd.responsible, "responsible")?;
        if cmd.total_installments == 0 {
            return Err(EngineError::Validation(
                "total_installments must be at least 1".to_string(),
            ));
        }

        let card = self.card_owned_by(cmd.card_id, cmd.user_id).await?;

        let purchase_id = Uuid::new_v4();
        let installment_amount = cmd.amount / f64::from(cmd.total_installments);

        with_tx!(self, |db_tx| {
            for index in 1..=cmd.total_installments {
                let description = if cmd.total_installments > 1 {
                    format!("{} ({}/{})", cmd.description, index, cmd.total_installments)
                } else {
                    cmd.description.clone()
                };
                let expense = Expense {
                    id: Uuid::new_v4(),
                    description,
                    amount: installment_amount,
                    date: cmd.date,
                    due_date: installment_due_date(cmd.date, index)?,
                    installment: index,
                    total_installments: cmd.total_installments,
                    responsible: responsible.clone(),
                    card_id: card.id,
                    purchase_id,
                };
                expenses::ActiveModel::from(&expense).insert(&db_tx).await?;
            }
            Ok(purchase_id)
        })
    }

    /// Month-scoped, role-scoped expense listing, joined with the owning
    /// card and ascending by due date.
    ///
    /// Administrators may narrow by any responsible name; everyone else is
    /// silently pinned to their own name, whatever filter they supplied.
    pub async fn list_expenses(
        &self,
        filter: ExpenseListFilter,
        caller: &User,
    ) -> ResultEngine<Vec<(Expense, Card)>> {
        let (start, end) = month_window(filter.year, filter.month)?;

        let mut query = expenses::Entity::find()
            .filter(expenses::Column::DueDate.gte(start))
            .filter(expenses::Column::DueDate.lt(end));

        if let Some(card_id) = filter.card_id {
            query = query.filter(expenses::Column::CardId.eq(card_id.to_string()));
        }

        let responsible = if caller.is_admin() {
            filter.responsible
        } else {
            Some(caller.name.clone())
        };
        if let Some(responsible) = responsible {
            query = query.filter(expenses::Column::Responsible.eq(responsible));
        }

        let rows = query
            .find_also_related(cards::Entity)
            .order_by_asc(expenses::Column::DueDate)
            .all(self.db())
            .await?;

        rows.into_iter()
            .map(|(expense, card)| {
                let card = card.ok_or_else(|| EngineError::KeyNotFound("card".to_string()))?;
                Ok((Expense::try_from(expense)?, Card::try_from(card)?))
            })
            .collect()
    }

    /// Replace the four mutable fields of an expense.
    pub async fn update_expense(
        &self,
        id: Uuid,
        cmd: ExpenseUpdateCmd,
        caller: &User,
    ) -> ResultEngine<(Expense, Card)> {
        let responsible = normalize_required_name(&cmd.responsible, "responsible")?;
        let (expense, card) = self.expense_with_owned_card(id, caller).await?;

        let model = expenses::ActiveModel {
            id: ActiveValue::Set(expense.id.to_string()),
            description: ActiveValue::Set(cmd.description),
            amount: ActiveValue::Set(cmd.amount),
            date: ActiveValue::Set(cmd.date),
            responsible: ActiveValue::Set(responsible),
            ..Default::default()
        };
        let updated = model.update(self.db()).await?;

        Ok((Expense::try_from(updated)?, card))
    }

    /// Delete every installment of the purchase the given expense belongs
    /// to, not just the targeted row. Returns the number of rows removed.
    pub async fn delete_purchase(&self, id: Uuid, caller: &User) -> ResultEngine<u64> {
        let (expense, _card) = self.expense_with_owned_card(id, caller).await?;

        with_tx!(self, |db_tx| {
            let result = expenses::Entity::delete_many()
                .filter(expenses::Column::PurchaseId.eq(expense.purchase_id.to_string()))
                .exec(&db_tx)
                .await?;
            Ok(result.rows_affected)
        })
    }

    /// Names expenses can be attributed to: every distinct responsible for
    /// administrators, the caller's own name for everyone else.
    pub async fn list_responsibles(&self, caller: &User) -> ResultEngine<Vec<String>> {
        if !caller.is_admin() {
            return Ok(vec![caller.name.clone()]);
        }

        let names: Vec<String> = expenses::Entity::find()
            .select_only()
            .column(expenses::Column::Responsible)
            .distinct()
            .into_tuple()
            .all(self.db())
            .await?;
        Ok(names)
    }

    /// Resolve an expense together with its card, enforcing the uniform
    /// mutation policy: the card must belong to the caller, and a mismatch
    /// reads as a missing expense.
    async fn expense_with_owned_card(
        &self,
        id: Uuid,
        caller: &User,
    ) -> ResultEngine<(Expense, Card)> {
        let Some((expense, card)) = expenses::Entity::find_by_id(id.to_string())
            .find_also_related(cards::Entity)
            .one(self.db())
            .await?
        else {
            return Err(EngineError::KeyNotFound("expense".to_string()));
        };

        let card = card.ok_or_else(|| EngineError::KeyNotFound("card".to_string()))?;
        if card.user_id != caller.id.to_string() {
            return Err(EngineError::KeyNotFound("expense".to_string()));
        }

        Ok((Expense::try_from(expense)?, Card::try_from(card)?))
    }
}
