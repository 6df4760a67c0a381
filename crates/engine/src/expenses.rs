//! Expense records: one row per monthly installment of a purchase.
//!
//! A purchase split into N installments becomes N independent rows sharing a
//! `purchase_id`. Siblings carry the same purchase date, responsible name,
//! card and total count; only the installment index and due date differ.

use chrono::{DateTime, Months, TimeZone, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, util::parse_uuid};

/// One installment of a purchase.
#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub description: String,
    /// This installment's share of the purchase total, not the total itself.
    pub amount: f64,
    /// Original purchase date; identical across sibling installments.
    pub date: DateTime<Utc>,
    /// The month this installment falls due in.
    pub due_date: DateTime<Utc>,
    /// 1-based index within the purchase group.
    pub installment: u32,
    pub total_installments: u32,
    /// Display name of whoever the expense is attributed to. Free text, not
    /// a reference to a user account.
    pub responsible: String,
    pub card_id: Uuid,
    pub purchase_id: Uuid,
}

/// Due date of the 1-based installment `index`: the purchase date advanced by
/// `index - 1` calendar months. Month arithmetic clamps to the target month's
/// length (Jan 31 + 1 month is Feb 28, or Feb 29 in a leap year) and rolls
/// over year boundaries.
pub fn installment_due_date(
    purchase_date: DateTime<Utc>,
    index: u32,
) -> ResultEngine<DateTime<Utc>> {
    purchase_date
        .checked_add_months(Months::new(index.saturating_sub(1)))
        .ok_or_else(|| EngineError::Validation("due date out of range".to_string()))
}

/// The month window as a half-open `[start of month, start of next month)`
/// range, equivalent to the inclusive first-to-last-instant window over any
/// stored timestamp.
pub fn month_window(year: i32, month: u32) -> ResultEngine<(DateTime<Utc>, DateTime<Utc>)> {
    if !(1..=12).contains(&month) {
        return Err(EngineError::Validation(format!(
            "month must be between 1 and 12, got {month}"
        )));
    }
    let start = Utc
        .with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| EngineError::Validation(format!("invalid month {year}-{month}")))?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = Utc
        .with_ymd_and_hms(next_year, next_month, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| EngineError::Validation(format!("invalid month {year}-{month}")))?;
    Ok((start, end))
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub date: DateTimeUtc,
    pub due_date: DateTimeUtc,
    pub installment: i32,
    pub total_installments: i32,
    pub responsible: String,
    pub card_id: String,
    pub purchase_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cards::Entity",
        from = "Column::CardId",
        to = "super::cards::Column::Id"
    )]
    Cards,
}

impl Related<super::cards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cards.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(expense.id.to_string()),
            description: ActiveValue::Set(expense.description.clone()),
            amount: ActiveValue::Set(expense.amount),
            date: ActiveValue::Set(expense.date),
            due_date: ActiveValue::Set(expense.due_date),
            installment: ActiveValue::Set(expense.installment as i32),
            total_installments: ActiveValue::Set(expense.total_installments as i32),
            responsible: ActiveValue::Set(expense.responsible.clone()),
            card_id: ActiveValue::Set(expense.card_id.to_string()),
            purchase_id: ActiveValue::Set(expense.purchase_id.to_string()),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "expense")?,
            description: model.description,
            amount: model.amount,
            date: model.date,
            due_date: model.due_date,
            installment: model.installment.max(0) as u32,
            total_installments: model.total_installments.max(0) as u32,
            responsible: model.responsible,
            card_id: parse_uuid(&model.card_id, "card")?,
            purchase_id: parse_uuid(&model.purchase_id, "purchase")?,
        })
    }
}
