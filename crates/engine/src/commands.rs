//! Command and filter structs for engine operations.
//!
//! These types group parameters for the write and query paths, keeping call
//! sites readable and avoiding long argument lists.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A new account. The password must already be hashed by the caller; the
/// engine never sees clear-text credentials.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Create a purchase, expanding it into monthly installments.
#[derive(Clone, Debug)]
pub struct PurchaseCmd {
    pub card_id: Uuid,
    pub description: String,
    /// Total purchase amount, divided evenly across installments.
    pub amount: f64,
    /// Purchase date; every installment stores it unchanged.
    pub date: DateTime<Utc>,
    pub total_installments: u32,
    pub responsible: String,
    /// The requesting user; the card must belong to them.
    pub user_id: Uuid,
}

impl PurchaseCmd {
    #[must_use]
    pub fn new(
        card_id: Uuid,
        description: impl Into<String>,
        amount: f64,
        date: DateTime<Utc>,
        responsible: impl Into<String>,
        user_id: Uuid,
    ) -> Self {
        Self {
            card_id,
            description: description.into(),
            amount,
            date,
            total_installments: 1,
            responsible: responsible.into(),
            user_id,
        }
    }

    #[must_use]
    pub fn installments(mut self, count: u32) -> Self {
        self.total_installments = count;
        self
    }
}

/// Replace the four mutable fields of an expense. Installment index, total
/// count, card and purchase group are immutable.
#[derive(Clone, Debug)]
pub struct ExpenseUpdateCmd {
    pub description: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub responsible: String,
}

/// Month-scoped filter for expense listing.
#[derive(Clone, Debug)]
pub struct ExpenseListFilter {
    pub year: i32,
    pub month: u32,
    pub card_id: Option<Uuid>,
    /// Honored only for administrators; other callers are always pinned to
    /// their own name.
    pub responsible: Option<String>,
}

impl ExpenseListFilter {
    #[must_use]
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            card_id: None,
            responsible: None,
        }
    }

    #[must_use]
    pub fn card_id(mut self, card_id: Uuid) -> Self {
        self.card_id = Some(card_id);
        self
    }

    #[must_use]
    pub fn responsible(mut self, responsible: impl Into<String>) -> Self {
        self.responsible = Some(responsible.into());
        self
    }
}
