//! The expense engine.
//!
//! Everything with actual business logic lives here: installment expansion
//! with calendar-month due dates, role-scoped querying, monthly aggregation
//! and cascading purchase deletion. The [`Engine`] owns a single pooled
//! [`sea_orm::DatabaseConnection`] handed in at startup, so tests can swap
//! in an in-memory database.

pub use cards::Card;
pub use commands::{ExpenseListFilter, ExpenseUpdateCmd, NewUser, PurchaseCmd};
pub use error::EngineError;
pub use expenses::{Expense, installment_due_date, month_window};
pub use ops::{Engine, EngineBuilder};
pub use summary::{CardTotal, MonthlySummary, ResponsibleTotal, UNKNOWN_CARD_LABEL};
pub use users::{Role, User};

mod cards;
mod commands;
mod error;
mod expenses;
mod ops;
mod summary;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
