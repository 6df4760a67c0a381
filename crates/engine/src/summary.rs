//! Monthly aggregation result types.

use uuid::Uuid;

/// Label used when a per-card total references a card id with no matching
/// row. Under referential integrity this should not happen.
pub const UNKNOWN_CARD_LABEL: &str = "unknown card";

#[derive(Clone, Debug, PartialEq)]
pub struct ResponsibleTotal {
    pub responsible: String,
    pub total: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CardTotal {
    pub card_id: Uuid,
    pub card_name: String,
    pub total: f64,
}

/// Aggregates over one month of expenses visible to the caller.
///
/// An empty month yields zero totals and zero count, never an error.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthlySummary {
    pub total: f64,
    pub count: u64,
    /// Per-responsible totals, descending by amount.
    pub by_responsible: Vec<ResponsibleTotal>,
    /// Per-card totals, descending by amount.
    pub by_card: Vec<CardTotal>,
}
