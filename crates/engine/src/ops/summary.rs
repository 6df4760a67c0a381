//! Monthly aggregation.

use std::collections::HashMap;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::{
    ResultEngine, cards,
    expenses::{self, month_window},
    summary::{CardTotal, MonthlySummary, ResponsibleTotal, UNKNOWN_CARD_LABEL},
    users::User,
    util::parse_uuid,
};

use super::Engine;

impl Engine {
    /// Aggregate one month of expenses under the caller's visibility scope:
    /// grand total and count, totals per responsible and totals per card,
    /// both descending by amount.
    ///
    /// Card names come from a secondary lookup over the card ids seen in the
    /// month; an id with no matching card falls back to a placeholder label.
    pub async fn monthly_summary(
        &self,
        year: i32,
        month: u32,
        caller: &User,
    ) -> ResultEngine<MonthlySummary> {
        let (start, end) = month_window(year, month)?;

        let mut query = expenses::Entity::find()
            .filter(expenses::Column::DueDate.gte(start))
            .filter(expenses::Column::DueDate.lt(end));
        if !caller.is_admin() {
            query = query.filter(expenses::Column::Responsible.eq(caller.name.clone()));
        }
        let rows = query.all(self.db()).await?;

        let mut total = 0.0;
        let mut responsible_totals: HashMap<String, f64> = HashMap::new();
        let mut card_totals: HashMap<String, f64> = HashMap::new();
        for row in &rows {
            total += row.amount;
            *responsible_totals
                .entry(row.responsible.clone())
                .or_insert(0.0) += row.amount;
            *card_totals.entry(row.card_id.clone()).or_insert(0.0) += row.amount;
        }

        let card_names: HashMap<String, String> = if card_totals.is_empty() {
            HashMap::new()
        } else {
            cards::Entity::find()
                .filter(cards::Column::Id.is_in(card_totals.keys().cloned().collect::<Vec<_>>()))
                .all(self.db())
                .await?
                .into_iter()
                .map(|card| (card.id, card.name))
                .collect()
        };

        let mut by_responsible: Vec<ResponsibleTotal> = responsible_totals
            .into_iter()
            .map(|(responsible, total)| ResponsibleTotal { responsible, total })
            .collect();
        by_responsible.sort_by(|a, b| b.total.total_cmp(&a.total));

        let mut by_card = card_totals
            .into_iter()
            .map(|(card_id, total)| {
                let card_name = card_names
                    .get(&card_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_CARD_LABEL.to_string());
                Ok(CardTotal {
                    card_id: parse_uuid(&card_id, "card")?,
                    card_name,
                    total,
                })
            })
            .collect::<ResultEngine<Vec<CardTotal>>>()?;
        by_card.sort_by(|a, b| b.total.total_cmp(&a.total));

        Ok(MonthlySummary {
            total,
            count: rows.len() as u64,
            by_responsible,
            by_card,
        })
    }
}
