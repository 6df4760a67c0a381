//! Expense API endpoints.

use api_types::expense::{
    CardTotal, ExpenseNew, ExpenseQuery, ExpenseUpdate, ExpenseView, PurchaseCreated,
    ResponsibleTotal, SummaryQuery, SummaryResponse,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use engine::{Card, Expense, ExpenseListFilter, ExpenseUpdateCmd, PurchaseCmd, User};
use uuid::Uuid;

use crate::{ServerError, cards, server::ServerState};

fn view((expense, card): (Expense, Card)) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        description: expense.description,
        amount: expense.amount,
        date: expense.date,
        due_date: expense.due_date,
        installment: expense.installment,
        total_installments: expense.total_installments,
        responsible: expense.responsible,
        purchase_id: expense.purchase_id,
        card: cards::view(card),
    }
}

fn required_month(year: Option<i32>, month: Option<u32>) -> Result<(i32, u32), ServerError> {
    match (year, month) {
        (Some(year), Some(month)) => Ok((year, month)),
        _ => Err(ServerError::Generic(
            "year and month are required".to_string(),
        )),
    }
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<PurchaseCreated>), ServerError> {
    let cmd = PurchaseCmd::new(
        payload.card_id,
        payload.description,
        payload.amount,
        payload.date.with_timezone(&Utc),
        payload.responsible,
        user.id,
    )
    .installments(payload.total_installments);

    let purchase_id = state.engine.create_purchase(cmd).await?;
    Ok((StatusCode::CREATED, Json(PurchaseCreated { purchase_id })))
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Query(query): Query<ExpenseQuery>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    let (year, month) = required_month(query.year, query.month)?;

    let mut filter = ExpenseListFilter::new(year, month);
    if let Some(card_id) = query.card_id {
        filter = filter.card_id(card_id);
    }
    if let Some(responsible) = query.responsible {
        filter = filter.responsible(responsible);
    }

    let rows = state.engine.list_expenses(filter, &user).await?;
    Ok(Json(rows.into_iter().map(view).collect()))
}

pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ExpenseUpdate>,
) -> Result<Json<ExpenseView>, ServerError> {
    let cmd = ExpenseUpdateCmd {
        description: payload.description,
        amount: payload.amount,
        date: payload.date.with_timezone(&Utc),
        responsible: payload.responsible,
    };
    let updated = state.engine.update_expense(id, cmd, &user).await?;
    Ok(Json(view(updated)))
}

pub async fn delete(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_purchase(id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn responsibles(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<String>>, ServerError> {
    Ok(Json(state.engine.list_responsibles(&user).await?))
}

pub async fn summary(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<SummaryResponse>, ServerError> {
    let (year, month) = required_month(query.year, query.month)?;
    let summary = state.engine.monthly_summary(year, month, &user).await?;

    Ok(Json(SummaryResponse {
        total: summary.total,
        count: summary.count,
        by_responsible: summary
            .by_responsible
            .into_iter()
            .map(|entry| ResponsibleTotal {
                responsible: entry.responsible,
                total: entry.total,
            })
            .collect(),
        by_card: summary
            .by_card
            .into_iter()
            .map(|entry| CardTotal {
                card_id: entry.card_id,
                card_name: entry.card_name,
                total: entry.total,
            })
            .collect(),
    }))
}
