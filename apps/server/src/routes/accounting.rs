//! # Accounting Routes
//!
//! Expense and income bookkeeping plus the profit-loss summary. The two
//! ledger kinds share one handler pair; the route decides the kind and the
//! transaction-code prefix.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use minimart_core::validation::{validate_description, validate_positive_cents};
use minimart_core::{LedgerEntry, LedgerKind, TransactionKind};
use minimart_db::ProfitLoss;

use crate::error::ApiResult;
use crate::state::AppState;

/// Listing page size for the accounting tables.
const LEDGER_PAGE: u32 = 100;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/expenses", get(list_expenses).post(add_expense))
        .route("/api/income", get(list_income).post(add_income))
        .route("/api/accounting/profit-loss", get(profit_loss))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRequest {
    pub description: String,
    pub amount_cents: i64,
}

async fn insert_entry(
    state: &AppState,
    kind: LedgerKind,
    tx_kind: TransactionKind,
    req: LedgerRequest,
) -> ApiResult<Json<LedgerEntry>> {
    validate_description(&req.description)?;
    validate_positive_cents("amountCents", req.amount_cents)?;

    let code = state.ids.transaction_code(tx_kind);
    let entry = state
        .db
        .ledger()
        .insert(kind, &code, req.description.trim(), req.amount_cents)
        .await?;

    Ok(Json(entry))
}

/// POST /api/expenses - record one expense with a generated `EXP` code.
async fn add_expense(
    State(state): State<AppState>,
    Json(req): Json<LedgerRequest>,
) -> ApiResult<Json<LedgerEntry>> {
    insert_entry(&state, LedgerKind::Expense, TransactionKind::Expense, req).await
}

/// POST /api/income - record one income row with a generated `INC` code.
async fn add_income(
    State(state): State<AppState>,
    Json(req): Json<LedgerRequest>,
) -> ApiResult<Json<LedgerEntry>> {
    insert_entry(&state, LedgerKind::Income, TransactionKind::Income, req).await
}

/// GET /api/expenses - recent expenses, newest first.
async fn list_expenses(State(state): State<AppState>) -> ApiResult<Json<Vec<LedgerEntry>>> {
    let entries = state.db.ledger().list(LedgerKind::Expense, LEDGER_PAGE).await?;
    Ok(Json(entries))
}

/// GET /api/income - recent income rows, newest first.
async fn list_income(State(state): State<AppState>) -> ApiResult<Json<Vec<LedgerEntry>>> {
    let entries = state.db.ledger().list(LedgerKind::Income, LEDGER_PAGE).await?;
    Ok(Json(entries))
}

/// GET /api/accounting/profit-loss - revenue, expenses and their difference.
async fn profit_loss(State(state): State<AppState>) -> ApiResult<Json<ProfitLoss>> {
    let summary = state.db.reports().profit_loss().await?;
    Ok(Json(summary))
}
