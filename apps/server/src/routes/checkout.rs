//! # Checkout Route
//!
//! One POST per sale. The handler validates the cart, generates a `SAL`
//! transaction code and hands the lines to the repository, which runs the
//! whole thing in a single database transaction.
//!
//! Tax arrives precomputed from the client's settings blob; the server only
//! records it next to the sale total.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use minimart_core::validation::{
    validate_amount_cents, validate_cart_size, validate_sale_quantity,
};
use minimart_core::TransactionKind;
use minimart_db::CartLine;

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/checkout", post(checkout))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineRequest {
    pub product_id: i64,
    pub qty: i64,
    pub price_cents: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub items: Vec<CartLineRequest>,
    /// Client-computed tax, recorded alongside the total. Zero when absent.
    #[serde(default)]
    pub tax_cents: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub success: bool,
    pub sale_id: i64,
    pub transaction_id: String,
    pub total_cents: i64,
}

/// POST /api/checkout - record a sale and decrement stock, all-or-nothing.
async fn checkout(
    State(state): State<AppState>,
    Json(req): Json<CheckoutRequest>,
) -> ApiResult<Json<CheckoutResponse>> {
    validate_cart_size(req.items.len())?;
    validate_amount_cents("taxCents", req.tax_cents)?;
    for item in &req.items {
        validate_sale_quantity(item.qty)?;
        validate_amount_cents("priceCents", item.price_cents)?;
    }

    let lines: Vec<CartLine> = req
        .items
        .iter()
        .map(|item| CartLine {
            product_id: item.product_id,
            quantity: item.qty,
            price_cents: item.price_cents,
        })
        .collect();

    let transaction_code = state.ids.transaction_code(TransactionKind::Sale);
    let outcome = state
        .db
        .sales()
        .checkout(&lines, &transaction_code, req.tax_cents)
        .await?;

    Ok(Json(CheckoutResponse {
        success: true,
        sale_id: outcome.sale_id,
        transaction_id: outcome.transaction_code,
        total_cents: outcome.total_cents,
    }))
}
