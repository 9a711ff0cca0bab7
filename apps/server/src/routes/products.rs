//! # Product Routes
//!
//! Catalog listing, the single upsert, the by-id overwrite and the bulk
//! import. Barcode resolution happens here: a missing or blank barcode gets
//! an auto-generated `BAR-XXXXX` before the repository sees the line.

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use minimart_core::validation::{
    validate_amount_cents, validate_import_size, validate_product_name, validate_restock_quantity,
};
use minimart_core::{IdGenerator, Product};
use minimart_db::ProductUpsert;

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list).post(upsert))
        .route("/api/products/{id}", put(overwrite))
        .route("/api/products/import", post(import))
}

// =============================================================================
// DTOs
// =============================================================================

/// Incoming product fields, shared by the single upsert, the overwrite and
/// each import line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    /// Absent or blank means "generate one".
    #[serde(default)]
    pub barcode: Option<String>,
    pub price_cents: i64,
    #[serde(default)]
    pub cost_cents: i64,
    #[serde(default)]
    pub quantity: i64,
}

impl ProductRequest {
    fn validate(&self) -> ApiResult<()> {
        validate_product_name(&self.name)?;
        validate_amount_cents("priceCents", self.price_cents)?;
        validate_amount_cents("costCents", self.cost_cents)?;
        validate_restock_quantity(self.quantity)?;
        Ok(())
    }

    /// Converts to the repository input, filling a blank barcode from the
    /// generator.
    fn into_upsert(self, ids: &IdGenerator) -> ProductUpsert {
        let barcode = match self.barcode {
            Some(b) if !b.trim().is_empty() => b.trim().to_string(),
            _ => ids.barcode(),
        };
        ProductUpsert {
            name: self.name,
            barcode,
            price_cents: self.price_cents,
            cost_cents: self.cost_cents,
            quantity: self.quantity,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub items: Vec<ProductRequest>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub success: bool,
    pub batch_id: String,
    pub message: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/products - all products, ordered by id.
async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    let products = state.db.products().list_all().await?;
    Ok(Json(products))
}

/// POST /api/products - single upsert keyed on barcode.
///
/// Existing barcode restocks (quantity +=, batch code preserved); new
/// barcode inserts under a fresh batch code.
async fn upsert(
    State(state): State<AppState>,
    Json(req): Json<ProductRequest>,
) -> ApiResult<Json<Product>> {
    req.validate()?;

    let input = req.into_upsert(&state.ids);
    let batch_code = state.ids.batch_code();
    let product = state
        .db
        .products()
        .upsert_by_barcode(&input, &batch_code)
        .await?;

    Ok(Json(product))
}

/// PUT /api/products/{id} - overwrite one product (manual edit).
///
/// Quantity is set absolutely here, unlike the upsert's increment.
async fn overwrite(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ProductRequest>,
) -> ApiResult<Json<Product>> {
    req.validate()?;

    let input = req.into_upsert(&state.ids);
    let product = state.db.products().overwrite(id, &input).await?;

    Ok(Json(product))
}

/// POST /api/products/import - bulk upsert under one batch code.
async fn import(
    State(state): State<AppState>,
    Json(req): Json<ImportRequest>,
) -> ApiResult<Json<ImportResponse>> {
    validate_import_size(req.items.len())?;
    for item in &req.items {
        item.validate()?;
    }

    let lines: Vec<ProductUpsert> = req
        .items
        .into_iter()
        .map(|item| item.into_upsert(&state.ids))
        .collect();

    let batch_code = state.ids.batch_code();
    let outcome = state.db.products().import(&lines, &batch_code).await?;

    info!(
        imported = outcome.imported,
        batch = %outcome.batch_code,
        "Bulk import complete"
    );

    Ok(Json(ImportResponse {
        success: true,
        message: format!(
            "{} items imported under Batch: {}.",
            outcome.imported, outcome.batch_code
        ),
        batch_id: outcome.batch_code,
    }))
}
