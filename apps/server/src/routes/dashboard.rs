//! # Dashboard Routes
//!
//! Read-only cards: period stats, low stock, best seller, recent sales and
//! the inventory batch history. Everything is recomputed per request with
//! fixed small limits; the repository owns the SQL.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use minimart_core::Product;
use minimart_db::{BatchSummary, BestSeller, LowStockRow, Period, PeriodStats, RecentSale};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/dashboard/stats/{period}", get(stats))
        .route("/api/dashboard/low-stock", get(low_stock))
        .route("/api/dashboard/best-seller", get(best_seller))
        .route("/api/dashboard/recent-sales", get(recent_sales))
        .route("/api/dashboard/batches", get(batches))
        .route("/api/dashboard/batch-items/{batch_code}", get(batch_items))
}

/// GET /api/dashboard/stats/{period} - totals for daily/monthly/yearly.
async fn stats(
    State(state): State<AppState>,
    Path(period): Path<String>,
) -> ApiResult<Json<PeriodStats>> {
    let period = Period::parse(&period).ok_or_else(|| {
        ApiError::Validation(format!(
            "period must be one of daily, monthly, yearly; got '{period}'"
        ))
    })?;

    let stats = state.db.reports().stats(period, Utc::now()).await?;
    Ok(Json(stats))
}

/// GET /api/dashboard/low-stock - products at or below the threshold.
async fn low_stock(State(state): State<AppState>) -> ApiResult<Json<Vec<LowStockRow>>> {
    let rows = state.db.reports().low_stock().await?;
    Ok(Json(rows))
}

/// GET /api/dashboard/best-seller - top product by summed margin, or null.
async fn best_seller(State(state): State<AppState>) -> ApiResult<Json<Option<BestSeller>>> {
    let best = state.db.reports().best_seller().await?;
    Ok(Json(best))
}

/// GET /api/dashboard/recent-sales - last 10 sales with margins.
async fn recent_sales(State(state): State<AppState>) -> ApiResult<Json<Vec<RecentSale>>> {
    let rows = state.db.reports().recent_sales().await?;
    Ok(Json(rows))
}

/// GET /api/dashboard/batches - 20 most recent batch groups.
async fn batches(State(state): State<AppState>) -> ApiResult<Json<Vec<BatchSummary>>> {
    let rows = state.db.reports().batches().await?;
    Ok(Json(rows))
}

/// GET /api/dashboard/batch-items/{batchCode} - the products of one batch.
async fn batch_items(
    State(state): State<AppState>,
    Path(batch_code): Path<String>,
) -> ApiResult<Json<Vec<Product>>> {
    let rows = state.db.reports().batch_items(&batch_code).await?;
    Ok(Json(rows))
}
