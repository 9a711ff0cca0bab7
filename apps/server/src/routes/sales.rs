//! # Sales Routes
//!
//! Listing and per-sale detail for the sales history screen.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use minimart_core::Sale;
use minimart_db::SaleItemDetail;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Listing page size for the sales history table.
const SALES_PAGE: u32 = 50;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/sales/all", get(list_all))
        .route("/api/sales/{sale_id}/items", get(items))
}

/// GET /api/sales/all - recent sales, newest first.
async fn list_all(State(state): State<AppState>) -> ApiResult<Json<Vec<Sale>>> {
    let sales = state.db.sales().list_recent(SALES_PAGE).await?;
    Ok(Json(sales))
}

/// GET /api/sales/{saleId}/items - item rows joined with product name and
/// live cost. 404 for a sale id that does not exist.
async fn items(
    State(state): State<AppState>,
    Path(sale_id): Path<i64>,
) -> ApiResult<Json<Vec<SaleItemDetail>>> {
    if state.db.sales().get_by_id(sale_id).await?.is_none() {
        return Err(ApiError::NotFound {
            entity: "Sale",
            id: sale_id.to_string(),
        });
    }

    let items = state.db.sales().get_items_with_product(sale_id).await?;
    Ok(Json(items))
}
