//! # API Routes
//!
//! One module per surface:
//! - [`products`] - catalog CRUD and bulk import
//! - [`checkout`] - the sale transaction
//! - [`accounting`] - expense/income ledger and profit-loss
//! - [`dashboard`] - stats, low stock, best seller, batches
//! - [`sales`] - sale listings and per-sale detail
//! - [`health`] - liveness probe
//!
//! Each module exposes `router()`; this module merges them and attaches the
//! shared middleware stack.

pub mod accounting;
pub mod checkout;
pub mod dashboard;
pub mod health;
pub mod products;
pub mod sales;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(products::router())
        .merge(checkout::router())
        .merge(accounting::router())
        .merge(dashboard::router())
        .merge(sales::router())
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        // The POS terminal and dashboard are browser apps served elsewhere.
        .layer(CorsLayer::permissive())
        .with_state(state)
}
