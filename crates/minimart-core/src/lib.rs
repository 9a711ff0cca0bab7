//! # minimart-core: Pure Business Logic for Minimart POS
//!
//! The domain layer of the Minimart point-of-sale backend. Everything here is
//! pure: no database, no network, no file system.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Minimart Architecture                              │
//! │                                                                         │
//! │  HTTP client (POS terminal, dashboard)                                  │
//! │       │ JSON                                                            │
//! │       ▼                                                                 │
//! │  apps/server (axum routes)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ★ minimart-core (THIS CRATE) ★                                         │
//! │    types • money • ids • settings • validation • error                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  minimart-db (SQLite queries, migrations, repositories)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. **Integer money**: all monetary values are cents (i64), never floats
//! 2. **Injectable time and randomness**: identifier generation is
//!    deterministic under test (see [`ids`])
//! 3. **Explicit errors**: typed variants, never strings or panics

pub mod error;
pub mod ids;
pub mod money;
pub mod settings;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult, ValidationError};
pub use ids::{Clock, IdGenerator, SystemClock, TransactionKind};
pub use money::Money;
pub use settings::StoreSettings;
pub use types::{LedgerEntry, LedgerKind, Product, Sale, SaleItem};

/// Stock level at or below which a product shows up on the low-stock report.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Maximum lines accepted in a single checkout call.
///
/// Prevents a malformed client from submitting a runaway cart; ordinary
/// baskets are far below this.
pub const MAX_CART_LINES: usize = 100;

/// Maximum lines accepted in a single bulk import call.
pub const MAX_IMPORT_LINES: usize = 5_000;
