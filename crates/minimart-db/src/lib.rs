//! # minimart-db: Database Layer for Minimart POS
//!
//! SQLite-backed storage for the Minimart backend.
//!
//! ## Responsibility
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          minimart-db                                    │
//! │                                                                         │
//! │  ✅ RESPONSIBILITIES                   ❌ NOT RESPONSIBLE FOR           │
//! │  ──────────────────────                ─────────────────────────        │
//! │  • Connection pool management          • Business logic (core crate)    │
//! │  • SQL query execution                 • HTTP/JSON formatting (server)  │
//! │  • Schema migrations                   • Identifier generation (core)   │
//! │  • Repository implementations                                           │
//! │  • Transaction management                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Transactions
//! The two multi-statement writes (bulk import, checkout) run inside
//! `pool.begin()`; the sqlx transaction guard rolls back on drop, so every
//! failure path releases the connection with nothing persisted.

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::ledger::LedgerRepository;
pub use repository::product::{ImportLine, ImportOutcome, ProductRepository, ProductUpsert};
pub use repository::report::{
    BatchSummary, BestSeller, LowStockRow, Period, PeriodStats, ProfitLoss, RecentSale,
    ReportRepository,
};
pub use repository::sale::{CartLine, CheckoutOutcome, SaleItemDetail, SaleRepository};
