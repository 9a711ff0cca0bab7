//! # Repositories
//!
//! One repository per aggregate:
//! - [`product::ProductRepository`] - catalog rows, upserts, bulk import
//! - [`sale::SaleRepository`] - the checkout transaction and sale lookups
//! - [`ledger::LedgerRepository`] - expense/income bookkeeping rows
//! - [`report::ReportRepository`] - read-only dashboard/accounting aggregates
//!
//! Repositories hold a pool handle and are cheap to construct per call, the
//! same pattern the `Database` accessors expose.

pub mod ledger;
pub mod product;
pub mod report;
pub mod sale;
