//! # Domain Types
//!
//! Core rows of the Minimart data model.
//!
//! ## Dual-Key Identity Pattern
//! Every entity carries:
//! - `id`: surrogate integer key, used for database relations
//! - a business code where one exists: `barcode` and `batch_code` on
//!   products, `transaction_code` on sales and ledger entries
//!
//! Serde output is camelCase since these rows go straight onto the JSON API.
//! The `sqlx` feature adds `FromRow`/`Type` derives for the database layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product on the shelf.
///
/// Mutated by restock (quantity up, name/price/cost may be overwritten),
/// sale (quantity down) and manual edit. Never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Surrogate key.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Business key; unique. Auto-generated (`BAR-XXXXX`) when the client
    /// supplies none.
    pub barcode: String,

    /// Unit sell price in cents.
    pub price_cents: i64,

    /// Unit cost in cents. Read live by the profit reports, so editing it
    /// rewrites historical margins (accepted design, see DESIGN.md).
    pub cost_cents: i64,

    /// Quantity on hand. Checkout decrements without a floor check, so this
    /// can go negative on oversell.
    pub quantity: i64,

    /// Batch code assigned when the row was first created; preserved across
    /// restocks.
    pub batch_code: String,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Product {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }

    /// Current margin per unit at live price and cost.
    #[inline]
    pub fn unit_margin(&self) -> Money {
        self.price() - self.cost()
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One completed checkout. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,

    /// Human-readable code, `SAL` + DDMMYY + random suffix.
    pub transaction_code: String,

    /// Σ(qty × unit price) over the cart lines.
    pub total_cents: i64,

    /// Tax as computed by the client from its settings blob; zero when the
    /// client sent none. Not derived server-side.
    pub tax_cents: i64,

    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line of a sale. Created only alongside its parent, in the same
/// transaction.
///
/// `price_at_sale_cents` is captured at checkout so revenue history survives
/// later price edits (the cost side is deliberately *not* snapshotted).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: i64,
    pub sale_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub price_at_sale_cents: i64,
}

impl SaleItem {
    /// Revenue contribution of this line at the captured price.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.price_at_sale_cents) * self.quantity
    }
}

// =============================================================================
// Ledger
// =============================================================================

/// Whether a ledger entry is money out or money in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum LedgerKind {
    Expense,
    Income,
}

impl LedgerKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            LedgerKind::Expense => "expense",
            LedgerKind::Income => "income",
        }
    }
}

/// A bookkeeping row independent of products and sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: i64,
    pub kind: LedgerKind,

    /// `EXP`/`INC` + DDMMYY + random suffix.
    pub transaction_code: String,

    pub description: String,
    pub amount_cents: i64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn product() -> Product {
        Product {
            id: 1,
            name: "Cola".into(),
            barcode: "123".into(),
            price_cents: 500,
            cost_cents: 300,
            quantity: 10,
            batch_code: "B150126X7K2".into(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 15, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn unit_margin() {
        assert_eq!(product().unit_margin().cents(), 200);
    }

    #[test]
    fn sale_item_line_total() {
        let item = SaleItem {
            id: 1,
            sale_id: 1,
            product_id: 1,
            quantity: 2,
            price_at_sale_cents: 500,
        };
        assert_eq!(item.line_total().cents(), 1000);
    }

    #[test]
    fn product_serializes_camel_case() {
        let json = serde_json::to_value(product()).unwrap();
        assert_eq!(json["priceCents"], 500);
        assert_eq!(json["batchCode"], "B150126X7K2");
    }

    #[test]
    fn ledger_kind_round_trips() {
        let json = serde_json::to_string(&LedgerKind::Expense).unwrap();
        assert_eq!(json, "\"expense\"");
        let back: LedgerKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LedgerKind::Expense);
    }
}
