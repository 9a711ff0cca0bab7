//! # Report Repository
//!
//! Read-only aggregates behind the dashboard and accounting endpoints. Every
//! query is a pure function of the stored rows, recomputed on each request:
//! no caching, fixed small limits.
//!
//! Margin math joins the *live* `products.cost_cents` (cost is not
//! snapshotted at sale time), so editing a cost after the fact shifts
//! historical profit. See DESIGN.md.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::error::DbResult;
use minimart_core::{LedgerKind, Product, LOW_STOCK_THRESHOLD};

/// Fixed row limit for the recent-sales card.
const RECENT_SALES_LIMIT: u32 = 10;

/// Fixed row limit for the batch history card.
const BATCH_HISTORY_LIMIT: u32 = 20;

// =============================================================================
// Period
// =============================================================================

/// Reporting period for the dashboard stats card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Daily,
    Monthly,
    Yearly,
}

impl Period {
    /// Parses the path segment used by the stats endpoint.
    pub fn parse(s: &str) -> Option<Period> {
        match s {
            "daily" => Some(Period::Daily),
            "monthly" => Some(Period::Monthly),
            "yearly" => Some(Period::Yearly),
            _ => None,
        }
    }

    /// Start of the period containing `now`, in UTC.
    pub fn start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let date = now.date_naive();
        let start_date = match self {
            Period::Daily => date,
            Period::Monthly => date.with_day(1).expect("day 1 always valid"),
            Period::Yearly => date
                .with_day(1)
                .and_then(|d| d.with_month(1))
                .expect("jan 1 always valid"),
        };
        start_date
            .and_hms_opt(0, 0, 0)
            .expect("midnight always valid")
            .and_utc()
    }
}

// =============================================================================
// Aggregate Rows
// =============================================================================

/// Profit & loss summary: revenue = Σ(qty × (price_at_sale − live cost)),
/// expenses = Σ(expense amounts), profit = revenue − expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLoss {
    pub revenue_cents: i64,
    pub expenses_cents: i64,
    pub profit_cents: i64,
}

/// Sales volume for one period.
#[derive(Debug, Clone, Copy, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStats {
    pub total_sales_cents: i64,
    pub total_orders: i64,
}

/// A product at or below the low-stock threshold.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LowStockRow {
    pub name: String,
    pub quantity: i64,
}

/// The single best-selling product by summed margin.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BestSeller {
    pub name: String,
    pub total_sold: i64,
    pub total_sales_cents: i64,
    pub total_margin_cents: i64,
}

/// One row of the recent-sales card: the sale plus its summed margin.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecentSale {
    pub id: i64,
    pub transaction_code: String,
    pub total_cents: i64,
    pub margin_cents: i64,
    pub created_at: DateTime<Utc>,
}

/// One batch group: products sharing a batch code.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub batch_code: String,
    pub first_added: DateTime<Utc>,
    pub item_count: i64,
    /// Σ(price × quantity) over the batch at live prices.
    pub total_value_cents: i64,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for dashboard and accounting aggregates.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Profit & loss over all stored rows.
    pub async fn profit_loss(&self) -> DbResult<ProfitLoss> {
        let revenue_cents: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(si.quantity * (si.price_at_sale_cents - p.cost_cents)), 0)
            FROM sale_items si
            JOIN products p ON si.product_id = p.id
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let expenses_cents: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(amount_cents), 0)
            FROM ledger_entries
            WHERE kind = ?1
            "#,
        )
        .bind(LedgerKind::Expense.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(ProfitLoss {
            revenue_cents,
            expenses_cents,
            profit_cents: revenue_cents - expenses_cents,
        })
    }

    /// Sales total and order count for the period containing `now`.
    ///
    /// The boundary is computed here and passed as a parameter so the query
    /// itself stays clock-free.
    pub async fn stats(&self, period: Period, now: DateTime<Utc>) -> DbResult<PeriodStats> {
        let start = period.start(now);

        let stats = sqlx::query_as::<_, PeriodStats>(
            r#"
            SELECT COALESCE(SUM(total_cents), 0) AS total_sales_cents,
                   COUNT(id) AS total_orders
            FROM sales
            WHERE created_at >= ?1
            "#,
        )
        .bind(start)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    /// Products at or below the low-stock threshold, emptiest first.
    pub async fn low_stock(&self) -> DbResult<Vec<LowStockRow>> {
        let rows = sqlx::query_as::<_, LowStockRow>(
            r#"
            SELECT name, quantity
            FROM products
            WHERE quantity <= ?1
            ORDER BY quantity ASC
            "#,
        )
        .bind(LOW_STOCK_THRESHOLD)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Best-selling product by summed margin, if any sales exist.
    pub async fn best_seller(&self) -> DbResult<Option<BestSeller>> {
        let row = sqlx::query_as::<_, BestSeller>(
            r#"
            SELECT p.name,
                   SUM(si.quantity) AS total_sold,
                   SUM(si.quantity * si.price_at_sale_cents) AS total_sales_cents,
                   SUM(si.quantity * (si.price_at_sale_cents - p.cost_cents)) AS total_margin_cents
            FROM sale_items si
            JOIN products p ON si.product_id = p.id
            GROUP BY p.id, p.name
            ORDER BY total_margin_cents DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Last 10 sales with their summed margins, newest first.
    pub async fn recent_sales(&self) -> DbResult<Vec<RecentSale>> {
        let rows = sqlx::query_as::<_, RecentSale>(
            r#"
            SELECT s.id, s.transaction_code, s.total_cents,
                   COALESCE(SUM(si.quantity * (si.price_at_sale_cents - p.cost_cents)), 0) AS margin_cents,
                   s.created_at
            FROM sales s
            LEFT JOIN sale_items si ON s.id = si.sale_id
            LEFT JOIN products p ON si.product_id = p.id
            GROUP BY s.id
            ORDER BY s.created_at DESC, s.id DESC
            LIMIT ?1
            "#,
        )
        .bind(RECENT_SALES_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// 20 most recent batch groups with counts and shelf value.
    pub async fn batches(&self) -> DbResult<Vec<BatchSummary>> {
        let rows = sqlx::query_as::<_, BatchSummary>(
            r#"
            SELECT batch_code,
                   MIN(created_at) AS first_added,
                   COUNT(*) AS item_count,
                   COALESCE(SUM(price_cents * quantity), 0) AS total_value_cents
            FROM products
            GROUP BY batch_code
            ORDER BY first_added DESC
            LIMIT ?1
            "#,
        )
        .bind(BATCH_HISTORY_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Products belonging to one batch, ordered by surrogate id.
    pub async fn batch_items(&self, batch_code: &str) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, barcode, price_cents, cost_cents, quantity, batch_code, created_at
            FROM products
            WHERE batch_code = ?1
            ORDER BY id ASC
            "#,
        )
        .bind(batch_code)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::product::ImportLine;
    use crate::repository::sale::CartLine;
    use chrono::TimeZone;

    async fn seeded_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.products()
            .import(
                &[
                    ImportLine {
                        name: "Cola".into(),
                        barcode: "123".into(),
                        price_cents: 500,
                        cost_cents: 300,
                        quantity: 10,
                    },
                    ImportLine {
                        name: "Chips".into(),
                        barcode: "456".into(),
                        price_cents: 250,
                        cost_cents: 100,
                        quantity: 4,
                    },
                ],
                "B150126AAAA",
            )
            .await
            .unwrap();
        db
    }

    #[test]
    fn period_parse_and_start() {
        assert_eq!(Period::parse("daily"), Some(Period::Daily));
        assert_eq!(Period::parse("weekly"), None);

        let now = Utc.with_ymd_and_hms(2026, 3, 17, 15, 30, 0).unwrap();
        assert_eq!(
            Period::Daily.start(now),
            Utc.with_ymd_and_hms(2026, 3, 17, 0, 0, 0).unwrap()
        );
        assert_eq!(
            Period::Monthly.start(now),
            Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            Period::Yearly.start(now),
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn profit_is_revenue_minus_expenses() {
        let db = seeded_db().await;

        // 2 × (500 − 300) = 400 margin
        db.sales()
            .checkout(
                &[CartLine {
                    product_id: 1,
                    quantity: 2,
                    price_cents: 500,
                }],
                "SAL1",
                0,
            )
            .await
            .unwrap();
        db.ledger()
            .insert(LedgerKind::Expense, "EXP1", "Rent", 150)
            .await
            .unwrap();

        let pl = db.reports().profit_loss().await.unwrap();
        assert_eq!(pl.revenue_cents, 400);
        assert_eq!(pl.expenses_cents, 150);
        assert_eq!(pl.profit_cents, 250);

        // Round-trip law: identical output without intervening writes.
        let again = db.reports().profit_loss().await.unwrap();
        assert_eq!(pl, again);
    }

    #[tokio::test]
    async fn cost_edit_shifts_historical_profit() {
        let db = seeded_db().await;
        db.sales()
            .checkout(
                &[CartLine {
                    product_id: 1,
                    quantity: 2,
                    price_cents: 500,
                }],
                "SAL1",
                0,
            )
            .await
            .unwrap();

        let before = db.reports().profit_loss().await.unwrap();
        assert_eq!(before.revenue_cents, 400);

        // Raise the cost; revenue is recomputed against the live row.
        let p = db.products().get_by_id(1).await.unwrap().unwrap();
        db.products()
            .overwrite(
                1,
                &ImportLine {
                    name: p.name,
                    barcode: p.barcode,
                    price_cents: p.price_cents,
                    cost_cents: 400,
                    quantity: p.quantity,
                },
            )
            .await
            .unwrap();

        let after = db.reports().profit_loss().await.unwrap();
        assert_eq!(after.revenue_cents, 200);
    }

    #[tokio::test]
    async fn period_stats_count_todays_sales() {
        let db = seeded_db().await;
        db.sales()
            .checkout(
                &[CartLine {
                    product_id: 1,
                    quantity: 1,
                    price_cents: 500,
                }],
                "SAL1",
                0,
            )
            .await
            .unwrap();

        let stats = db.reports().stats(Period::Daily, Utc::now()).await.unwrap();
        assert_eq!(stats.total_orders, 1);
        assert_eq!(stats.total_sales_cents, 500);

        let yearly = db
            .reports()
            .stats(Period::Yearly, Utc::now())
            .await
            .unwrap();
        assert_eq!(yearly.total_orders, 1);
    }

    #[tokio::test]
    async fn low_stock_lists_emptiest_first() {
        let db = seeded_db().await;
        // Cola has 10 (at threshold), Chips has 4.
        let rows = db.reports().low_stock().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Chips");
        assert_eq!(rows[1].name, "Cola");
    }

    #[tokio::test]
    async fn best_seller_ranks_by_margin() {
        let db = seeded_db().await;
        assert!(db.reports().best_seller().await.unwrap().is_none());

        // Cola margin 2×200 = 400, Chips margin 1×150 = 150.
        db.sales()
            .checkout(
                &[
                    CartLine {
                        product_id: 1,
                        quantity: 2,
                        price_cents: 500,
                    },
                    CartLine {
                        product_id: 2,
                        quantity: 1,
                        price_cents: 250,
                    },
                ],
                "SAL1",
                0,
            )
            .await
            .unwrap();

        let best = db.reports().best_seller().await.unwrap().unwrap();
        assert_eq!(best.name, "Cola");
        assert_eq!(best.total_sold, 2);
        assert_eq!(best.total_margin_cents, 400);
    }

    #[tokio::test]
    async fn recent_sales_carry_margins() {
        let db = seeded_db().await;
        db.sales()
            .checkout(
                &[CartLine {
                    product_id: 1,
                    quantity: 2,
                    price_cents: 500,
                }],
                "SAL1",
                0,
            )
            .await
            .unwrap();

        let rows = db.reports().recent_sales().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].transaction_code, "SAL1");
        assert_eq!(rows[0].total_cents, 1000);
        assert_eq!(rows[0].margin_cents, 400);
    }

    #[tokio::test]
    async fn batches_group_by_code() {
        let db = seeded_db().await;
        db.products()
            .import(
                &[ImportLine {
                    name: "Water".into(),
                    barcode: "789".into(),
                    price_cents: 100,
                    cost_cents: 40,
                    quantity: 50,
                }],
                "B160126BBBB",
            )
            .await
            .unwrap();

        let batches = db.reports().batches().await.unwrap();
        assert_eq!(batches.len(), 2);

        let first = batches
            .iter()
            .find(|b| b.batch_code == "B150126AAAA")
            .unwrap();
        assert_eq!(first.item_count, 2);
        assert_eq!(first.total_value_cents, 500 * 10 + 250 * 4);

        let items = db.reports().batch_items("B150126AAAA").await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Cola");
    }
}
