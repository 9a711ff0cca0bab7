//! # Sale Repository
//!
//! The checkout transaction and sale lookups.
//!
//! ## Checkout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BEGIN                                                                  │
//! │    total = Σ(qty × price)                                               │
//! │    INSERT sales (total, tax, transaction_code)                          │
//! │    for each cart line:                                                  │
//! │        UPDATE products SET quantity = quantity - qty WHERE id = ?       │
//! │        └── 0 rows affected → StockError, whole call rolls back          │
//! │        INSERT sale_items (price captured at sale time)                  │
//! │  COMMIT                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! The decrement checks row existence only; quantity may go negative on
//! oversell because no floor comparison is performed first.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use minimart_core::{Sale, SaleItem};

/// One line of a checkout cart.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub product_id: i64,
    pub quantity: i64,
    /// Unit price the terminal is selling at; captured into the sale item.
    pub price_cents: i64,
}

impl CartLine {
    #[inline]
    pub fn line_total_cents(&self) -> i64 {
        self.price_cents.saturating_mul(self.quantity)
    }
}

/// Result of a successful checkout.
#[derive(Debug, Clone)]
pub struct CheckoutOutcome {
    pub sale_id: i64,
    pub transaction_code: String,
    pub total_cents: i64,
}

/// A sale item joined with the live product row, for receipt/detail views.
///
/// `cost_cents` is the product's *current* cost, not a snapshot; margin math
/// on this view shifts when costs are edited later.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemDetail {
    pub id: i64,
    pub sale_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub price_at_sale_cents: i64,
    pub name: String,
    pub cost_cents: i64,
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Runs one checkout as a single transaction.
    ///
    /// `transaction_code` comes from the identifier generator; `tax_cents`
    /// arrives precomputed from the client's settings blob (zero when
    /// absent). The returned total is Σ(qty × price) over the lines — tax is
    /// recorded alongside, never folded into the total.
    pub async fn checkout(
        &self,
        lines: &[CartLine],
        transaction_code: &str,
        tax_cents: i64,
    ) -> DbResult<CheckoutOutcome> {
        let total_cents: i64 = lines.iter().map(CartLine::line_total_cents).sum();
        let now = Utc::now();

        debug!(
            lines = lines.len(),
            total = total_cents,
            code = %transaction_code,
            "Starting checkout transaction"
        );

        let mut tx = self.pool.begin().await?;

        let sale_id = sqlx::query(
            r#"
            INSERT INTO sales (transaction_code, total_cents, tax_cents, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(transaction_code)
        .bind(total_cents)
        .bind(tax_cents)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        for line in lines {
            // Decrement before inserting the item row so an unknown product
            // surfaces as a stock error, not a foreign key violation.
            let decremented = sqlx::query(
                r#"
                UPDATE products SET quantity = quantity - ?1 WHERE id = ?2
                "#,
            )
            .bind(line.quantity)
            .bind(line.product_id)
            .execute(&mut *tx)
            .await?;

            if decremented.rows_affected() == 0 {
                // Dropping the guard rolls everything back.
                return Err(DbError::StockError {
                    product_id: line.product_id,
                });
            }

            sqlx::query(
                r#"
                INSERT INTO sale_items (sale_id, product_id, quantity, price_at_sale_cents)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(sale_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.price_cents)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(sale_id, total = total_cents, code = %transaction_code, "Sale committed");

        Ok(CheckoutOutcome {
            sale_id,
            transaction_code: transaction_code.to_string(),
            total_cents,
        })
    }

    /// Gets a sale by surrogate id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, transaction_code, total_cents, tax_cents, created_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Most recent sales, newest first.
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, transaction_code, total_cents, tax_cents, created_at
            FROM sales
            ORDER BY created_at DESC, id DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Raw item rows for a sale.
    pub async fn get_items(&self, sale_id: i64) -> DbResult<Vec<SaleItem>> {
        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT id, sale_id, product_id, quantity, price_at_sale_cents
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Item rows joined with product name and live cost, for sale detail
    /// views.
    pub async fn get_items_with_product(&self, sale_id: i64) -> DbResult<Vec<SaleItemDetail>> {
        let items = sqlx::query_as::<_, SaleItemDetail>(
            r#"
            SELECT si.id, si.sale_id, si.product_id, si.quantity, si.price_at_sale_cents,
                   p.name, p.cost_cents
            FROM sale_items si
            JOIN products p ON si.product_id = p.id
            WHERE si.sale_id = ?1
            ORDER BY si.id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::product::ImportLine;

    async fn db_with_products() -> Database {
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

    fn cart(product_id: i64, qty: i64, price: i64) -> CartLine {
        CartLine {
            product_id,
            quantity: qty,
            price_cents: price,
        }
    }

    #[tokio::test]
    async fn checkout_decrements_stock_and_records_lines() {
        let db = db_with_products().await;

        let outcome = db
            .sales()
            .checkout(&[cart(1, 2, 500)], "SAL150126AAA", 0)
            .await
            .unwrap();
        assert_eq!(outcome.total_cents, 1000);

        let product = db.products().get_by_id(1).await.unwrap().unwrap();
        assert_eq!(product.quantity, 8);

        let items = db.sales().get_items(outcome.sale_id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].price_at_sale_cents, 500);
        assert_eq!(items[0].quantity, 2);

        let sale = db.sales().get_by_id(outcome.sale_id).await.unwrap().unwrap();
        assert_eq!(sale.total_cents, 1000);
        assert_eq!(sale.transaction_code, "SAL150126AAA");
    }

    #[tokio::test]
    async fn checkout_total_spans_all_lines() {
        let db = db_with_products().await;

        let outcome = db
            .sales()
            .checkout(&[cart(1, 2, 500), cart(2, 3, 250)], "SAL150126AAB", 0)
            .await
            .unwrap();
        assert_eq!(outcome.total_cents, 2 * 500 + 3 * 250);

        let items = db.sales().get_items(outcome.sale_id).await.unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn unknown_product_aborts_whole_sale() {
        let db = db_with_products().await;

        let err = db
            .sales()
            .checkout(&[cart(1, 2, 500), cart(999, 1, 100)], "SAL150126AAC", 0)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::StockError { product_id: 999 }));

        // Nothing persisted, stock untouched.
        assert!(db.sales().list_recent(10).await.unwrap().is_empty());
        let product = db.products().get_by_id(1).await.unwrap().unwrap();
        assert_eq!(product.quantity, 10);
    }

    #[tokio::test]
    async fn oversell_goes_negative_without_a_floor_check() {
        let db = db_with_products().await;

        // Chips has quantity 4; sell 6. Only row existence is checked.
        db.sales()
            .checkout(&[cart(2, 6, 250)], "SAL150126AAD", 0)
            .await
            .unwrap();

        let product = db.products().get_by_id(2).await.unwrap().unwrap();
        assert_eq!(product.quantity, -2);
    }

    #[tokio::test]
    async fn tax_is_recorded_but_not_folded_into_total() {
        let db = db_with_products().await;

        let outcome = db
            .sales()
            .checkout(&[cart(1, 1, 500)], "SAL150126AAE", 41)
            .await
            .unwrap();
        assert_eq!(outcome.total_cents, 500);

        let sale = db.sales().get_by_id(outcome.sale_id).await.unwrap().unwrap();
        assert_eq!(sale.tax_cents, 41);
        assert_eq!(sale.total_cents, 500);
    }

    #[tokio::test]
    async fn sale_detail_joins_live_product_cost() {
        let db = db_with_products().await;

        let outcome = db
            .sales()
            .checkout(&[cart(1, 2, 500)], "SAL150126AAF", 0)
            .await
            .unwrap();

        let detail = db
            .sales()
            .get_items_with_product(outcome.sale_id)
            .await
            .unwrap();
        assert_eq!(detail.len(), 1);
        assert_eq!(detail[0].name, "Cola");
        assert_eq!(detail[0].cost_cents, 300);
    }
}
