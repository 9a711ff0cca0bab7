//! # Product Repository
//!
//! Catalog queries plus the two restock paths:
//!
//! - single upsert keyed on barcode (`POST /api/products`)
//! - transactional bulk import sharing one batch code
//!   (`POST /api/products/import`)
//!
//! ## Batch semantics
//! ```text
//! import call ──► ONE batch code for every line
//!     line barcode is new      ──► INSERT, tagged with the call's batch code
//!     line barcode exists      ──► quantity += incoming, name/price/cost
//!                                  overwritten, ORIGINAL batch code kept
//! ```
//! Old stock is never relabelled under a new batch.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use minimart_core::Product;

/// Incoming fields for a single-product upsert or one import line.
///
/// The barcode is already resolved by the caller: blank input gets an
/// auto-generated `BAR-XXXXX` code before this layer sees it.
#[derive(Debug, Clone)]
pub struct ProductUpsert {
    pub name: String,
    pub barcode: String,
    pub price_cents: i64,
    pub cost_cents: i64,
    pub quantity: i64,
}

/// One line of a bulk import call.
pub type ImportLine = ProductUpsert;

/// Result of a bulk import call.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    /// Lines processed (inserted or merged into existing rows).
    pub imported: usize,
    /// The single batch code generated for this call.
    pub batch_code: String,
}

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// All products, ordered by surrogate id.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, barcode, price_cents, cost_cents, quantity, batch_code, created_at
            FROM products
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Gets a product by surrogate id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, barcode, price_cents, cost_cents, quantity, batch_code, created_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by its barcode (business key).
    pub async fn get_by_barcode(&self, barcode: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, barcode, price_cents, cost_cents, quantity, batch_code, created_at
            FROM products
            WHERE barcode = ?1
            "#,
        )
        .bind(barcode)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Single-product upsert keyed on barcode.
    ///
    /// Existing barcode: quantity is incremented, name/price/cost are
    /// overwritten, the original batch code stays. New barcode: inserted
    /// under `batch_code` with the current timestamp.
    ///
    /// Returns the affected row.
    pub async fn upsert_by_barcode(
        &self,
        input: &ProductUpsert,
        batch_code: &str,
    ) -> DbResult<Product> {
        debug!(barcode = %input.barcode, "Upserting product");

        let existing = self.get_by_barcode(&input.barcode).await?;

        match existing {
            Some(current) => {
                sqlx::query(
                    r#"
                    UPDATE products
                    SET name = ?1, price_cents = ?2, cost_cents = ?3,
                        quantity = quantity + ?4
                    WHERE barcode = ?5
                    "#,
                )
                .bind(&input.name)
                .bind(input.price_cents)
                .bind(input.cost_cents)
                .bind(input.quantity)
                .bind(&input.barcode)
                .execute(&self.pool)
                .await?;

                self.get_by_id(current.id)
                    .await?
                    .ok_or_else(|| DbError::not_found("Product", current.id))
            }
            None => {
                let now = Utc::now();
                let result = sqlx::query(
                    r#"
                    INSERT INTO products (name, barcode, price_cents, cost_cents, quantity, batch_code, created_at)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                    "#,
                )
                .bind(&input.name)
                .bind(&input.barcode)
                .bind(input.price_cents)
                .bind(input.cost_cents)
                .bind(input.quantity)
                .bind(batch_code)
                .bind(now)
                .execute(&self.pool)
                .await?;

                let id = result.last_insert_rowid();
                self.get_by_id(id)
                    .await?
                    .ok_or_else(|| DbError::not_found("Product", id))
            }
        }
    }

    /// Overwrites one product by surrogate id (manual edit).
    ///
    /// Batch code and creation timestamp are untouched; everything else is
    /// replaced, quantity included (an absolute set, not a delta).
    pub async fn overwrite(&self, id: i64, input: &ProductUpsert) -> DbResult<Product> {
        debug!(id = %id, "Overwriting product");

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?2, barcode = ?3, price_cents = ?4, cost_cents = ?5, quantity = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.barcode)
        .bind(input.price_cents)
        .bind(input.cost_cents)
        .bind(input.quantity)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Bulk import: applies every line under one batch code, all-or-nothing.
    ///
    /// Uses `INSERT ... ON CONFLICT (barcode) DO UPDATE`, keeping the
    /// original batch code and creation date on conflicting rows. Any line
    /// failure rolls back the whole call.
    pub async fn import(&self, lines: &[ImportLine], batch_code: &str) -> DbResult<ImportOutcome> {
        debug!(lines = lines.len(), batch = %batch_code, "Bulk import");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        for line in lines {
            sqlx::query(
                r#"
                INSERT INTO products (name, barcode, price_cents, cost_cents, quantity, batch_code, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                ON CONFLICT (barcode) DO UPDATE SET
                    name = excluded.name,
                    price_cents = excluded.price_cents,
                    cost_cents = excluded.cost_cents,
                    quantity = products.quantity + excluded.quantity
                "#,
            )
            .bind(&line.name)
            .bind(&line.barcode)
            .bind(line.price_cents)
            .bind(line.cost_cents)
            .bind(line.quantity)
            .bind(batch_code)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok(ImportOutcome {
            imported: lines.len(),
            batch_code: batch_code.to_string(),
        })
    }

    /// Counts product rows (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
