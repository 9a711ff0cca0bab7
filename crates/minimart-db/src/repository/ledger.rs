//! # Ledger Repository
//!
//! Append-only expense and income rows, independent of products and sales.
//! Each row carries a generated `EXP`/`INC` transaction code.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use minimart_core::{LedgerEntry, LedgerKind};

/// Repository for expense/income bookkeeping rows.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: SqlitePool,
}

impl LedgerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        LedgerRepository { pool }
    }

    /// Inserts one ledger row and returns it.
    pub async fn insert(
        &self,
        kind: LedgerKind,
        transaction_code: &str,
        description: &str,
        amount_cents: i64,
    ) -> DbResult<LedgerEntry> {
        debug!(kind = kind.as_str(), code = %transaction_code, amount = amount_cents, "Inserting ledger entry");

        let now = Utc::now();
        let id = sqlx::query(
            r#"
            INSERT INTO ledger_entries (kind, transaction_code, description, amount_cents, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(kind.as_str())
        .bind(transaction_code)
        .bind(description)
        .bind(amount_cents)
        .bind(now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("LedgerEntry", id))
    }

    /// Gets one entry by surrogate id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<LedgerEntry>> {
        let entry = sqlx::query_as::<_, LedgerEntry>(
            r#"
            SELECT id, kind, transaction_code, description, amount_cents, created_at
            FROM ledger_entries
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Entries of one kind, newest first.
    pub async fn list(&self, kind: LedgerKind, limit: u32) -> DbResult<Vec<LedgerEntry>> {
        let entries = sqlx::query_as::<_, LedgerEntry>(
            r#"
            SELECT id, kind, transaction_code, description, amount_cents, created_at
            FROM ledger_entries
            WHERE kind = ?1
            ORDER BY created_at DESC, id DESC
            LIMIT ?2
            "#,
        )
        .bind(kind.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Sum of all entries of one kind, in cents.
    pub async fn sum(&self, kind: LedgerKind) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(amount_cents), 0)
            FROM ledger_entries
            WHERE kind = ?1
            "#,
        )
        .bind(kind.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn insert_and_list_by_kind() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.ledger();

        let rent = repo
            .insert(LedgerKind::Expense, "EXP150126AAA", "Rent", 50_000)
            .await
            .unwrap();
        assert_eq!(rent.kind, LedgerKind::Expense);
        assert_eq!(rent.amount_cents, 50_000);

        repo.insert(LedgerKind::Income, "INC150126AAA", "Scrap sale", 1_200)
            .await
            .unwrap();

        let expenses = repo.list(LedgerKind::Expense, 20).await.unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].description, "Rent");

        let income = repo.list(LedgerKind::Income, 20).await.unwrap();
        assert_eq!(income.len(), 1);
    }

    #[tokio::test]
    async fn sums_are_per_kind() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.ledger();

        repo.insert(LedgerKind::Expense, "EXP1", "Rent", 50_000)
            .await
            .unwrap();
        repo.insert(LedgerKind::Expense, "EXP2", "Electricity", 7_500)
            .await
            .unwrap();
        repo.insert(LedgerKind::Income, "INC1", "Misc", 900)
            .await
            .unwrap();

        assert_eq!(repo.sum(LedgerKind::Expense).await.unwrap(), 57_500);
        assert_eq!(repo.sum(LedgerKind::Income).await.unwrap(), 900);
    }
}
