//! Transaction operations

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};
use tracing::{debug, info, warn};

use super::transaction_filter::{TransactionFilter, TRANSACTION_COLUMNS};
use super::Database;
use crate::error::{Error, Result};
use crate::models::{NewTransaction, Totals, Transaction, TransactionType};

/// SQLite stores infinity as a REAL that passes `CHECK(amount >= 0)`,
/// so finiteness is enforced here.
fn check_amount(tx: &NewTransaction) -> Result<()> {
    if !tx.amount.is_finite() {
        return Err(Error::Constraint(format!(
            "amount must be a finite number, got {}",
            tx.amount
        )));
    }
    Ok(())
}

const INSERT_SQL: &str = r#"
    INSERT INTO transactions (type, category, amount, description, date)
    VALUES (?, ?, ?, ?, ?)
"#;

impl Database {
    /// Insert a transaction and return its new id
    ///
    /// Negative or non-finite amounts are rejected by the store with
    /// [`Error::Constraint`]. Identical rows are not deduplicated.
    pub fn insert_transaction(&self, tx: &NewTransaction) -> Result<i64> {
        check_amount(tx)?;
        let conn = self.conn()?;

        conn.execute(
            INSERT_SQL,
            params![
                tx.tx_type.as_str(),
                tx.category,
                tx.amount,
                tx.description,
                tx.date.to_string(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!(id, tx_type = %tx.tx_type, amount = tx.amount, "Inserted transaction");
        Ok(id)
    }

    /// Insert many transactions inside one SQL transaction
    ///
    /// Either every row is committed or, on the first failure, the whole
    /// batch is rolled back and the error is returned.
    pub fn bulk_insert_transactions(&self, txs: &[NewTransaction]) -> Result<usize> {
        txs.iter().try_for_each(check_amount)?;

        let mut conn = self.conn()?;
        let sql_tx = conn.transaction()?;

        {
            let mut stmt = sql_tx.prepare(INSERT_SQL)?;
            for (index, tx) in txs.iter().enumerate() {
                let inserted = stmt.execute(params![
                    tx.tx_type.as_str(),
                    tx.category,
                    tx.amount,
                    tx.description,
                    tx.date.to_string(),
                ]);
                if let Err(e) = inserted {
                    // Dropping `sql_tx` without commit rolls the batch back
                    warn!(row = index, error = %e, "Bulk insert failed, rolling back");
                    return Err(e.into());
                }
            }
        }

        sql_tx.commit()?;
        info!(count = txs.len(), "Bulk inserted transactions");
        Ok(txs.len())
    }

    /// Delete a transaction by id
    ///
    /// Deleting an id that does not exist is not an error.
    pub fn delete_transaction(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM transactions WHERE id = ?", params![id])?;

        if removed == 0 {
            debug!(id, "Delete matched no transaction");
        } else {
            info!(id, "Deleted transaction");
        }
        Ok(())
    }

    /// Delete every transaction, returning how many rows were removed
    pub fn delete_all_transactions(&self) -> Result<usize> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM transactions", [])?;

        info!(removed, "All transactions deleted");
        Ok(removed)
    }

    /// List transactions matching a filter, newest date first, then newest id
    pub fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let query = filter.build();

        let mut stmt = conn.prepare(&query.build_select_query())?;
        let transactions = stmt
            .query_map(query.params_refs().as_slice(), Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Count transactions matching a filter
    pub fn count_transactions(&self, filter: &TransactionFilter) -> Result<i64> {
        let conn = self.conn()?;
        let query = filter.build();

        let count: i64 = conn.query_row(
            &query.build_count_query(),
            query.params_refs().as_slice(),
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Get a single transaction by ID
    pub fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;

        let tx = conn
            .query_row(
                &format!("SELECT {} FROM transactions t WHERE t.id = ?", TRANSACTION_COLUMNS),
                params![id],
                Self::row_to_transaction,
            )
            .optional()?;
        Ok(tx)
    }

    /// Income and expense sums over the whole store
    pub fn store_totals(&self) -> Result<Totals> {
        let conn = self.conn()?;

        let (income, expense): (f64, f64) = conn.query_row(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN type = 'income' THEN amount END), 0),
                COALESCE(SUM(CASE WHEN type = 'expense' THEN amount END), 0)
            FROM transactions
            "#,
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(Totals { income, expense })
    }

    pub(crate) fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        let type_str: String = row.get(1)?;
        let date_str: String = row.get(5)?;
        let description: Option<String> = row.get(4)?;

        let tx_type: TransactionType = type_str.parse().map_err(|e: String| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, e.into())
        })?;
        let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(Transaction {
            id: row.get(0)?,
            tx_type,
            category: row.get(2)?,
            amount: row.get(3)?,
            description: description.unwrap_or_else(|| crate::models::DEFAULT_DESCRIPTION.to_string()),
            date,
        })
    }
}
