//! JSON export and import of the transactions table
//!
//! Export writes every stored row as a pretty-printed JSON array. Import reads
//! the same shape back and inserts it through the bulk path, so a single bad
//! element leaves the store untouched.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{info, warn};

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction, TransactionType, DEFAULT_DESCRIPTION};

/// File name used for an export taken on `today`
pub fn export_file_name(today: NaiveDate) -> String {
    format!("finance_data_{}.json", today.format("%Y-%m-%d"))
}

/// One element of an import file
///
/// `id` is accepted so an export can be fed straight back in, but it is
/// never written; the store assigns fresh ids.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl ImportRecord {
    fn into_new(self, index: usize, today: NaiveDate) -> Result<NewTransaction> {
        let category = self.category.trim();
        if category.is_empty() {
            return Err(Error::Import(format!("element {}: category is empty", index)));
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::Import(format!(
                "element {}: invalid amount {}",
                index, self.amount
            )));
        }

        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_DESCRIPTION);

        Ok(NewTransaction::new(
            self.tx_type,
            category,
            self.amount,
            description,
            self.date.unwrap_or(today),
        ))
    }
}

/// Parse an import document into insertable transactions
///
/// Fails on malformed JSON, on a document that is not an array, and on the
/// first element that does not validate.
pub fn parse_import(json: &str, today: NaiveDate) -> Result<Vec<NewTransaction>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)
        .map_err(|e| Error::Import(format!("expected a JSON array of transactions: {}", e)))?;

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let record: ImportRecord = serde_json::from_value(value)
                .map_err(|e| Error::Import(format!("element {}: {}", index, e)))?;
            record.into_new(index, today)
        })
        .collect()
}

impl Database {
    /// Every stored transaction in insertion order
    pub fn export_transactions(&self) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transactions t ORDER BY t.id",
            crate::db::TRANSACTION_COLUMNS
        ))?;

        let rows = stmt
            .query_map([], Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Export the transactions table as a pretty-printed JSON array
    pub fn export_json(&self) -> Result<String> {
        let rows = self.export_transactions()?;
        info!(count = rows.len(), "Exported transactions");
        Ok(serde_json::to_string_pretty(&rows)?)
    }

    /// Import a JSON array of transactions, all or nothing
    ///
    /// Returns the number of rows inserted.
    pub fn import_json(&self, json: &str, today: NaiveDate) -> Result<usize> {
        let txs = match parse_import(json, today) {
            Ok(txs) => txs,
            Err(e) => {
                warn!(error = %e, "Rejected import document");
                return Err(e);
            }
        };

        let inserted = self.bulk_insert_transactions(&txs).map_err(|e| match e {
            Error::Constraint(msg) => Error::Import(msg),
            other => Error::Import(other.to_string()),
        })?;

        info!(count = inserted, "Imported transactions");
        Ok(inserted)
    }
}
