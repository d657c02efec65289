//! Transaction filter builder for constructing dynamic SQL queries
//!
//! Every present field adds one predicate, predicates are joined with AND,
//! and every value is bound through a `?` placeholder.

use chrono::NaiveDate;

use crate::models::TransactionType;

/// Columns selected for every transaction query, in `row_to_transaction` order
pub(crate) const TRANSACTION_COLUMNS: &str = "t.id, t.type, t.category, t.amount, t.description, t.date";

/// Builder for constructing transaction query filters
///
/// The lifetime `'query` represents how long the borrowed category name
/// must remain valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionFilter<'query> {
    pub tx_type: Option<TransactionType>,
    pub category: Option<&'query str>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Result of building a filter - contains SQL components and parameters
pub struct FilterResult {
    /// WHERE clause including "WHERE" keyword (empty if no conditions)
    pub where_clause: String,
    /// ORDER BY clause including "ORDER BY" keyword
    pub order_clause: &'static str,
    /// Parameters for the query (boxed for rusqlite compatibility)
    pub params: Vec<Box<dyn rusqlite::ToSql>>,
}

impl<'query> TransactionFilter<'query> {
    /// Create a new filter builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set transaction type filter
    pub fn tx_type(mut self, tx_type: Option<TransactionType>) -> Self {
        self.tx_type = tx_type;
        self
    }

    /// Set category filter (blank means all categories)
    pub fn category(mut self, category: Option<&'query str>) -> Self {
        self.category = category;
        self
    }

    /// Set inclusive lower date bound
    pub fn date_from(mut self, date: Option<NaiveDate>) -> Self {
        self.date_from = date;
        self
    }

    /// Set inclusive upper date bound
    pub fn date_to(mut self, date: Option<NaiveDate>) -> Self {
        self.date_to = date;
        self
    }

    /// True when no predicate would be emitted
    pub fn is_empty(&self) -> bool {
        self.build_conditions().0.is_empty()
    }

    fn build_conditions(&self) -> (Vec<&'static str>, Vec<Box<dyn rusqlite::ToSql>>) {
        let mut conditions = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(tx_type) = self.tx_type {
            conditions.push("t.type = ?");
            params.push(Box::new(tx_type.as_str()));
        }

        if let Some(category) = self.category {
            if !category.trim().is_empty() {
                conditions.push("t.category = ?");
                params.push(Box::new(category.trim().to_string()));
            }
        }

        // ISO-8601 dates compare correctly as text
        if let Some(from) = self.date_from {
            conditions.push("t.date >= ?");
            params.push(Box::new(from.to_string()));
        }

        if let Some(to) = self.date_to {
            conditions.push("t.date <= ?");
            params.push(Box::new(to.to_string()));
        }

        (conditions, params)
    }

    /// Build the filter components
    pub fn build(self) -> FilterResult {
        let (conditions, params) = self.build_conditions();

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        FilterResult {
            where_clause,
            order_clause: "ORDER BY t.date DESC, t.id DESC",
            params,
        }
    }
}

impl FilterResult {
    /// Build the full SELECT query
    pub fn build_select_query(&self) -> String {
        format!(
            "SELECT {} FROM transactions t {} {}",
            TRANSACTION_COLUMNS, self.where_clause, self.order_clause
        )
    }

    /// Build a COUNT query
    pub fn build_count_query(&self) -> String {
        format!("SELECT COUNT(*) FROM transactions t {}", self.where_clause)
    }

    /// Get parameter references for query execution
    pub fn params_refs(&self) -> Vec<&dyn rusqlite::ToSql> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }
}
