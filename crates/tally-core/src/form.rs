//! Transaction entry form
//!
//! Turns raw user-entered fields into a [`NewTransaction`], applying the
//! form defaults and rejecting incomplete input before the store sees it.

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::{NewTransaction, TransactionType, DEFAULT_DESCRIPTION};

/// Raw form fields as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub tx_type: Option<String>,
    pub category: Option<String>,
    pub amount: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
}

impl TransactionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tx_type(mut self, value: impl Into<String>) -> Self {
        self.tx_type = Some(value.into());
        self
    }

    pub fn category(mut self, value: impl Into<String>) -> Self {
        self.category = Some(value.into());
        self
    }

    pub fn amount(mut self, value: impl Into<String>) -> Self {
        self.amount = Some(value.into());
        self
    }

    pub fn description(mut self, value: impl Into<String>) -> Self {
        self.description = Some(value.into());
        self
    }

    pub fn date(mut self, value: impl Into<String>) -> Self {
        self.date = Some(value.into());
        self
    }

    /// Prefilled form for the quick-add buttons
    pub fn quick(tx_type: TransactionType, category: &str, amount: f64, today: NaiveDate) -> Self {
        Self {
            tx_type: Some(tx_type.as_str().to_string()),
            category: Some(category.to_string()),
            amount: Some(amount.to_string()),
            description: Some(format!("Quick {}: {}", tx_type, category)),
            date: Some(today.to_string()),
        }
    }

    /// Validate the form and build the transaction to insert
    ///
    /// Type, category and a positive amount are required. An empty
    /// description becomes `"-"` and an empty date becomes `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<NewTransaction> {
        let tx_type: TransactionType = required(&self.tx_type, "type")?
            .parse()
            .map_err(Error::Validation)?;

        let category = required(&self.category, "category")?.to_string();

        let amount_str = required(&self.amount, "amount")?;
        let amount: f64 = amount_str
            .parse()
            .map_err(|_| Error::Validation(format!("Invalid amount: {}", amount_str)))?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::Validation(
                "Amount must be greater than zero".to_string(),
            ));
        }

        let description = non_blank(&self.description)
            .unwrap_or(DEFAULT_DESCRIPTION)
            .to_string();

        let date = match non_blank(&self.date) {
            Some(s) => parse_date(s)?,
            None => today,
        };

        Ok(NewTransaction {
            tx_type,
            category,
            amount,
            description,
            date,
        })
    }
}

/// Parse a `YYYY-MM-DD` date, reporting failures as validation errors
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| Error::Validation(format!("Invalid date (use YYYY-MM-DD): {}", s)))
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn required<'a>(field: &'a Option<String>, name: &str) -> Result<&'a str> {
    non_blank(field).ok_or_else(|| Error::Validation(format!("Missing required field: {}", name)))
}
