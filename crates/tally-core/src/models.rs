//! Domain models for Tally

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Description stored when the user leaves the field empty
pub const DEFAULT_DESCRIPTION: &str = "-";

/// Categories seeded into every new store
pub const DEFAULT_CATEGORIES: [&str; 6] =
    ["Salary", "Food", "Transport", "Rent", "Entertainment", "Other"];

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A category available for selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// A stored income or expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub category: String,
    /// Always non-negative; the type carries the direction
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
}

impl Transaction {
    /// The insertable part of this transaction (everything except the id)
    pub fn to_new(&self) -> NewTransaction {
        NewTransaction {
            tx_type: self.tx_type,
            category: self.category.clone(),
            amount: self.amount,
            description: self.description.clone(),
            date: self.date,
        }
    }
}

/// A transaction that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub tx_type: TransactionType,
    pub category: String,
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
}

impl NewTransaction {
    pub fn new(
        tx_type: TransactionType,
        category: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            tx_type,
            category: category.into(),
            amount,
            description: description.into(),
            date,
        }
    }
}

/// Income and expense sums over a set of transactions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
}

impl Totals {
    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_parse() {
        assert_eq!("income".parse::<TransactionType>(), Ok(TransactionType::Income));
        assert_eq!(
            " Expense ".parse::<TransactionType>(),
            Ok(TransactionType::Expense)
        );
        assert!("transfer".parse::<TransactionType>().is_err());
        assert!("".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_transaction_type_display() {
        assert_eq!(TransactionType::Income.to_string(), "income");
        assert_eq!(TransactionType::Expense.as_str(), "expense");
    }

    #[test]
    fn test_transaction_serializes_type_field() {
        let tx = Transaction {
            id: 7,
            tx_type: TransactionType::Expense,
            category: "Food".to_string(),
            amount: 12.5,
            description: "Lunch".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        };

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["date"], "2024-03-09");
        assert_eq!(json["amount"], 12.5);
    }

    #[test]
    fn test_totals_balance() {
        let totals = Totals {
            income: 100.0,
            expense: 250.25,
        };
        assert_eq!(totals.balance(), -150.25);
        assert_eq!(Totals::default().balance(), 0.0);
    }
}
