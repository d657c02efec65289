//! Summary and statistics derived from a set of transactions
//!
//! Everything here is a pure function of its inputs: the same transactions
//! and the same `today` always produce the same summary.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Totals, Transaction, TransactionType};

/// Totals and statistics for one result set
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Summary {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
    pub count: usize,
    /// Transactions dated `today`
    pub today_count: usize,
    /// Mean amount regardless of type, 0 for an empty set
    pub average: f64,
}

impl Summary {
    pub fn totals(&self) -> Totals {
        Totals {
            income: self.income,
            expense: self.expense,
        }
    }

    /// Chart input, or `None` when there is nothing to draw
    pub fn chart(&self) -> Option<ChartData> {
        ChartData::from_totals(self.totals())
    }
}

/// Summarize a transaction sequence
pub fn summarize(transactions: &[Transaction], today: NaiveDate) -> Summary {
    let mut income = 0.0;
    let mut expense = 0.0;
    let mut today_count = 0;

    for tx in transactions {
        match tx.tx_type {
            TransactionType::Income => income += tx.amount,
            TransactionType::Expense => expense += tx.amount,
        }
        if tx.date == today {
            today_count += 1;
        }
    }

    let count = transactions.len();
    let average = if count > 0 {
        (income + expense) / count as f64
    } else {
        0.0
    };

    Summary {
        income,
        expense,
        balance: income - expense,
        count,
        today_count,
        average,
    }
}

/// Two-slice pie input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartData {
    pub income_total: f64,
    pub expense_total: f64,
}

impl ChartData {
    /// Returns `None` when both totals are zero
    pub fn from_totals(totals: Totals) -> Option<Self> {
        if totals.income > 0.0 || totals.expense > 0.0 {
            Some(Self {
                income_total: totals.income,
                expense_total: totals.expense,
            })
        } else {
            None
        }
    }

    pub fn total(&self) -> f64 {
        self.income_total + self.expense_total
    }

    /// Rounded share of the income slice, 0-100
    pub fn income_percent(&self) -> u32 {
        percent(self.income_total, self.total())
    }

    /// Rounded share of the expense slice, 0-100
    pub fn expense_percent(&self) -> u32 {
        percent(self.expense_total, self.total())
    }
}

fn percent(value: f64, total: f64) -> u32 {
    if total <= 0.0 {
        return 0;
    }
    ((value / total) * 100.0).round() as u32
}
