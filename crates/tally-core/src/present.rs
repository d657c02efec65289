//! Presentation adapter
//!
//! Turns aggregator output into display-ready values. Nothing here touches
//! the store or a terminal; the CLI renders what these types describe.

use serde::Serialize;

use crate::models::{Totals, Transaction};
use crate::summary::{ChartData, Summary};

/// Placeholder shown instead of a chart when both totals are zero
pub const NO_DATA: &str = "No data available";

/// Format an amount with two decimals and a symbol prefix
pub fn format_currency(amount: f64, symbol: &str) -> String {
    format!("{}{:.2}", symbol, amount)
}

/// The three summary cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCards {
    pub income: String,
    pub expense: String,
    pub balance: String,
    /// Rendered in a warning colour
    pub balance_negative: bool,
}

impl SummaryCards {
    pub fn from_totals(totals: Totals, symbol: &str) -> Self {
        let balance = totals.balance();
        Self {
            income: format_currency(totals.income, symbol),
            expense: format_currency(totals.expense, symbol),
            balance: format_currency(balance, symbol),
            balance_negative: balance < 0.0,
        }
    }
}

/// Statistics line under the cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsView {
    pub count: usize,
    pub today_count: usize,
    pub average: String,
}

impl StatisticsView {
    pub fn new(summary: &Summary, symbol: &str) -> Self {
        Self {
            count: summary.count,
            today_count: summary.today_count,
            average: format_currency(summary.average, symbol),
        }
    }
}

/// One pie slice with its legend label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub label: &'static str,
    pub amount: String,
    pub percent: u32,
}

/// Pie chart, or the no-data placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartView {
    Pie { income: ChartSlice, expense: ChartSlice },
    Empty { message: &'static str },
}

impl ChartView {
    pub fn new(chart: Option<ChartData>, symbol: &str) -> Self {
        match chart {
            Some(data) => Self::Pie {
                income: ChartSlice {
                    label: "Income",
                    amount: format_currency(data.income_total, symbol),
                    percent: data.income_percent(),
                },
                expense: ChartSlice {
                    label: "Expense",
                    amount: format_currency(data.expense_total, symbol),
                    percent: data.expense_percent(),
                },
            },
            None => Self::Empty { message: NO_DATA },
        }
    }
}

/// A table row with the amount already formatted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub id: i64,
    pub tx_type: &'static str,
    pub category: String,
    pub amount: String,
    pub description: String,
    pub date: String,
}

impl RowView {
    pub fn new(tx: &Transaction, symbol: &str) -> Self {
        Self {
            id: tx.id,
            tx_type: tx.tx_type.as_str(),
            category: tx.category.clone(),
            amount: format_currency(tx.amount, symbol),
            description: tx.description.clone(),
            date: tx.date.to_string(),
        }
    }
}
