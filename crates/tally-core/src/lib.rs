//! Tally Core Library
//!
//! Shared functionality for the Tally personal finance tracker:
//! - SQLite schema initialization and category seeding
//! - Transaction store with filtered queries and atomic bulk insert
//! - Summary and statistics over a result set
//! - Entry form validation and quick-add
//! - JSON export and import
//! - Display formatting for summary cards and the income/expense chart
//! - Session context, config loading and login state

pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod form;
pub mod login;
pub mod models;
pub mod present;
pub mod summary;
pub mod tracker;

pub use config::Config;
pub use db::{Database, TransactionFilter};
pub use error::{Error, Result};
pub use export::export_file_name;
pub use form::TransactionForm;
pub use login::LoginState;
pub use models::{Category, NewTransaction, Totals, Transaction, TransactionType};
pub use present::{format_currency, ChartView, SummaryCards};
pub use summary::{summarize, ChartData, Summary};
pub use tracker::{Snapshot, Tracker, ViewFilter};
