//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The same [`Commands`] enum parses each line typed into `tally shell`.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tally_core::TransactionType;

/// Tally - Track income and expenses
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal income and expense tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// SQLite database file (default: a fresh in-memory store)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: data dir override, else built-in)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// One line of the interactive shell, without the program name
#[derive(Parser)]
#[command(name = "tally", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the schema and seed default categories
    Init,

    /// Log in (stores the login state)
    Login {
        /// Name shown in the shell banner
        name: String,
    },

    /// Log out (clears the login state)
    Logout,

    /// Add a transaction
    Add {
        /// income or expense
        #[arg(short = 't', long = "type")]
        tx_type: String,

        #[arg(short, long)]
        category: String,

        /// Positive amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,

        /// Defaults to "-"
        #[arg(short, long)]
        description: Option<String>,

        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Quick-add a transaction dated today
    Quick {
        /// income or expense
        tx_type: TransactionType,

        category: String,

        amount: f64,
    },

    /// List transactions with summary, statistics and chart
    List {
        /// Only income or only expense
        #[arg(short = 't', long = "type")]
        tx_type: Option<TransactionType>,

        /// Exact category name
        #[arg(short, long)]
        category: Option<String>,

        /// Earliest date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Latest date, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Show store-wide income, expense and balance
    Summary,

    /// Delete a transaction
    Delete {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete all transactions
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List or add categories
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// Export all transactions to JSON
    Export {
        /// Output file (default: finance_data_<today>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import transactions from a JSON export (all or nothing)
    Import {
        /// JSON file to import
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Start an interactive session
    Shell,
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// Add a category
    Add { name: String },
}
