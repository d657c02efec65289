//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `import` - JSON export and import
//! - `session` - Session setup (open_tracker, login gate) and init/login/logout
//! - `shell` - Interactive session
//! - `summary` - Summary cards, statistics and chart rendering
//! - `transactions` - Add, quick-add, list, delete, reset and categories

pub mod import;
pub mod session;
pub mod shell;
pub mod summary;
pub mod transactions;

use std::io::{self, Write};

use anyhow::Result;
use tally_core::{LoginState, Tracker};

use crate::cli::{CategoriesAction, Commands};

// Re-export command functions for main.rs
pub use import::*;
pub use session::*;
pub use shell::*;
pub use summary::*;
pub use transactions::*;

/// Run one parsed command against an open session
pub fn execute(tracker: &mut Tracker, login: &mut LoginState, command: Commands) -> Result<()> {
    match command {
        Commands::Init => cmd_init(tracker),
        Commands::Login { name } => cmd_login(login, &name),
        Commands::Logout => cmd_logout(login),
        Commands::Add {
            tx_type,
            category,
            amount,
            description,
            date,
        } => cmd_add(
            tracker,
            &tx_type,
            &category,
            &amount,
            description.as_deref(),
            date.as_deref(),
        ),
        Commands::Quick {
            tx_type,
            category,
            amount,
        } => cmd_quick(tracker, tx_type, &category, amount),
        Commands::List {
            tx_type,
            category,
            from,
            to,
        } => cmd_list(tracker, tx_type, category, from, to),
        Commands::Summary => cmd_summary(tracker),
        Commands::Delete { id, yes } => cmd_delete(tracker, id, yes),
        Commands::Reset { yes } => cmd_reset(tracker, yes),
        Commands::Categories { action } => match action {
            None => cmd_categories_list(tracker),
            Some(CategoriesAction::Add { name }) => cmd_categories_add(tracker, &name),
        },
        Commands::Export { output } => cmd_export(tracker, output.as_deref()).map(|_| ()),
        Commands::Import { file } => cmd_import(tracker, &file),
        Commands::Shell => cmd_shell(tracker, login),
    }
}

/// Ask a yes/no question on stdin; anything but "y" is a no
pub fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
