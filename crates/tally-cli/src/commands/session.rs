//! Session setup and account-level commands
//!
//! This module contains:
//! - `open_tracker` - Shared utility to open the store and build a session
//! - `require_login` - Login gate for every data command
//! - `cmd_init`, `cmd_login`, `cmd_logout`

use std::path::Path;

use anyhow::{bail, Context, Result};
use tally_core::{Config, Database, LoginState, Tracker};
use tracing::debug;

/// Open the store (in-memory unless a path is given) and wrap it in a session
pub fn open_tracker(db_path: Option<&Path>, config: &Config) -> Result<Tracker> {
    let db = match db_path {
        Some(path) => Database::new(path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?,
        None => Database::in_memory().context("Failed to create in-memory database")?,
    };

    Tracker::new(db, config).context("Failed to start session")
}

/// Refuse to continue unless the stored login state says logged in
pub fn require_login(login: &LoginState) -> Result<()> {
    if !login.is_logged_in() {
        bail!("Not logged in. Run 'tally login <name>' first.");
    }
    Ok(())
}

pub fn cmd_init(tracker: &Tracker) -> Result<()> {
    let db = tracker.database();
    println!("🔧 Initializing database at {}...", db.path());

    db.initialize().context("Failed to initialize schema")?;

    let categories = tracker.categories()?;
    println!("   Seeded {} categories:", categories.len());
    for category in &categories {
        println!("     • {}", category.name);
    }

    println!("✅ Database initialized successfully!");
    if db.is_in_memory() {
        println!();
        println!("   This store lives in memory. Use 'tally shell' to work with it,");
        println!("   or pass --db <file> to keep data between runs.");
    }

    Ok(())
}

pub fn cmd_login(login: &mut LoginState, name: &str) -> Result<()> {
    login.log_in(name).context("Failed to save login state")?;
    debug!(path = %login.path().display(), "Saved login state");
    println!("👋 Logged in as {}", login.username());
    Ok(())
}

pub fn cmd_logout(login: &mut LoginState) -> Result<()> {
    login.log_out().context("Failed to clear login state")?;
    debug!(path = %login.path().display(), "Cleared login state");
    println!("Logged out.");
    Ok(())
}
