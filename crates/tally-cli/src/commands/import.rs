//! Export and import commands

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tally_core::{TransactionFilter, Tracker};

use super::print_snapshot;

/// Write every transaction to `output`, or to `finance_data_<today>.json`
///
/// Returns the path written.
pub fn cmd_export(tracker: &Tracker, output: Option<&Path>) -> Result<PathBuf> {
    let (json, file_name) = tracker.export().context("Failed to export transactions")?;
    let path = output.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(file_name));

    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    let count = tracker
        .database()
        .count_transactions(&TransactionFilter::new())?;
    println!("📤 Exported {} transactions to {}", count, path.display());
    Ok(path)
}

pub fn cmd_import(tracker: &mut Tracker, file: &Path) -> Result<()> {
    println!("📥 Importing transactions from {}...", file.display());

    let json = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let (inserted, snapshot) = tracker
        .import(&json)
        .context("Import failed, no transactions were added")?;

    println!("✅ Imported {} transactions", inserted);
    print_snapshot(tracker, &snapshot);
    Ok(())
}
