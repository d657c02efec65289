//! Transaction command implementations

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tally_core::{
    format_currency, SummaryCards, Tracker, TransactionForm, TransactionType, ViewFilter,
};

use super::{confirm, print_cards, print_snapshot, truncate};

pub fn cmd_add(
    tracker: &mut Tracker,
    tx_type: &str,
    category: &str,
    amount: &str,
    description: Option<&str>,
    date: Option<&str>,
) -> Result<()> {
    let mut form = TransactionForm::new()
        .tx_type(tx_type)
        .category(category)
        .amount(amount);
    if let Some(description) = description {
        form = form.description(description);
    }
    if let Some(date) = date {
        form = form.date(date);
    }

    let (id, snapshot) = tracker.add(&form)?;
    println!("✅ Transaction {} added", id);
    print_snapshot(tracker, &snapshot);
    Ok(())
}

pub fn cmd_quick(
    tracker: &mut Tracker,
    tx_type: TransactionType,
    category: &str,
    amount: f64,
) -> Result<()> {
    let (id, snapshot) = tracker.quick_add(tx_type, category, amount)?;
    println!("⚡ Quick {} {} added", tx_type, id);
    print_snapshot(tracker, &snapshot);
    Ok(())
}

/// Replace the session filter and show the result
pub fn cmd_list(
    tracker: &mut Tracker,
    tx_type: Option<TransactionType>,
    category: Option<String>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<()> {
    let snapshot = tracker.set_filter(ViewFilter {
        tx_type,
        category,
        date_from: from,
        date_to: to,
    })?;
    print_snapshot(tracker, &snapshot);

    // Cards above cover the filtered rows only
    if tracker.is_filtered() {
        let totals = tracker.store_totals()?;
        println!("  Filters active. All transactions:");
        print_cards(&SummaryCards::from_totals(totals, tracker.currency_symbol()));
        println!();
    }
    Ok(())
}

pub fn cmd_delete(tracker: &mut Tracker, id: i64, yes: bool) -> Result<()> {
    let tx = tracker.transaction(id)?;

    if !yes {
        let question = format!(
            "Delete {} {} {} on {} ({})?",
            tx.tx_type,
            format_currency(tx.amount, tracker.currency_symbol()),
            tx.category,
            tx.date,
            truncate(&tx.description, 30)
        );
        if !confirm(&question)? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let snapshot = tracker.delete(id)?;
    println!("🗑️  Transaction {} deleted", id);
    print_snapshot(tracker, &snapshot);
    Ok(())
}

pub fn cmd_reset(tracker: &mut Tracker, yes: bool) -> Result<()> {
    if !yes {
        println!("⚠️  This will delete ALL transactions. Categories are kept.");
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let (removed, snapshot) = tracker.reset().context("Failed to reset transactions")?;
    println!("✅ Deleted {} transactions", removed);
    print_snapshot(tracker, &snapshot);
    Ok(())
}

pub fn cmd_categories_list(tracker: &Tracker) -> Result<()> {
    let categories = tracker.categories()?;

    println!();
    println!("🏷️  Categories");
    println!("   ─────────────────────────────");
    for category in categories {
        println!("   {}", category.name);
    }

    Ok(())
}

pub fn cmd_categories_add(tracker: &Tracker, name: &str) -> Result<()> {
    if tracker.add_category(name)? {
        println!("✅ Category '{}' added", name.trim());
    } else {
        println!("Category '{}' already exists", name.trim());
    }
    Ok(())
}
