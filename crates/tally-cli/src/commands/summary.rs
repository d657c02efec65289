//! Summary rendering and the store-wide summary command

use anyhow::Result;
use tally_core::present::{ChartSlice, RowView};
use tally_core::{ChartView, Snapshot, SummaryCards, TransactionFilter, Tracker};

use super::truncate;

/// Width of a full chart bar in characters
const BAR_WIDTH: usize = 30;

pub fn cmd_summary(tracker: &Tracker) -> Result<()> {
    let totals = tracker.store_totals()?;
    let count = tracker
        .database()
        .count_transactions(&TransactionFilter::new())?;

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│            💰 Tally Summary             │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    print_cards(&SummaryCards::from_totals(totals, tracker.currency_symbol()));
    println!("  Transactions:    {}", count);
    println!();

    Ok(())
}

/// Print rows, summary cards, statistics and chart for one load
pub fn print_snapshot(tracker: &Tracker, snapshot: &Snapshot) {
    let symbol = tracker.currency_symbol();

    print_rows(&snapshot.rows(symbol));
    println!();
    print_cards(&snapshot.cards(symbol));

    let stats = snapshot.statistics(symbol);
    println!(
        "  Count: {}   Today: {}   Average: {}",
        stats.count, stats.today_count, stats.average
    );
    println!();
    print_chart(&snapshot.chart_view(symbol));
}

pub fn print_rows(rows: &[RowView]) {
    if rows.is_empty() {
        println!("No transactions found. Add one with:");
        println!("  add --type expense --category Food --amount 12.50");
        return;
    }

    println!();
    println!("📝 Transactions");
    println!("   ─────────────────────────────────────────────────────────────────────");

    for row in rows {
        let amount = if row.tx_type == "expense" {
            format!("\x1b[31m-{}\x1b[0m", row.amount) // Red for expenses
        } else {
            format!("\x1b[32m+{}\x1b[0m", row.amount) // Green for income
        };

        println!(
            "   [{:>4}] {} │ {:>14} │ {:<14} │ {}",
            row.id,
            row.date,
            amount,
            truncate(&row.category, 14),
            truncate(&row.description, 30)
        );
    }
}

pub fn print_cards(cards: &SummaryCards) {
    let balance = if cards.balance_negative {
        format!("\x1b[31m{}\x1b[0m", cards.balance)
    } else {
        cards.balance.clone()
    };

    println!("  Income:          {}", cards.income);
    println!("  Expense:         {}", cards.expense);
    println!("  Balance:         {}", balance);
}

pub fn print_chart(chart: &ChartView) {
    match chart {
        ChartView::Pie { income, expense } => {
            println!("  {}", chart_line(income, "\x1b[32m"));
            println!("  {}", chart_line(expense, "\x1b[31m"));
        }
        ChartView::Empty { message } => println!("  {}", message),
    }
}

/// One proportional bar with its legend
pub fn chart_line(slice: &ChartSlice, color: &str) -> String {
    let filled = bar_length(slice.percent);
    format!(
        "{:<8} {}{}\x1b[0m{} {:>3}%  {}",
        slice.label,
        color,
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        slice.percent,
        slice.amount
    )
}

fn bar_length(percent: u32) -> usize {
    (percent.min(100) as usize * BAR_WIDTH + 50) / 100
}
