//! Integration tests for tally-core
//!
//! These tests exercise the full entry → query → summarize → export workflow
//! through the public API.

use chrono::NaiveDate;
use tally_core::{
    db::Database,
    models::{NewTransaction, TransactionType},
    present::{ChartView, NO_DATA},
    summary::summarize,
    Config, Error, TransactionFilter, TransactionForm, Tracker, ViewFilter,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Sample document in the export format
fn sample_export() -> &'static str {
    r#"[
  {"id": 1, "type": "income", "category": "Salary", "amount": 50000.0, "description": "-", "date": "2024-01-01"},
  {"id": 2, "type": "expense", "category": "Food", "amount": 1200.5, "description": "Groceries", "date": "2024-01-02"},
  {"id": 3, "type": "expense", "category": "Transport", "amount": 80.0, "description": "Bus pass", "date": "2024-01-15"},
  {"id": 4, "type": "expense", "category": "Food", "amount": 300.0, "description": "Dinner", "date": "2024-02-03"}
]"#
}

// =============================================================================
// Store + Aggregator
// =============================================================================

#[test]
fn test_insert_query_summarize_workflow() {
    let db = Database::in_memory().expect("Failed to create in-memory database");

    db.insert_transaction(&NewTransaction::new(
        TransactionType::Income,
        "Salary",
        50000.0,
        "-",
        date(2024, 1, 1),
    ))
    .unwrap();
    db.insert_transaction(&NewTransaction::new(
        TransactionType::Expense,
        "Food",
        1200.50,
        "Groceries",
        date(2024, 1, 2),
    ))
    .unwrap();

    let rows = db.list_transactions(&TransactionFilter::new()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, date(2024, 1, 2), "newest date first");

    let summary = summarize(&rows, date(2024, 1, 2));
    assert_eq!(summary.income, 50000.0);
    assert_eq!(summary.expense, 1200.50);
    assert_eq!(summary.balance, 48799.50);
    assert_eq!(summary.count, 2);
    assert_eq!(summary.average, 25600.25);
}

#[test]
fn test_filtered_summary_matches_filtered_rows() {
    let db = Database::in_memory().unwrap();
    db.import_json(sample_export(), date(2024, 6, 1)).unwrap();

    let january = TransactionFilter::new()
        .date_from(Some(date(2024, 1, 1)))
        .date_to(Some(date(2024, 1, 31)));
    let rows = db.list_transactions(&january).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(db.count_transactions(&january).unwrap(), 3);

    let summary = summarize(&rows, date(2024, 6, 1));
    assert_eq!(summary.expense, 1280.5);
    assert_eq!(summary.income, 50000.0);

    let food = TransactionFilter::new()
        .tx_type(Some(TransactionType::Expense))
        .category(Some("Food"));
    let food_rows = db.list_transactions(&food).unwrap();
    assert_eq!(food_rows.len(), 2);
    assert!(food_rows.iter().all(|tx| tx.category == "Food"));
    assert_eq!(summarize(&food_rows, date(2024, 6, 1)).expense, 1500.5);
}

#[test]
fn test_reset_aggregates_to_zero() {
    let db = Database::in_memory().unwrap();
    db.import_json(sample_export(), date(2024, 6, 1)).unwrap();

    assert_eq!(db.delete_all_transactions().unwrap(), 4);

    let rows = db.list_transactions(&TransactionFilter::new()).unwrap();
    assert!(rows.is_empty());

    let summary = summarize(&rows, date(2024, 6, 1));
    assert_eq!(summary.income, 0.0);
    assert_eq!(summary.expense, 0.0);
    assert_eq!(summary.average, 0.0);
    assert_eq!(
        ChartView::new(summary.chart(), "₹"),
        ChartView::Empty { message: NO_DATA }
    );
}

// =============================================================================
// Import / Export
// =============================================================================

#[test]
fn test_export_import_between_file_stores() {
    let dir = tempfile::tempdir().unwrap();

    let source = Database::new(dir.path().join("source.db")).unwrap();
    source.import_json(sample_export(), date(2024, 6, 1)).unwrap();
    let json = source.export_json().unwrap();

    let target = Database::new(dir.path().join("target.db")).unwrap();
    assert_eq!(target.import_json(&json, date(2024, 6, 1)).unwrap(), 4);

    let tuples = |db: &Database| {
        db.export_transactions()
            .unwrap()
            .into_iter()
            .map(|tx| tx.to_new())
            .collect::<Vec<_>>()
    };
    assert_eq!(tuples(&source), tuples(&target));
}

#[test]
fn test_bad_import_rolls_back_batch() {
    let db = Database::in_memory().unwrap();
    db.import_json(sample_export(), date(2024, 6, 1)).unwrap();

    let bad = r#"[
        {"type": "expense", "category": "Food", "amount": 5},
        {"type": "expense", "category": "Food", "amount": "five"}
    ]"#;
    let err = db.import_json(bad, date(2024, 6, 1)).unwrap_err();
    assert!(matches!(err, Error::Import(_)));
    assert_eq!(db.count_transactions(&TransactionFilter::new()).unwrap(), 4);
}

// =============================================================================
// Session
// =============================================================================

#[test]
fn test_tracker_session() {
    let mut tracker = Tracker::new(Database::in_memory().unwrap(), &Config::default())
        .unwrap()
        .with_today(date(2024, 1, 2));

    tracker
        .add(
            &TransactionForm::new()
                .tx_type("income")
                .category("Salary")
                .amount("50000")
                .date("2024-01-01"),
        )
        .unwrap();
    let (_, snapshot) = tracker
        .add(
            &TransactionForm::new()
                .tx_type("expense")
                .category("Food")
                .amount("1200.50")
                .description("Groceries"),
        )
        .unwrap();

    let cards = snapshot.cards(tracker.currency_symbol());
    assert_eq!(cards.income, "₹50000.00");
    assert_eq!(cards.expense, "₹1200.50");
    assert_eq!(cards.balance, "₹48799.50");

    let stats = snapshot.statistics(tracker.currency_symbol());
    assert_eq!(stats.count, 2);
    assert_eq!(stats.today_count, 1);
    assert_eq!(stats.average, "₹25600.25");

    let income_only = tracker
        .set_filter(ViewFilter {
            tx_type: Some(TransactionType::Income),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(income_only.transactions.len(), 1);
    assert_eq!(income_only.summary.balance, 50000.0);
    assert_eq!(tracker.store_totals().unwrap().balance(), 48799.50);
}

#[test]
fn test_constraint_error_leaves_store_unchanged() {
    let db = Database::in_memory().unwrap();
    let err = db
        .insert_transaction(&NewTransaction::new(
            TransactionType::Expense,
            "Food",
            -1.0,
            "-",
            date(2024, 1, 1),
        ))
        .unwrap_err();

    assert!(matches!(err, Error::Constraint(_)));
    assert!(db.list_transactions(&TransactionFilter::new()).unwrap().is_empty());
}
