//! Session context
//!
//! A [`Tracker`] owns everything one session needs: the store, the display
//! currency, the clock used for "today", the active view filter and the rows
//! last loaded through it. Every mutating call reloads the view and hands
//! back a fresh [`Snapshot`].

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::db::{Database, TransactionFilter};
use crate::error::{Error, Result};
use crate::export::export_file_name;
use crate::form::TransactionForm;
use crate::models::{Category, Totals, Transaction, TransactionType};
use crate::present::{ChartView, RowView, StatisticsView, SummaryCards};
use crate::summary::{summarize, ChartData, Summary};

/// Owned filter kept by the tracker between loads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    pub tx_type: Option<TransactionType>,
    pub category: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl ViewFilter {
    pub fn as_filter(&self) -> TransactionFilter<'_> {
        TransactionFilter::new()
            .tx_type(self.tx_type)
            .category(self.category.as_deref())
            .date_from(self.date_from)
            .date_to(self.date_to)
    }
}

/// Rows and everything derived from them for one load
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub summary: Summary,
    pub chart: Option<ChartData>,
}

impl Snapshot {
    fn new(transactions: Vec<Transaction>, today: NaiveDate) -> Self {
        let summary = summarize(&transactions, today);
        Self {
            chart: summary.chart(),
            summary,
            transactions,
        }
    }

    pub fn cards(&self, symbol: &str) -> SummaryCards {
        SummaryCards::from_totals(self.summary.totals(), symbol)
    }

    pub fn statistics(&self, symbol: &str) -> StatisticsView {
        StatisticsView::new(&self.summary, symbol)
    }

    pub fn chart_view(&self, symbol: &str) -> ChartView {
        ChartView::new(self.chart, symbol)
    }

    pub fn rows(&self, symbol: &str) -> Vec<RowView> {
        self.transactions
            .iter()
            .map(|tx| RowView::new(tx, symbol))
            .collect()
    }
}

pub struct Tracker {
    db: Database,
    currency_symbol: String,
    /// Fixed date for tests; `None` reads the clock
    today: Option<NaiveDate>,
    filter: ViewFilter,
    cache: Vec<Transaction>,
}

impl Tracker {
    /// Create a tracker over an initialized store
    ///
    /// Extra categories from the config are seeded here.
    pub fn new(db: Database, config: &Config) -> Result<Self> {
        let added = db.seed_categories(config.extra_categories.as_slice())?;
        if added > 0 {
            debug!(added, "Seeded configured categories");
        }

        Ok(Self {
            db,
            currency_symbol: config.currency_symbol.clone(),
            today: None,
            filter: ViewFilter::default(),
            cache: Vec::new(),
        })
    }

    /// Pin "today" to a fixed date
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn filter(&self) -> &ViewFilter {
        &self.filter
    }

    /// Rows from the most recent load
    pub fn transactions(&self) -> &[Transaction] {
        &self.cache
    }

    /// Replace the view filter and reload
    pub fn set_filter(&mut self, filter: ViewFilter) -> Result<Snapshot> {
        self.filter = filter;
        self.refresh()
    }

    /// Reload rows through the current filter
    pub fn refresh(&mut self) -> Result<Snapshot> {
        self.cache = self.db.list_transactions(&self.filter.as_filter())?;
        debug!(rows = self.cache.len(), "View reloaded");
        Ok(Snapshot::new(self.cache.clone(), self.today()))
    }

    /// Validate and insert a form, returning the new id
    pub fn add(&mut self, form: &TransactionForm) -> Result<(i64, Snapshot)> {
        let tx = form.validate(self.today())?;
        let id = self.db.insert_transaction(&tx)?;
        Ok((id, self.refresh()?))
    }

    /// Insert a quick-add entry dated today
    pub fn quick_add(
        &mut self,
        tx_type: TransactionType,
        category: &str,
        amount: f64,
    ) -> Result<(i64, Snapshot)> {
        let form = TransactionForm::quick(tx_type, category, amount, self.today());
        self.add(&form)
    }

    /// True when the view filter narrows the rows shown
    pub fn is_filtered(&self) -> bool {
        !self.filter.as_filter().is_empty()
    }

    /// Look up one transaction, failing with [`Error::NotFound`] if absent
    pub fn transaction(&self, id: i64) -> Result<Transaction> {
        self.db
            .get_transaction(id)?
            .ok_or_else(|| Error::NotFound(format!("transaction {}", id)))
    }

    pub fn delete(&mut self, id: i64) -> Result<Snapshot> {
        self.db.delete_transaction(id)?;
        self.refresh()
    }

    /// Delete every transaction, returning how many were removed
    pub fn reset(&mut self) -> Result<(usize, Snapshot)> {
        let removed = self.db.delete_all_transactions()?;
        Ok((removed, self.refresh()?))
    }

    /// Totals over the whole store, ignoring the view filter
    pub fn store_totals(&self) -> Result<Totals> {
        self.db.store_totals()
    }

    pub fn categories(&self) -> Result<Vec<Category>> {
        self.db.list_categories()
    }

    pub fn add_category(&self, name: &str) -> Result<bool> {
        self.db.add_category(name)
    }

    /// Export document and the file name it should be saved under
    pub fn export(&self) -> Result<(String, String)> {
        Ok((self.db.export_json()?, export_file_name(self.today())))
    }

    /// Import a JSON document, all or nothing
    pub fn import(&mut self, json: &str) -> Result<(usize, Snapshot)> {
        let inserted = self.db.import_json(json, self.today())?;
        info!(inserted, "Import applied to session");
        Ok((inserted, self.refresh()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tracker() -> Tracker {
        Tracker::new(Database::in_memory().unwrap(), &Config::default())
            .unwrap()
            .with_today(date(2024, 1, 2))
    }

    fn expense(category: &str, amount: &str, day: &str) -> TransactionForm {
        TransactionForm::new()
            .tx_type("expense")
            .category(category)
            .amount(amount)
            .date(day)
    }

    #[test]
    fn test_add_reloads_snapshot() {
        let mut t = tracker();
        let (id, snapshot) = t.add(&expense("Food", "12.50", "2024-01-02")).unwrap();

        assert_eq!(id, 1);
        assert_eq!(snapshot.transactions.len(), 1);
        assert_eq!(snapshot.summary.expense, 12.5);
        assert_eq!(snapshot.summary.today_count, 1);
        assert_eq!(t.transactions().len(), 1);
    }

    #[test]
    fn test_invalid_form_leaves_store_untouched() {
        let mut t = tracker();
        let err = t.add(&expense("Food", "0", "2024-01-02")).unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(t.refresh().unwrap().transactions.is_empty());
    }

    #[test]
    fn test_quick_add_uses_today() {
        let mut t = tracker();
        let (_, snapshot) = t.quick_add(TransactionType::Income, "Salary", 50000.0).unwrap();

        let tx = &snapshot.transactions[0];
        assert_eq!(tx.date, date(2024, 1, 2));
        assert_eq!(tx.description, "Quick income: Salary");
    }

    #[test]
    fn test_filter_applies_to_mutations() {
        let mut t = tracker();
        t.add(&expense("Food", "10", "2024-01-01")).unwrap();
        t.quick_add(TransactionType::Income, "Salary", 100.0).unwrap();

        let snapshot = t
            .set_filter(ViewFilter {
                tx_type: Some(TransactionType::Expense),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(snapshot.transactions.len(), 1);
        assert_eq!(snapshot.summary.income, 0.0);

        // Still filtered after another insert
        let (_, snapshot) = t.add(&expense("Rent", "20", "2024-01-02")).unwrap();
        assert_eq!(snapshot.transactions.len(), 2);
        assert_eq!(snapshot.summary.expense, 30.0);

        // Store totals ignore the view
        assert_eq!(t.store_totals().unwrap().income, 100.0);
    }

    #[test]
    fn test_delete_and_reset() {
        let mut t = tracker();
        let (id, _) = t.add(&expense("Food", "10", "2024-01-01")).unwrap();
        t.add(&expense("Food", "20", "2024-01-01")).unwrap();

        let snapshot = t.delete(id).unwrap();
        assert_eq!(snapshot.transactions.len(), 1);

        let (removed, snapshot) = t.reset().unwrap();
        assert_eq!(removed, 1);
        assert!(snapshot.transactions.is_empty());
        assert_eq!(snapshot.summary, Summary::default());
        assert!(snapshot.chart.is_none());
    }

    #[test]
    fn test_transaction_lookup() {
        let mut t = tracker();
        let (id, _) = t.add(&expense("Food", "10", "2024-01-01")).unwrap();

        assert_eq!(t.transaction(id).unwrap().category, "Food");

        let err = t.transaction(id + 1).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(err.is_user_error());
    }

    #[test]
    fn test_is_filtered() {
        let mut t = tracker();
        assert!(!t.is_filtered());

        // Blank category counts as "All Categories"
        t.set_filter(ViewFilter {
            category: Some("  ".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert!(!t.is_filtered());

        t.set_filter(ViewFilter {
            date_from: Some(date(2024, 1, 1)),
            ..Default::default()
        })
        .unwrap();
        assert!(t.is_filtered());
    }

    #[test]
    fn test_export_import_through_tracker() {
        let mut source = tracker();
        source.add(&expense("Food", "10", "2024-01-01")).unwrap();
        let (json, file_name) = source.export().unwrap();
        assert_eq!(file_name, "finance_data_2024-01-02.json");

        let mut target = tracker();
        let (inserted, snapshot) = target.import(&json).unwrap();
        assert_eq!(inserted, 1);
        assert_eq!(snapshot.transactions[0].category, "Food");
    }

    #[test]
    fn test_configured_categories_and_symbol() {
        let config = Config {
            currency_symbol: "$".to_string(),
            extra_categories: vec!["Travel".to_string()],
            ..Config::default()
        };
        let mut t = Tracker::new(Database::in_memory().unwrap(), &config)
            .unwrap()
            .with_today(date(2024, 1, 2));

        let names: Vec<String> = t.categories().unwrap().into_iter().map(|c| c.name).collect();
        assert!(names.contains(&"Travel".to_string()));

        let (_, snapshot) = t.add(&expense("Travel", "5", "2024-01-02")).unwrap();
        assert_eq!(snapshot.cards(t.currency_symbol()).expense, "$5.00");
        assert_eq!(snapshot.rows(t.currency_symbol())[0].amount, "$5.00");
    }
}
