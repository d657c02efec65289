//! Category operations

use rusqlite::params;
use tracing::debug;

use super::Database;
use crate::error::{Error, Result};
use crate::models::Category;

impl Database {
    /// Insert categories that do not exist yet (keyed on the unique name)
    ///
    /// Returns how many were actually added.
    pub fn seed_categories<S: AsRef<str>>(&self, names: &[S]) -> Result<usize> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("INSERT OR IGNORE INTO categories (name) VALUES (?)")?;

        let mut added = 0;
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            added += stmt.execute(params![name])?;
        }

        if added > 0 {
            debug!(added, "Seeded categories");
        }
        Ok(added)
    }

    /// Add a single category, returning false if it already existed
    pub fn add_category(&self, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("Category name cannot be empty".to_string()));
        }
        Ok(self.seed_categories(&[name])? == 1)
    }

    /// List all categories ordered by name
    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, name FROM categories ORDER BY name")?;

        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(categories)
    }
}
