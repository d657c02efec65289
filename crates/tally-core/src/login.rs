//! Persisted login state
//!
//! A small JSON object with two optional string keys, `loggedIn` and
//! `username`. Only the exact value `"true"` counts as logged in.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;

/// Username shown when none has been stored
pub const DEFAULT_USERNAME: &str = "User";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct LoginRecord {
    #[serde(rename = "loggedIn", default, skip_serializing_if = "Option::is_none")]
    logged_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
}

/// Login state backed by a file
#[derive(Debug, Clone)]
pub struct LoginState {
    path: PathBuf,
    record: LoginRecord,
}

impl LoginState {
    /// Read the state at `path`; a missing file means logged out
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let record = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            LoginRecord::default()
        };

        debug!(path = %path.display(), logged_in = record.logged_in.is_some(), "Loaded login state");
        Ok(Self { path, record })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_logged_in(&self) -> bool {
        self.record.logged_in.as_deref() == Some("true")
    }

    /// Stored username, or [`DEFAULT_USERNAME`]
    pub fn username(&self) -> &str {
        self.record
            .username
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_USERNAME)
    }

    /// Mark the user as logged in and persist
    pub fn log_in(&mut self, username: &str) -> Result<()> {
        let username = username.trim();
        self.record.logged_in = Some("true".to_string());
        self.record.username = (!username.is_empty()).then(|| username.to_string());
        self.save()?;

        info!(username = self.username(), "Logged in");
        Ok(())
    }

    /// Clear both keys and persist
    pub fn log_out(&mut self) -> Result<()> {
        self.record = LoginRecord::default();
        self.save()?;

        info!("Logged out");
        Ok(())
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.record)?)?;
        Ok(())
    }
}
