//! Tally configuration
//!
//! Config is loaded with a layered resolution:
//! 1. An explicit path given by the caller (`--config`)
//! 2. An override in the data dir (~/.local/share/tally/config/tally.toml)
//! 3. The embedded default (compiled into the binary)
//!
//! Every key is optional; anything missing keeps its built-in default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/tally.toml");

/// Name of the per-user data directory
pub const APP_DIR: &str = "tally";

const LOGIN_FILE: &str = "login.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Prefix for formatted amounts
    pub currency_symbol: String,
    /// Categories seeded on top of the built-in list
    pub extra_categories: Vec<String>,
    /// Login state file
    pub login_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            extra_categories: Vec::new(),
            login_file: data_dir().join(LOGIN_FILE),
        }
    }
}

impl Config {
    /// Load config from `path`, the data-dir override, or the embedded default
    ///
    /// An explicit path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => read_config(path)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => read_config(&path)?,
                None => DEFAULT_CONFIG.to_string(),
            },
        };

        parse_config(&content)
    }
}

/// Per-user data directory (`<data dir>/tally`)
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join(APP_DIR).join("config").join("tally.toml"))
}

fn read_config(path: &Path) -> Result<String> {
    debug!(path = %path.display(), "Reading config");
    fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    display: Option<RawDisplay>,
    categories: Option<RawCategories>,
    login: Option<RawLogin>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    currency_symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCategories {
    extra: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawLogin {
    file: Option<PathBuf>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = Config::default();

    if let Some(symbol) = raw.display.and_then(|d| d.currency_symbol) {
        config.currency_symbol = symbol;
    }

    if let Some(extra) = raw.categories.and_then(|c| c.extra) {
        config.extra_categories = extra
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
    }

    if let Some(file) = raw.login.and_then(|l| l.file) {
        config.login_file = if file.is_absolute() {
            file
        } else {
            data_dir().join(file)
        };
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.currency_symbol, "₹");
        assert!(config.login_file.ends_with("tally/login.json"));
    }

    #[test]
    fn test_parse_overrides() {
        let config = parse_config(
            r#"
            [display]
            currency_symbol = "$"

            [categories]
            extra = ["Travel", "  ", " Health "]

            [login]
            file = "/tmp/tally-login.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.extra_categories, vec!["Travel", "Health"]);
        assert_eq!(config.login_file, PathBuf::from("/tmp/tally-login.json"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config("[display]\n").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            parse_config("display = [unterminated"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.toml");
        fs::write(&path, "[display]\ncurrency_symbol = \"€\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.currency_symbol, "€");
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(Config::load(Some(&missing)), Err(Error::Config(_))));
    }
}
