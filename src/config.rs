//! Dashboard settings.
//!
//! Stored as a JSON object on disk, every field optional:
//! ```json
//! {
//!   "data_path": "data/main_data.csv",
//!   "top_categories": 10,
//!   "top_customers": 5
//! }
//! ```
//! `DASHBOARD_DATA_PATH` in the environment (or `.env`) overrides
//! `data_path`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DATA_PATH_ENV: &str = "DASHBOARD_DATA_PATH";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    /// Rows in each best/worst category chart.
    pub top_categories: usize,
    /// Rows in each best-customer chart.
    pub top_customers: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("main_data.csv"),
            top_categories: 10,
            top_customers: 5,
        }
    }
}

impl DashboardConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{}'", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("invalid config '{}'", path.display()))?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise the defaults, then applies
    /// environment overrides.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        Self::resolve_with(path, std::env::var_os(DATA_PATH_ENV).map(PathBuf::from))
    }

    /// Like [`resolve`](Self::resolve) with the `DASHBOARD_DATA_PATH` value
    /// passed in.
    pub fn resolve_with(path: Option<&Path>, data_path_override: Option<PathBuf>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(data_path) = data_path_override {
            config.data_path = data_path;
        }

        Ok(config)
    }

    /// The dataset to load: `cli_path` when given, else the configured path.
    pub fn dataset_path<'a>(&'a self, cli_path: Option<&'a Path>) -> &'a Path {
        cli_path.unwrap_or(&self.data_path)
    }
}
