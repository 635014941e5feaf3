use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vns_table::TableConfig;

use crate::error::ConfigError;

/// Default table file name, relative to the working directory.
pub const DEFAULT_TABLE_PATH: &str = "storage.txt";

/// Everything a [`RecordStore`](crate::RecordStore) needs, passed in at
/// construction.
///
/// Loaded from TOML:
///
/// ```toml
/// table-path = "storage.txt"
/// content-root = "content"
///
/// [table]
/// match-mode = "exact"
/// compaction = "atomic-rename"
/// sync-on-write = false
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StoreConfig {
    /// Path of the record table file.
    pub table_path: PathBuf,
    /// Directory backing the content fetcher. No fetcher when unset.
    pub content_root: Option<PathBuf>,
    pub table: TableConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            table_path: PathBuf::from(DEFAULT_TABLE_PATH),
            content_root: None,
            table: TableConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Config for a table at `path`, defaults elsewhere.
    pub fn with_table_path(path: impl Into<PathBuf>) -> Self {
        Self {
            table_path: path.into(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}
