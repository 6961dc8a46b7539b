//! Store configuration.
//!
//! ```toml
//! seed_demo_data = true
//! log_filter = "info"
//!
//! [storage]
//! kind = "sqlite"
//! path = "patient-records.db"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::{DetachedStorage, KeyValueStorage, MemoryStorage, SqliteStorage};
use crate::store::{RecordStore, StoreError};

/// Environment variable that forces SQLite storage at the given path.
pub const DB_PATH_ENV: &str = "PATIENT_RECORDS_DB";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Which backend holds the records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StorageConfig {
    #[default]
    Memory,
    Sqlite {
        path: PathBuf,
    },
    Detached,
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub storage: StorageConfig,
    /// Write the demo users and patients into a fresh storage area
    pub seed_demo_data: bool,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            seed_demo_data: true,
            log_filter: "info".to_string(),
        }
    }
}

/// Boxed backend chosen at runtime.
pub type DynStorage = Box<dyn KeyValueStorage + Send>;

impl StoreConfig {
    /// Parse configuration text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read configuration from a file, then apply environment overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;
        config.apply_env();
        Ok(config)
    }

    /// Apply `PATIENT_RECORDS_DB` if set.
    pub fn apply_env(&mut self) {
        if let Ok(path) = std::env::var(DB_PATH_ENV) {
            if !path.is_empty() {
                self.storage = StorageConfig::Sqlite { path: path.into() };
            }
        }
    }

    /// Build the configured backend.
    pub fn open_storage(&self) -> Result<DynStorage, ConfigError> {
        let storage: DynStorage = match &self.storage {
            StorageConfig::Memory => Box::new(MemoryStorage::new()),
            StorageConfig::Sqlite { path } => {
                Box::new(SqliteStorage::open(path).map_err(StoreError::from)?)
            }
            StorageConfig::Detached => Box::new(DetachedStorage),
        };
        Ok(storage)
    }

    /// Build the backend and open a store on it.
    pub fn open_store(&self) -> Result<RecordStore<DynStorage>, ConfigError> {
        let storage = self.open_storage()?;
        let store = if self.seed_demo_data {
            RecordStore::open(storage)?
        } else {
            RecordStore::open_unseeded(storage)?
        };
        tracing::info!(storage = ?self.storage, seeded = self.seed_demo_data, "record store opened");
        Ok(store)
    }
}
