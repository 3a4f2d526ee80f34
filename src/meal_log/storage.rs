// ABOUTME: Durable storage adapters for the meal log
// ABOUTME: JSON file storage under a fixed key, plus an in-memory adapter for tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Meal log persistence.
//!
//! The store treats persistence as an observer behind [`MealLogStorage`]:
//! the reducer stays pure and the adapter can be swapped for any durable
//! key-value store. [`JsonFileStorage`] is the production adapter, one JSON
//! document per log under a fixed filename.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

use crate::errors::AppError;
use crate::models::MealLog;

/// Fixed storage key for the persisted log, kept as the default filename.
pub const STORAGE_KEY: &str = "meals.json";

/// Durable storage seam for the meal log.
pub trait MealLogStorage: Send + Sync {
    /// Load the previously persisted log, if one exists.
    fn load(&self) -> Result<Option<MealLog>, AppError>;

    /// Persist the full log, replacing any previous value.
    fn save(&self, log: &MealLog) -> Result<(), AppError>;
}

/// File-backed storage: the serialized log lives in a single JSON document.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create a storage adapter writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a storage adapter under the fixed key inside `dir`.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(STORAGE_KEY))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MealLogStorage for JsonFileStorage {
    /// A missing file is simply "nothing persisted yet". An unparseable
    /// file is treated the same way, with a warning, so a corrupt log never
    /// prevents startup.
    fn load(&self) -> Result<Option<MealLog>, AppError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(AppError::storage(format!(
                    "failed to read {}",
                    self.path.display()
                ))
                .with_source(err))
            }
        };

        match serde_json::from_str(&raw) {
            Ok(log) => Ok(Some(log)),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "persisted meal log is unreadable, starting empty"
                );
                Ok(None)
            }
        }
    }

    fn save(&self, log: &MealLog) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|err| {
                    AppError::storage(format!("failed to create {}", parent.display()))
                        .with_source(err)
                })?;
            }
        }

        let payload = serde_json::to_string_pretty(log)?;
        std::fs::write(&self.path, payload).map_err(|err| {
            AppError::storage(format!("failed to write {}", self.path.display())).with_source(err)
        })
    }
}

/// In-memory storage for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: Mutex<Option<MealLog>>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a log, as if previously persisted.
    #[must_use]
    pub fn seeded(log: MealLog) -> Self {
        Self {
            inner: Mutex::new(Some(log)),
        }
    }
}

impl MealLogStorage for MemoryStorage {
    fn load(&self) -> Result<Option<MealLog>, AppError> {
        let guard = self
            .inner
            .lock()
            .map_err(|_| AppError::storage("meal log memory store poisoned"))?;
        Ok(guard.clone())
    }

    fn save(&self, log: &MealLog) -> Result<(), AppError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| AppError::storage("meal log memory store poisoned"))?;
        *guard = Some(log.clone());
        Ok(())
    }
}
