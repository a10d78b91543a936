//! Preference persistence capability — plain get/set key-value pairs for
//! the working language and feature toggles. No transactional guarantees;
//! the file-backed store writes best-effort and tolerates a missing or
//! corrupt file by starting empty.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::config;

/// Well-known preference keys.
pub mod keys {
    pub const WORKING_LANGUAGE: &str = "working_language";
    pub const AUTO_TRANSLATE: &str = "auto_translate";
    pub const SYMPTOM_MODEL_ENABLED: &str = "symptom_model_enabled";
}

pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Session-scoped store, nothing survives the process.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }
}

/// JSON-file-backed store under the app data directory.
pub struct FilePreferenceStore {
    path: PathBuf,
    cache: Mutex<HashMap<String, String>>,
}

impl FilePreferenceStore {
    /// Open (or start empty at) the given path. A missing or unparseable
    /// file is treated as an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cache = std::fs::read_to_string(&path)
            .ok()
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        Self {
            path,
            cache: Mutex::new(cache),
        }
    }

    /// The default location: `<app data dir>/preferences.json`.
    pub fn default_location() -> Self {
        Self::open(config::app_data_dir().join("preferences.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Cannot create preference directory: {e}");
                return;
            }
        }
        match serde_json::to_string_pretty(values) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    tracing::warn!("Cannot persist preferences: {e}");
                }
            }
            Err(e) => tracing::warn!("Cannot serialize preferences: {e}"),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.cache.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key.to_string(), value.to_string());
            self.persist(&cache);
        }
    }
}
