use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use catalog_engine::{read_optional, write_atomic, KeyValueStore};
use catalog_logging::{catalog_debug, catalog_error, catalog_warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedSession {
    values: BTreeMap<String, String>,
}

/// Session key-value store persisted as a RON file.
///
/// Every write rewrites the whole file atomically. A missing or unreadable
/// file starts an empty session.
pub(crate) struct RonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl RonFileStore {
    pub(crate) fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = load_values(&path);
        Self { path, values }
    }

    fn save(&self) {
        let state = PersistedSession {
            values: self.values.clone(),
        };
        let pretty = ron::ser::PrettyConfig::new();
        let content = match ron::ser::to_string_pretty(&state, pretty) {
            Ok(text) => text,
            Err(err) => {
                catalog_error!("Failed to serialize session state: {}", err);
                return;
            }
        };
        if let Err(err) = write_atomic(&self.path, &content) {
            catalog_error!("Failed to write session state to {:?}: {}", self.path, err);
        }
    }
}

fn load_values(path: &Path) -> BTreeMap<String, String> {
    let content = match read_optional(path) {
        Ok(Some(text)) => text,
        Ok(None) => return BTreeMap::new(),
        Err(err) => {
            catalog_warn!("Failed to read session state from {:?}: {}", path, err);
            return BTreeMap::new();
        }
    };

    match ron::from_str::<PersistedSession>(&content) {
        Ok(state) => {
            catalog_debug!("Loaded session state from {:?}", path);
            state.values
        }
        Err(err) => {
            catalog_warn!("Failed to parse session state from {:?}: {}", path, err);
            BTreeMap::new()
        }
    }
}

impl KeyValueStore for RonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.save();
    }

    fn delete(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            self.save();
        }
    }
}
