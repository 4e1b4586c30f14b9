use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use catalog_logging::{catalog_debug, catalog_info};

/// Storage key holding the bearer credential.
pub const CREDENTIAL_KEY: &str = "token";
/// Storage key holding the opt-in remembered identity.
pub const REMEMBERED_IDENTITY_KEY: &str = "email";

/// Injected persistent key-value capability backing the [`SessionStore`].
///
/// Writes are infallible at this boundary; persistent bindings report their
/// own failures and keep serving the last written values.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn delete(&mut self, key: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn delete(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// Credential and remembered identity, each with its own lifecycle.
///
/// Shared between the request pipeline (reads the credential on every
/// request, clears it on unauthorized responses) and the effect runner.
pub struct SessionStore {
    store: Mutex<Box<dyn KeyValueStore>>,
}

impl SessionStore {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Mutex::new(Box::new(store)),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn KeyValueStore>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_credential(&self, token: &str) {
        self.lock().set(CREDENTIAL_KEY, token);
        catalog_debug!("Stored credential");
    }

    /// An empty stored value counts as absent.
    pub fn credential(&self) -> Option<String> {
        self.lock()
            .get(CREDENTIAL_KEY)
            .filter(|token| !token.is_empty())
    }

    pub fn clear_credential(&self) {
        self.lock().delete(CREDENTIAL_KEY);
        catalog_debug!("Cleared credential");
    }

    pub fn set_remembered_identity(&self, identity: &str) {
        self.lock().set(REMEMBERED_IDENTITY_KEY, identity);
    }

    pub fn remembered_identity(&self) -> Option<String> {
        self.lock()
            .get(REMEMBERED_IDENTITY_KEY)
            .filter(|identity| !identity.is_empty())
    }

    pub fn clear_remembered_identity(&self) {
        self.lock().delete(REMEMBERED_IDENTITY_KEY);
    }

    /// Explicit logout: forget the credential and the remembered identity.
    pub fn logout(&self) {
        let mut store = self.lock();
        store.delete(CREDENTIAL_KEY);
        store.delete(REMEMBERED_IDENTITY_KEY);
        catalog_info!("Session cleared on logout");
    }
}
