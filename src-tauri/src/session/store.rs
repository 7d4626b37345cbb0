use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tauri::Runtime;
use tauri_plugin_store::Store;
use tracing::{debug, warn};

/// Storage key of the persisted login flag.
pub const SESSION_KEY: &str = "hr_ai_docs_logged_in";

/// The only value that counts as logged in. Anything else, including absence, is `false`.
const LOGGED_IN: &str = "true";

/// String key/value persistence capability.
///
/// Writes are fire-and-forget: implementations log their own failures.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Process-local store, used by tests and as a fallback.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
    }
}

/// Adapter over a `tauri-plugin-store` file. Survives webview reloads and app restarts.
pub struct TauriKeyValueStore<R: Runtime> {
    store: Arc<Store<R>>,
}

impl<R: Runtime> TauriKeyValueStore<R> {
    pub fn new(store: Arc<Store<R>>) -> Self {
        Self { store }
    }

    fn persist(&self) {
        if let Err(e) = self.store.save() {
            warn!("Failed to save session store: {}", e);
        }
    }
}

impl<R: Runtime> KeyValueStore for TauriKeyValueStore<R> {
    fn get(&self, key: &str) -> Option<String> {
        self.store
            .get(key)
            .and_then(|v| v.as_str().map(|s| s.to_string()))
    }

    fn set(&self, key: &str, value: &str) {
        self.store.set(key, serde_json::json!(value));
        self.persist();
    }

    fn remove(&self, key: &str) {
        self.store.delete(key);
        self.persist();
    }
}

/// Reads and writes the persisted login flag.
///
/// A store built with [`SessionStore::detached`] has no persistence medium:
/// it always reports logged out and ignores writes.
#[derive(Clone)]
pub struct SessionStore {
    backend: Option<Arc<dyn KeyValueStore>>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryKeyValueStore::new()))
    }

    pub fn detached() -> Self {
        Self { backend: None }
    }

    /// Whether a login recorded here will be seen by later checks.
    pub fn is_persistent(&self) -> bool {
        self.backend.is_some()
    }

    pub fn is_logged_in(&self) -> bool {
        self.backend
            .as_ref()
            .and_then(|b| b.get(SESSION_KEY))
            .is_some_and(|v| v == LOGGED_IN)
    }

    pub fn set_logged_in(&self) {
        match &self.backend {
            Some(backend) => backend.set(SESSION_KEY, LOGGED_IN),
            None => warn!("No session storage available, login will not persist"),
        }
    }

    pub fn clear_logged_in(&self) {
        match &self.backend {
            Some(backend) => backend.remove(SESSION_KEY),
            None => debug!("No session storage available, nothing to clear"),
        }
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("attached", &self.backend.is_some())
            .finish()
    }
}
