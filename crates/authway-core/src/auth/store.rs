//! Token persistence behind a four-operation capability trait.
//!
//! The pipeline only ever talks to a [`TokenStore`]; the reference
//! implementation ([`KeyringStore`](super::KeyringStore)) delegates to the
//! OS keychain, and [`MemoryStore`] backs tests and the demo.
//!
//! An absent key is `Ok(None)`, never an error. A store failure is its own
//! condition: a locked keystore must not be read as "no token", or a
//! transient platform hiccup would silently downgrade an authenticated
//! session to anonymous.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use thiserror::Error;

/// Storage key for the bearer access token
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Reserved for a refresh-token grant flow; no current flow writes it
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing keystore is locked, denied, or otherwise unreachable
    #[error("credential store unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure (bad encoding, platform quirk)
    #[error("credential store error: {0}")]
    Backend(String),
}

/// Capability interface for persisting opaque credential strings.
///
/// Implementations serialize their own writes; the pipeline does not add
/// locking around store calls beyond its own token cache.
pub trait TokenStore: Send + Sync {
    /// Read the value for `key`; `Ok(None)` when absent
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any existing value
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`; deleting an absent key succeeds
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Whether `key` currently holds a value
    fn exists(&self, key: &str) -> Result<bool, StoreError>;
}

/// In-memory store for tests and the demo binary.
///
/// `set_available(false)` makes every operation fail with
/// [`StoreError::Unavailable`], simulating a locked keystore.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle simulated availability of the backing keystore
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("simulated keystore lock".to_string()))
        } else {
            Ok(())
        }
    }
}

impl TokenStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check_available()?;
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_available()?;
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.check_available()?;
        self.values.lock().unwrap().remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.check_available()?;
        Ok(self.values.lock().unwrap().contains_key(key))
    }
}
