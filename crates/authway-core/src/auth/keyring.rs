//! OS keychain-backed token store via the `keyring` crate.

use keyring::Entry;

use super::store::{StoreError, TokenStore};

/// Reference [`TokenStore`] implementation persisting to the platform
/// keychain (Keychain, Credential Manager, Secret Service).
///
/// Encryption-at-rest is the keystore's job, not ours.
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    /// `service` namespaces the entries, typically the application name
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<Entry, StoreError> {
        Entry::new(&self.service, key).map_err(map_keyring_error)
    }
}

fn map_keyring_error(err: keyring::Error) -> StoreError {
    match err {
        keyring::Error::NoStorageAccess(e) => StoreError::Unavailable(e.to_string()),
        keyring::Error::PlatformFailure(e) => StoreError::Unavailable(e.to_string()),
        other => StoreError::Backend(other.to_string()),
    }
}

impl TokenStore for KeyringStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(map_keyring_error(e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entry(key)?
            .set_password(value)
            .map_err(map_keyring_error)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(map_keyring_error(e)),
        }
    }

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.read(key)?.is_some())
    }
}
