use std::collections::HashMap;
use std::sync::Mutex;

use ciuema_core::error::CiuemaError;

/// Key under which the description generator's API key is stored.
pub const DESCRIBE_API_KEY: &str = "ciuema:describe";

/// Trait for secret storage backends.
pub trait CredentialStore: Send + Sync {
    /// Store a secret under the given key.
    fn store(&self, key: &str, secret: &str) -> Result<(), CiuemaError>;

    /// Retrieve a secret by key.
    fn get(&self, key: &str) -> Result<Option<String>, CiuemaError>;

    /// Delete a stored secret.
    fn delete(&self, key: &str) -> Result<(), CiuemaError>;
}

fn credential_error(e: keyring::Error) -> CiuemaError {
    CiuemaError::CredentialError {
        message: e.to_string(),
    }
}

/// OS keychain-backed store using the `keyring` crate.
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    pub fn new() -> Self {
        Self {
            service: "ciuema".to_string(),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry, CiuemaError> {
        keyring::Entry::new(&self.service, key).map_err(credential_error)
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for KeyringStore {
    fn store(&self, key: &str, secret: &str) -> Result<(), CiuemaError> {
        self.entry(key)?
            .set_password(secret)
            .map_err(credential_error)
    }

    fn get(&self, key: &str) -> Result<Option<String>, CiuemaError> {
        match self.entry(key)?.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(credential_error(e)),
        }
    }

    fn delete(&self, key: &str) -> Result<(), CiuemaError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(credential_error(e)),
        }
    }
}

/// In-memory store for testing.
pub struct MemoryStore {
    store: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for MemoryStore {
    fn store(&self, key: &str, secret: &str) -> Result<(), CiuemaError> {
        self.store
            .lock()
            .unwrap()
            .insert(key.to_string(), secret.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, CiuemaError> {
        Ok(self.store.lock().unwrap().get(key).cloned())
    }

    fn delete(&self, key: &str) -> Result<(), CiuemaError> {
        self.store.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Look up the generator API key, treating a keychain failure as "not set".
pub fn describe_api_key(store: &dyn CredentialStore) -> Option<String> {
    match store.get(DESCRIBE_API_KEY) {
        Ok(key) => key.filter(|k| !k.trim().is_empty()),
        Err(e) => {
            tracing::warn!("could not read generator API key: {e}");
            None
        }
    }
}
