pub mod app_data;
pub mod memory;
pub mod migration;
pub mod schema;
pub mod sqlite;

use ciuema_core::error::CiuemaError;

pub use app_data::{load_app_data, save_app_data, APP_DATA_KEY};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// A string key-value store holding serialized application state.
pub trait DataStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, CiuemaError>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), CiuemaError>;
}

impl<T: DataStore + ?Sized> DataStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, CiuemaError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CiuemaError> {
        (**self).set(key, value)
    }
}
