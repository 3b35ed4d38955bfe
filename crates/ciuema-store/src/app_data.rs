use ciuema_core::error::CiuemaError;
use ciuema_core::models::app_data::AppData;

use crate::DataStore;

/// Fixed key the application state lives under.
pub const APP_DATA_KEY: &str = "ciuema-app-data";

/// Load the application state. Anything other than a stored, parseable value
/// yields the empty default.
pub fn load_app_data<S: DataStore + ?Sized>(store: &S) -> AppData {
    let raw = match store.get(APP_DATA_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return AppData::default(),
        Err(e) => {
            tracing::warn!("could not read stored data, starting empty: {e}");
            return AppData::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("stored data is unreadable, starting empty: {e}");
            AppData::default()
        }
    }
}

/// Persist the whole application state, replacing what was stored.
pub fn save_app_data<S: DataStore + ?Sized>(store: &S, data: &AppData) -> Result<(), CiuemaError> {
    let raw =
        serde_json::to_string(data).map_err(|e| CiuemaError::Serialization(e.to_string()))?;
    store.set(APP_DATA_KEY, &raw)
}
