mod config;
pub mod kv;

pub use config::{Config, MindfulnessConfig, TimerConfig};
pub use kv::{KvStore, MemoryKv, SqliteKv};

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

/// Storage keys, one per independently persisted field group.
pub mod keys {
    pub const FOCUS_SESSIONS: &str = "clario_focus_sessions";
    pub const GAMIFICATION: &str = "clario_gamification";
    pub const MINDFULNESS_SESSIONS: &str = "clario_mindfulness_sessions";
    pub const TIMER_ENGINE: &str = "clario_timer_engine";
}

/// Returns the data directory, creating it if needed.
///
/// `CLARIO_DATA_DIR` wins when set. Otherwise `~/.config/clario[-dev]/`,
/// where `CLARIO_ENV=dev` selects the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("CLARIO_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("CLARIO_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("clario-dev")
            } else {
                base_dir.join("clario")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// Load a JSON blob, treating a missing or malformed value as the default.
///
/// # Errors
/// Only a failing backend is an error; bad JSON is logged and ignored.
pub fn load_json<T>(kv: &dyn KvStore, key: &str) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = kv.load(key)? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding malformed stored value");
            Ok(T::default())
        }
    }
}

/// # Errors
/// Returns an error if the backend write fails.
pub fn save_json<T: Serialize>(kv: &mut dyn KvStore, key: &str, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)
        .map_err(|e| StorageError::QueryFailed(format!("serializing '{key}': {e}")))?;
    kv.save(key, &json)
}
