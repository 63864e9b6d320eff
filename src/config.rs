//! Configuration loaded from `taskell.toml`.
//!
//! [`TaskellConfig`] holds the configurable parameters. Missing values fall
//! back to sensible defaults. The `TASKELL_STORE_PATH` environment variable
//! takes precedence over the file for the store location.

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

use crate::persistence::DEFAULT_STORE_FILE;

/// The store-path environment override. Applied once, here; everything
/// downstream receives the resolved path.
pub const STORE_PATH_ENV: &str = "TASKELL_STORE_PATH";

/// Top-level configuration loaded from `taskell.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskellConfig {
    /// Path of the JSON store file.
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// How many tasks each REPL dashboard section previews.
    #[serde(default = "default_status_preview")]
    pub status_preview: usize,
}

fn default_store_path() -> String {
    DEFAULT_STORE_FILE.to_string()
}

fn default_status_preview() -> usize {
    3
}

impl Default for TaskellConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            status_preview: default_status_preview(),
        }
    }
}

impl TaskellConfig {
    /// Loads configuration from `taskell.toml` in the current directory.
    /// Uses defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        let path = Path::new("taskell.toml");
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<TaskellConfig>(&contents)?
        } else {
            Self::default()
        };

        // The environment variable takes precedence over the config file.
        if let Ok(store) = std::env::var(STORE_PATH_ENV)
            && !store.is_empty()
        {
            config.store_path = store;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = TaskellConfig::default();
        assert_eq!(config.store_path, "taskell.json");
        assert_eq!(config.status_preview, 3);
    }

    #[test]
    fn deserialize_partial_toml() {
        let toml_str = r#"
            store_path = "/home/me/.taskell/store.json"
        "#;
        let config: TaskellConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.store_path, "/home/me/.taskell/store.json");
        assert_eq!(config.status_preview, 3);
    }

    #[test]
    fn deserialize_full_toml() {
        let toml_str = r#"
            store_path = "tasks.json"
            status_preview = 5
        "#;
        let config: TaskellConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.status_preview, 5);
    }
}
