//! Sync configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_INPUT_FILE, DEFAULT_STORE_FILE};
use crate::error::{GreenerNightsError, GreenerNightsResult};

fn default_input() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT_FILE)
}

fn default_store() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_FILE)
}

/// Where the feed is read from and the calendar is written to.
///
/// Layered from defaults, `~/.config/greener-nights/config.toml`, and
/// `GREENER_NIGHTS_INPUT` / `GREENER_NIGHTS_STORE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_input")]
    pub input: PathBuf,

    #[serde(default = "default_store")]
    pub store: PathBuf,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            input: default_input(),
            store: default_store(),
        }
    }
}

impl SyncConfig {
    /// `None` when the platform has no config directory.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("greener-nights").join("config.toml"))
    }

    pub fn load() -> GreenerNightsResult<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::load_layers(None),
        }
    }

    /// Load using `path` as the config file. A missing file is not an error.
    pub fn load_from(path: &Path) -> GreenerNightsResult<Self> {
        Self::load_layers(Some(path))
    }

    fn load_layers(path: Option<&Path>) -> GreenerNightsResult<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path.to_path_buf()).required(false));
        }

        builder
            .add_source(Environment::with_prefix("GREENER_NIGHTS"))
            .build()
            .map_err(|e| GreenerNightsError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| GreenerNightsError::Config(e.to_string()))
    }

    /// Override the configured paths with any given explicitly.
    pub fn with_paths(mut self, input: Option<PathBuf>, store: Option<PathBuf>) -> Self {
        if let Some(input) = input {
            self.input = input;
        }
        if let Some(store) = store {
            self.store = store;
        }
        self
    }

    pub fn input_path(&self) -> PathBuf {
        expand(&self.input)
    }

    pub fn store_path(&self) -> PathBuf {
        expand(&self.store)
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SyncConfig::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config, SyncConfig::default());
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "store = \"/srv/calendars/greener.ics\"\n").unwrap();

        let config = SyncConfig::load_from(&path).unwrap();

        assert_eq!(config.store, PathBuf::from("/srv/calendars/greener.ics"));
        assert_eq!(config.input, default_input());
    }

    #[test]
    fn test_invalid_config_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "store = [this is not toml").unwrap();

        assert!(matches!(
            SyncConfig::load_from(&path),
            Err(GreenerNightsError::Config(_))
        ));
    }

    #[test]
    fn test_explicit_paths_win() {
        let config = SyncConfig::default().with_paths(Some(PathBuf::from("feed.json")), None);

        assert_eq!(config.input, PathBuf::from("feed.json"));
        assert_eq!(config.store, default_store());
    }

    #[test]
    fn test_tilde_is_expanded() {
        let config = SyncConfig::default().with_paths(None, Some(PathBuf::from("~/history.ics")));
        let expanded = config.store_path();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.ends_with("history.ics"));
    }
}
