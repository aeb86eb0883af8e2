//! Optional `popcorn.ron` next to the working directory.
//!
//! Every field has a default, so a partial file only overrides what it names.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use popcorn_engine::LookupSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) const CONFIG_FILENAME: &str = "popcorn.ron";
const DEFAULT_DATA_DIR: &str = ".popcorn";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub endpoint: String,
    pub api_key: String,
    pub result_limit: u32,
    pub debounce_ms: u64,
    pub request_timeout_ms: u64,
    /// Where the watched list and the log live; relative paths resolve against the working directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let lookup = LookupSettings::default();
        Self {
            endpoint: lookup.endpoint,
            api_key: lookup.api_key,
            result_limit: lookup.result_limit,
            debounce_ms: duration_ms(lookup.debounce),
            request_timeout_ms: duration_ms(lookup.request_timeout),
            data_dir: None,
        }
    }
}

impl AppConfig {
    pub(crate) fn lookup_settings(&self) -> LookupSettings {
        LookupSettings {
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone(),
            result_limit: self.result_limit,
            debounce: Duration::from_millis(self.debounce_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            ..LookupSettings::default()
        }
    }

    pub(crate) fn data_dir(&self, working_dir: &Path) -> PathBuf {
        let dir = self
            .data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        if dir.is_absolute() {
            dir
        } else {
            working_dir.join(dir)
        }
    }
}

/// Reads the config at `path`. A missing file yields the defaults.
pub(crate) fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&temp.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.debounce_ms, 1000);
        assert_eq!(config.result_limit, 10);
    }

    #[test]
    fn partial_file_overrides_named_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, r#"(api_key: "abc123", debounce_ms: 250, data_dir: Some("state"))"#)
            .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.endpoint, AppConfig::default().endpoint);
        assert_eq!(config.data_dir(temp.path()), temp.path().join("state"));

        let settings = config.lookup_settings();
        assert_eq!(settings.debounce, Duration::from_millis(250));
        assert_eq!(settings.api_key, "abc123");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(debounce_ms: \"soon\"").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn default_data_dir_is_under_working_dir() {
        let config = AppConfig::default();
        assert_eq!(
            config.data_dir(Path::new("/home/user")),
            PathBuf::from("/home/user/.popcorn")
        );
    }
}
