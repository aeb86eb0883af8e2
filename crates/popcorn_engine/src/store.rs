use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

use crate::{AtomicFileWriter, PersistError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid key {0:?}")]
    InvalidKey(String),
    #[error("failed to read {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: PersistError,
    },
}

/// Durable string storage addressed by key. Values are replaced whole.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Stores each key as `{dir}/{key}.json`, written atomically.
#[derive(Debug, Clone)]
pub struct FileStore {
    writer: AtomicFileWriter,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir),
        }
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        Ok(self.writer.dir().join(file_name(key)?))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let name = file_name(key)?;
        self.writer
            .write(&name, value)
            .map(|_| ())
            .map_err(|source| StoreError::Write {
                key: key.to_string(),
                source,
            })
    }
}

fn file_name(key: &str) -> Result<String, StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(format!("{key}.json"))
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// Process-local store, for tests and for running without a data directory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
