//! Token store adapters.
//!
//! `FileTokenStore` keeps a small JSON object on disk and stores the token
//! under one well-known key, leaving any other keys in the file alone.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::TokenStoreError;
use crate::ports::TokenStore;

/// Default key the token is stored under.
pub const DEFAULT_TOKEN_KEY: &str = "token";

/// JSON file backed token store.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
    key: String,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, error: std::io::Error) -> TokenStoreError {
        TokenStoreError::Io {
            path: self.path.display().to_string(),
            error: error.to_string(),
        }
    }

    fn read_map(&self) -> Result<Map<String, Value>, TokenStoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(TokenStoreError::Corrupt(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
            Err(e) => Err(TokenStoreError::Corrupt(e.to_string())),
        }
    }

    fn write_map(&self, map: Map<String, Value>) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }
        let content = serde_json::to_string_pretty(&Value::Object(map))
            .map_err(|e| TokenStoreError::Corrupt(e.to_string()))?;
        fs::write(&self.path, content).map_err(|e| self.io_error(e))
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        let map = self.read_map()?;
        let token = map
            .get(&self.key)
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_owned);
        debug!(path = %self.path.display(), present = token.is_some(), "token loaded");
        Ok(token)
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        let mut map = self.read_map()?;
        map.insert(self.key.clone(), Value::String(token.to_owned()));
        self.write_map(map)
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        let mut map = self.read_map()?;
        if map.remove(&self.key).is_none() {
            return Ok(());
        }
        self.write_map(map)
    }
}

/// Process-lifetime token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        *self.slot.lock() = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        *self.slot.lock() = None;
        Ok(())
    }
}
