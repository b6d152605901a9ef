use super::ClientError;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Key under which the bearer token is kept.
pub const TOKEN_KEY: &str = "token";

/// Browser-style local storage: string keys to string values.
pub trait TokenStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, ClientError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), ClientError>;
    fn remove_item(&self, key: &str) -> Result<(), ClientError>;
}

/// Persists every key into one JSON object on disk.
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, ClientError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                ClientError::Storage(format!("Corrupt storage file {}: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(ClientError::Storage(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn save(&self, items: &BTreeMap<String, String>) -> Result<(), ClientError> {
        let raw = serde_json::to_string_pretty(items)
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        std::fs::write(&self.path, raw).map_err(|e| {
            ClientError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

impl TokenStorage for FileTokenStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), ClientError> {
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.save(&items)?;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryTokenStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, ClientError> {
        self.items
            .lock()
            .map_err(|_| ClientError::Storage("storage lock poisoned".to_string()))
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), ClientError> {
        self.lock()?.remove(key);
        Ok(())
    }
}
