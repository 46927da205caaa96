use async_trait::async_trait;
use engine::{StoreError, ThemeStore};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Theme store persisted as one JSON object of string values.
///
/// Every write replaces the whole file: the new contents go to a sibling
/// `.tmp` file which is then renamed over the store. The mutex serializes
/// read-modify-write cycles within the process.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read_items(&self, key: &str) -> Result<BTreeMap<String, String>, StoreError> {
        let read_error = |reason: String| StoreError::Read {
            key: key.to_string(),
            reason,
        };

        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(read_error(e.to_string())),
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            read_error(format!("'{}' is not a valid store file: {e}", self.path.display()))
        })
    }

    async fn write_items(
        &self,
        items: &BTreeMap<String, String>,
        error: impl Fn(String) -> StoreError,
    ) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(items).map_err(|e| error(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| error(e.to_string()))?;
            }
        }

        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, contents)
            .await
            .map_err(|e| error(format!("Failed to write '{}': {e}", temp_path.display())))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| error(format!("Failed to replace '{}': {e}", self.path.display())))
    }
}

#[async_trait]
impl ThemeStore for JsonFileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_items(key).await?.remove(key))
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_items(key).await?;
        items.insert(key.to_string(), value);

        log::debug!("Writing '{key}' to {}", self.path.display());
        self.write_items(&items, |reason| StoreError::Write {
            key: key.to_string(),
            reason,
        })
        .await
    }

    async fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_items(key).await?;
        if items.remove(key).is_none() {
            return Ok(());
        }

        self.write_items(&items, |reason| StoreError::Remove {
            key: key.to_string(),
            reason,
        })
        .await
    }
}
