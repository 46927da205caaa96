use crate::errors::StoreError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Durable key-value persistence for the active theme choice.
///
/// The session uses two mutually exclusive keys: one holding the full JSON
/// record of an active custom theme and one holding the name of an active
/// system theme.
#[async_trait]
pub trait ThemeStore: Send + Sync {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set_item(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Removing an absent key is not an error.
    async fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

/// Process-local store, shared between clones.
#[derive(Clone, Default)]
pub struct MemoryThemeStore {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `items`.
    pub fn with_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let items = items
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }

    pub async fn contains_key(&self, key: &str) -> bool {
        self.items.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl ThemeStore for MemoryThemeStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.items.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.items.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_none, assert_ok};

    #[tokio::test]
    async fn test_memory_store_set_get_remove() {
        let store = MemoryThemeStore::new();
        assert_ok!(store.set_item("activeTheme", "{}".to_string()).await);

        assert_eq!(
            assert_ok!(store.get_item("activeTheme").await).as_deref(),
            Some("{}")
        );

        assert_ok!(store.remove_item("activeTheme").await);
        assert_none!(assert_ok!(store.get_item("activeTheme").await));
        assert_ok!(store.remove_item("activeTheme").await);
    }

    #[tokio::test]
    async fn test_clones_share_contents() {
        let store = MemoryThemeStore::with_items([("activeSystemTheme", "Blue")]);
        let clone = store.clone();
        assert_ok!(clone.remove_item("activeSystemTheme").await);
        assert!(store.is_empty().await);
    }
}
