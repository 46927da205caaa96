//! Theme catalog laid out on disk.
//!
//! The catalog stands in for a theme server. Every remote theme is one
//! `<uuid>.json` file in the catalog directory:
//!
//! ```json
//! {
//!   "uuid": "2c6f0d8e",
//!   "name": "Midnight",
//!   "notAvailableOnMobile": false,
//!   "mobileRules": { "name": "Midnight", "rules": {}, "variables": {} }
//! }
//! ```
//!
//! Sync lists the catalog without rules; rules are only read when a theme is
//! downloaded. Entries flagged `notAvailableOnMobile` or without
//! `mobileRules` are reported as not available on this client.

use crate::theme::validation::ThemeIdValidator;
use crate::validation::Validator;
use async_trait::async_trait;
use engine::{MobileRules, Theme, ThemeRegistry, ThemeTransport, TransportError};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const ENTRY_EXTENSION: &str = "json";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub not_available_on_mobile: bool,
    #[serde(default)]
    pub mobile_rules: Option<MobileRules>,
}

impl CatalogEntry {
    fn is_available(&self) -> bool {
        !self.not_available_on_mobile && self.mobile_rules.is_some()
    }
}

pub struct DirectoryCatalog {
    dir: PathBuf,
    id_validator: ThemeIdValidator,
}

impl DirectoryCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            id_validator: ThemeIdValidator,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, uuid: &str) -> PathBuf {
        self.dir.join(format!("{uuid}.{ENTRY_EXTENSION}"))
    }

    async fn read_entry(path: &Path) -> Result<CatalogEntry, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read '{}': {e}", path.display()))?;
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {e}", path.display()))
    }

    /// Every readable entry, ordered by name.
    pub async fn list_entries(&self) -> Result<Vec<CatalogEntry>, TransportError> {
        let mut dir = match tokio::fs::read_dir(&self.dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Theme catalog {} does not exist", self.dir.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(TransportError::Sync {
                    reason: format!("Failed to read '{}': {e}", self.dir.display()),
                });
            }
        };

        let mut entries = Vec::new();
        loop {
            let next = dir.next_entry().await.map_err(|e| TransportError::Sync {
                reason: e.to_string(),
            })?;
            let Some(file) = next else {
                break;
            };

            let path = file.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(ENTRY_EXTENSION) {
                continue;
            }

            match Self::read_entry(&path).await {
                Ok(entry) if self.id_validator.validate(entry.uuid.as_str()).is_ok() => {
                    entries.push(entry)
                }
                Ok(entry) => {
                    log::warn!("Skipping catalog entry with invalid uuid '{}'", entry.uuid)
                }
                Err(reason) => log::warn!("Skipping catalog entry: {reason}"),
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.uuid.cmp(&b.uuid)));
        Ok(entries)
    }
}

#[async_trait]
impl ThemeTransport for DirectoryCatalog {
    async fn download_theme(&self, theme: &mut Theme) -> Result<(), TransportError> {
        let download_error = |reason: String| TransportError::Download {
            theme: theme.uuid.clone(),
            reason,
        };

        self.id_validator
            .validate(theme.uuid.as_str())
            .map_err(|e| download_error(e.user_message()))?;

        let entry = Self::read_entry(&self.entry_path(&theme.uuid))
            .await
            .map_err(download_error)?;

        if !entry.is_available() {
            log::info!("Theme '{}' is not available on mobile", entry.name);
            theme.mark_not_available_on_client();
            return Ok(());
        }

        theme.name = entry.name;
        if let Some(rules) = entry.mobile_rules {
            theme.set_mobile_rules(rules);
        }
        log::debug!("Downloaded theme '{}'", theme.uuid);
        Ok(())
    }

    async fn sync(&self, registry: &mut ThemeRegistry) -> Result<(), TransportError> {
        let themes: Vec<Theme> = self
            .list_entries()
            .await?
            .into_iter()
            .map(|entry| Theme::custom(entry.uuid, entry.name))
            .collect();

        log::info!("Synced {} themes from {}", themes.len(), self.dir.display());
        registry.replace_remote(themes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok, assert_some};
    use engine::Platform;
    use serde_json::json;

    fn write_entry(dir: &Path, uuid: &str, name: &str, available: bool) {
        let entry = json!({
            "uuid": uuid,
            "name": name,
            "notAvailableOnMobile": !available,
            "mobileRules": { "name": name, "variables": { "stylekitInfoColor": "#00ff00" } }
        });
        std::fs::write(dir.join(format!("{uuid}.json")), entry.to_string()).expect("write entry");
    }

    #[tokio::test]
    async fn test_sync_lists_entries_without_rules() {
        let dir = tempfile::tempdir().expect("temp dir");
        write_entry(dir.path(), "b2", "Sunrise", true);
        write_entry(dir.path(), "a1", "Midnight", true);
        std::fs::write(dir.path().join("notes.txt"), "ignored").expect("write note");
        std::fs::write(dir.path().join("broken.json"), "{").expect("write broken");

        let catalog = DirectoryCatalog::new(dir.path());
        let mut registry = ThemeRegistry::with_builtins(Platform::Ios);
        assert_ok!(catalog.sync(&mut registry).await);

        let names: Vec<&str> = registry
            .remote_themes()
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["Midnight", "Sunrise"]);
        assert!(registry.remote_themes().iter().all(|t| !t.has_mobile_rules()));
    }

    #[tokio::test]
    async fn test_download_populates_rules() {
        let dir = tempfile::tempdir().expect("temp dir");
        write_entry(dir.path(), "a1", "Midnight", true);

        let catalog = DirectoryCatalog::new(dir.path());
        let mut theme = Theme::custom("a1", "Midnight");
        assert_ok!(catalog.download_theme(&mut theme).await);

        let rules = assert_some!(theme.mobile_rules());
        assert_eq!(rules.variables["stylekitInfoColor"].as_str(), Some("#00ff00"));
        assert!(!theme.is_not_available_on_client());
    }

    #[tokio::test]
    async fn test_download_marks_unavailable_entry() {
        let dir = tempfile::tempdir().expect("temp dir");
        write_entry(dir.path(), "c3", "Desktop Only", false);

        let catalog = DirectoryCatalog::new(dir.path());
        let mut theme = Theme::custom("c3", "Desktop Only");
        assert_ok!(catalog.download_theme(&mut theme).await);

        assert!(theme.is_not_available_on_client());
        assert!(!theme.has_mobile_rules());
    }

    #[tokio::test]
    async fn test_download_rejects_missing_and_unsafe_ids() {
        let dir = tempfile::tempdir().expect("temp dir");
        let catalog = DirectoryCatalog::new(dir.path());

        assert_err!(catalog.download_theme(&mut Theme::custom("zz", "Gone")).await);
        assert_err!(
            catalog
                .download_theme(&mut Theme::custom("../store", "Escape"))
                .await
        );
    }

    #[tokio::test]
    async fn test_missing_catalog_syncs_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let catalog = DirectoryCatalog::new(dir.path().join("absent"));

        let mut registry = ThemeRegistry::with_builtins(Platform::Ios);
        assert_ok!(catalog.sync(&mut registry).await);
        assert!(registry.remote_themes().is_empty());
    }
}
