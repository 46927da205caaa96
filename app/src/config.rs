use crate::error::AppResult;
use config::{Config, Environment, File};
use engine::{Platform, SessionSettings};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Optional configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "stylekit.toml";

/// Prefix of environment overrides, e.g. `STYLEKIT__THEME__PLATFORM=android`.
pub const ENV_PREFIX: &str = "STYLEKIT";

const DEFAULT_CATALOG_DIR: &str = "themes";
const STORE_FILE_NAME: &str = "store.json";

static CONFIG: OnceCell<AppConfig> = OnceCell::new();

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    theme: ThemeConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThemeConfig {
    platform: Option<Platform>,
    store_path: Option<PathBuf>,
    catalog_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl AppConfig {
    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings::for_platform(self.theme.platform())
    }
}

impl ThemeConfig {
    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_default()
    }

    /// The store file, defaulting to `<config dir>/stylekit/store.json`.
    pub fn store_path(&self) -> PathBuf {
        self.store_path.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("stylekit")
                .join(STORE_FILE_NAME)
        })
    }

    pub fn catalog_dir(&self) -> PathBuf {
        self.catalog_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_DIR))
    }
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}

/// Load configuration from `path` (if it exists) and the environment.
///
/// Environment entries override file values.
pub fn load_config_from(path: &Path) -> AppResult<AppConfig> {
    dotenv::dotenv().ok();

    let config = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    Ok(config.try_deserialize::<AppConfig>()?)
}

/// The process-wide configuration, loaded from [`CONFIG_FILE`] on first use.
pub fn get_config() -> AppResult<&'static AppConfig> {
    CONFIG.get_or_try_init(|| load_config_from(Path::new(CONFIG_FILE)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::assert_ok;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = assert_ok!(load_config_from(&dir.path().join("missing.toml")));

        assert_eq!(config.logging().level(), "info");
        assert_eq!(config.logging().file(), None);
        assert_eq!(config.theme().catalog_dir(), PathBuf::from("themes"));
        assert!(config.theme().store_path().ends_with("stylekit/store.json"));
    }

    #[test]
    fn test_file_values_are_read() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(
            file,
            "[theme]\nplatform = \"android\"\ncatalog_dir = \"/srv/themes\"\n\n[logging]\nlevel = \"debug\""
        )
        .expect("write config");

        let config = assert_ok!(load_config_from(file.path()));

        assert_eq!(config.theme().platform(), Platform::Android);
        assert_eq!(config.session_settings().platform, Platform::Android);
        assert_eq!(config.theme().catalog_dir(), PathBuf::from("/srv/themes"));
        assert_eq!(config.logging().level(), "debug");
    }
}
