//! # Theme Collaborators
//!
//! Concrete implementations of the engine's collaborator traits for the
//! command-line front end:
//!
//! - **[`JsonFileStore`]** - `ThemeStore` backed by a JSON file
//! - **[`DirectoryCatalog`]** - `ThemeTransport` reading a catalog directory
//! - **[`LoggingIconLoader`]** - `IconLoader` that logs the icon tint
//!
//! [`open_session`] wires them into an `engine::ThemeSession` from the
//! application configuration.

pub mod catalog;
pub mod file_store;
pub mod icons;
pub mod validation;

pub use catalog::DirectoryCatalog;
pub use file_store::JsonFileStore;
pub use icons::LoggingIconLoader;

use crate::config::AppConfig;
use crate::theme::validation::CatalogDirValidator;
use crate::validation::Validator;
use engine::ThemeSession;
use std::sync::Arc;

pub fn open_session(config: &AppConfig) -> ThemeSession {
    let theme_config = config.theme();
    let store_path = theme_config.store_path();
    let catalog_dir = theme_config.catalog_dir();

    if let Err(e) = CatalogDirValidator.validate(catalog_dir.as_path()) {
        log::warn!("{}", e.user_message());
    }
    log::debug!(
        "Opening theme session (store: {}, catalog: {})",
        store_path.display(),
        catalog_dir.display()
    );

    ThemeSession::new(
        config.session_settings(),
        Arc::new(JsonFileStore::new(store_path)),
        Arc::new(DirectoryCatalog::new(catalog_dir)),
        Arc::new(LoggingIconLoader::new()),
    )
}
