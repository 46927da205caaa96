//! Theme session: initial resolution and activation.
//!
//! A [`ThemeSession`] is constructed explicitly and owns everything the theme
//! core needs at runtime: the registry, the active theme reference, the
//! variable template, the observer hub and the collaborators for storage,
//! transport and icons. The active theme is referenced by identifier, so
//! activation state is always read back through the registry.
//!
//! ## Activation
//!
//! A request runs through these stages:
//!
//! ```text
//! Requested -> (rules missing) Downloading -> [not available] Aborted
//!                                          -> [available] Syncing -> Activated
//!           -> (rules present) Activated
//! ```
//!
//! An aborted request leaves the previously active theme untouched and
//! writes nothing to storage.
//!
//! ## Concurrent requests
//!
//! Activation takes `&mut self`, so one session runs one request at a time.
//! [`SharedThemeSession`] wraps a session in a fair async mutex; requests
//! issued while another is in flight queue behind it and are served in
//! arrival order, each to completion.

use crate::config::SessionSettings;
use crate::errors::ThemeError;
use crate::icons::IconLoader;
use crate::observers::ObserverHub;
use crate::record::{self, ThemeRecord};
use crate::registry::ThemeRegistry;
use crate::rules::{self, StyleObject};
use crate::store::ThemeStore;
use crate::theme::{MobileRules, Theme};
use crate::transport::ThemeTransport;
use crate::variables::{VariableSet, VariableTemplate, VariableValue};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone)]
enum ActiveTheme {
    /// A registry member, by identifier.
    Registered(String),
    /// A theme restored from storage that the registry does not know yet.
    SwapIn(Theme),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActivationStage {
    Requested,
    Downloading,
    Syncing,
    Activated,
    Aborted,
}

impl fmt::Display for ActivationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            ActivationStage::Requested => "requested",
            ActivationStage::Downloading => "downloading",
            ActivationStage::Syncing => "syncing",
            ActivationStage::Activated => "activated",
            ActivationStage::Aborted => "aborted",
        };
        f.write_str(stage)
    }
}

pub struct ThemeSession {
    settings: SessionSettings,
    registry: ThemeRegistry,
    template: VariableTemplate,
    active: Option<ActiveTheme>,
    store: Arc<dyn ThemeStore>,
    transport: Arc<dyn ThemeTransport>,
    icons: Arc<dyn IconLoader>,
    observers: ObserverHub,
}

impl ThemeSession {
    /// Create a session with the built-in themes and template.
    ///
    /// No theme is active until [`resolve_initial_theme`](Self::resolve_initial_theme)
    /// or an activation runs.
    pub fn new(
        settings: SessionSettings,
        store: Arc<dyn ThemeStore>,
        transport: Arc<dyn ThemeTransport>,
        icons: Arc<dyn IconLoader>,
    ) -> Self {
        let registry = ThemeRegistry::with_builtins(settings.platform);
        Self {
            settings,
            registry,
            template: VariableTemplate::builtin(),
            active: None,
            store,
            transport,
            icons,
            observers: ObserverHub::new(),
        }
    }

    pub fn with_registry(mut self, registry: ThemeRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_template(mut self, template: VariableTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    pub fn template(&self) -> &VariableTemplate {
        &self.template
    }

    pub fn observers(&self) -> &ObserverHub {
        &self.observers
    }

    pub fn themes(&self) -> impl Iterator<Item = &Theme> {
        self.registry.all_themes()
    }

    pub fn active_theme(&self) -> Option<&Theme> {
        match self.active.as_ref()? {
            ActiveTheme::Registered(id) => self.registry.find_by_identifier(id),
            ActiveTheme::SwapIn(theme) => Some(theme),
        }
    }

    /// Compare against the active reference, or the theme's own flag when
    /// nothing has been activated yet.
    pub fn is_theme_active(&self, theme: &Theme) -> bool {
        match self.active_theme() {
            Some(active) => active.uuid == theme.uuid,
            None => theme.is_active(),
        }
    }

    pub fn styles(&self) -> Option<&MobileRules> {
        self.active_theme()?.mobile_rules()
    }

    pub fn variables(&self) -> Option<&VariableSet> {
        self.styles().map(|rules| &rules.variables)
    }

    pub fn variable(&self, name: &str) -> Option<&VariableValue> {
        self.variables()?.get(name)
    }

    /// The active rule for `key` plus its platform variant, if any.
    pub fn styles_for_key(&self, key: &str) -> Vec<&StyleObject> {
        self.styles()
            .map(|styles| rules::styles_for_key(&styles.rules, key, self.settings.platform))
            .unwrap_or_default()
    }

    /// Determine the active theme at startup.
    ///
    /// A readable custom theme record becomes the active swap-in theme; it is
    /// not written back until the next activation. Without a record, or when
    /// the record cannot be used, the first system theme is activated. Only an
    /// empty set of system themes makes this fail.
    pub async fn resolve_initial_theme(&mut self) -> Result<&Theme, ThemeError> {
        match self.load_persisted_theme().await {
            Ok(Some(theme)) => {
                let id = theme.uuid.clone();
                match self.apply_activation(ActiveTheme::SwapIn(theme)) {
                    Ok(()) => log::info!("Restored persisted theme '{id}'"),
                    Err(error) => {
                        log::error!("Error restoring initial theme: {error}");
                        self.activate_default_theme()?;
                    }
                }
            }
            Ok(None) => self.activate_default_theme()?,
            Err(error) => {
                log::error!("Error parsing initial theme: {error}");
                self.activate_default_theme()?;
            }
        }

        self.active_theme().ok_or(ThemeError::NoSystemThemes)
    }

    /// Activate the registered theme `id`.
    ///
    /// Themes without rules are downloaded and the registry synced first.
    /// A theme reported as not available on this client aborts the request
    /// with [`ThemeError::ThemeUnavailable`]. System themes persist their name
    /// only; custom themes persist their full record unless `persist` is
    /// false. Storage failures are logged and do not undo the activation.
    pub async fn activate_theme(&mut self, id: &str, persist: bool) -> Result<&Theme, ThemeError> {
        Self::log_stage(id, ActivationStage::Requested);
        let theme = self
            .registry
            .find_by_identifier(id)
            .ok_or_else(|| ThemeError::ThemeNotFound { id: id.to_string() })?;

        if !theme.has_mobile_rules() {
            self.materialize(id).await?;
        }

        self.finish_activation(id, persist).await
    }

    /// Download and sync `id` even if its rules are present, then activate it.
    pub async fn download_theme_and_reload(&mut self, id: &str) -> Result<&Theme, ThemeError> {
        Self::log_stage(id, ActivationStage::Requested);
        let theme = self
            .registry
            .find_by_identifier(id)
            .ok_or_else(|| ThemeError::ThemeNotFound { id: id.to_string() })?;

        if !theme.is_system_theme {
            self.materialize(id).await?;
        }

        self.finish_activation(id, true).await
    }

    /// Sync the registry with the server and reconcile a swap-in theme.
    pub async fn sync(&mut self) -> Result<(), ThemeError> {
        self.transport.sync(&mut self.registry).await?;
        self.reconcile_swap_in();
        Ok(())
    }

    async fn load_persisted_theme(&self) -> Result<Option<Theme>, ThemeError> {
        let raw = self
            .store
            .get_item(&self.settings.active_theme_key)
            .await
            .map_err(|e| ThemeError::PersistedStateUnreadable {
                reason: e.to_string(),
            })?;

        let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
            return Ok(None);
        };

        let decoded = record::decode(&raw)?;
        if decoded.migrated {
            log::info!(
                "Migrated legacy theme record '{}' to schema {}",
                decoded.record.uuid,
                decoded.record.schema_version
            );
        }

        let mut theme = decoded.record.into_theme();
        if !theme.has_mobile_rules() {
            return Err(ThemeError::MissingRules { id: theme.uuid });
        }
        theme.set_swap_in(true);
        Ok(Some(theme))
    }

    fn activate_default_theme(&mut self) -> Result<(), ThemeError> {
        let id = self
            .registry
            .first_system_theme()
            .map(|theme| theme.uuid.clone())
            .ok_or(ThemeError::NoSystemThemes)?;

        self.apply_activation(ActiveTheme::Registered(id))
    }

    /// Download `id` into the registry and sync.
    async fn materialize(&mut self, id: &str) -> Result<(), ThemeError> {
        Self::log_stage(id, ActivationStage::Downloading);
        let mut candidate = self
            .registry
            .find_by_identifier(id)
            .cloned()
            .ok_or_else(|| ThemeError::ThemeNotFound { id: id.to_string() })?;
        candidate.clear_not_available_on_client();

        self.transport.download_theme(&mut candidate).await?;

        if candidate.is_not_available_on_client() {
            if let Some(theme) = self.registry.find_by_identifier_mut(id) {
                theme.mark_not_available_on_client();
            }
            Self::log_stage(id, ActivationStage::Aborted);
            log::warn!("Theme '{}' is not available on this client", candidate.name);
            return Err(ThemeError::ThemeUnavailable {
                name: candidate.name,
            });
        }

        let rules = candidate
            .mobile_rules()
            .cloned()
            .ok_or_else(|| ThemeError::MissingRules { id: id.to_string() })?;
        if let Some(theme) = self.registry.find_by_identifier_mut(id) {
            theme.clear_not_available_on_client();
            theme.set_mobile_rules(rules.clone());
        }

        Self::log_stage(id, ActivationStage::Syncing);
        if let Err(error) = self.transport.sync(&mut self.registry).await {
            log::warn!("Sync after downloading theme '{id}' failed: {error}");
        }

        // Sync may have replaced or dropped the entry.
        match self.registry.find_by_identifier_mut(id) {
            Some(theme) if !theme.has_mobile_rules() => theme.set_mobile_rules(rules),
            Some(_) => {}
            None => {
                log::debug!("Theme '{id}' missing after sync, re-registering download");
                self.registry.upsert_remote(candidate);
            }
        }
        Ok(())
    }

    async fn finish_activation(&mut self, id: &str, persist: bool) -> Result<&Theme, ThemeError> {
        self.apply_activation(ActiveTheme::Registered(id.to_string()))?;
        Self::log_stage(id, ActivationStage::Activated);
        self.persist_activation(persist).await;
        self.active_theme()
            .ok_or_else(|| ThemeError::ThemeNotFound { id: id.to_string() })
    }

    /// Make `next` the active theme.
    ///
    /// The target is validated before the previous theme loses its flag, so
    /// a failed call leaves activation state unchanged.
    fn apply_activation(&mut self, next: ActiveTheme) -> Result<(), ThemeError> {
        let target_id = match &next {
            ActiveTheme::Registered(id) => {
                let theme = self
                    .registry
                    .find_by_identifier(id)
                    .ok_or_else(|| ThemeError::ThemeNotFound { id: id.clone() })?;
                if !theme.has_mobile_rules() {
                    return Err(ThemeError::MissingRules { id: id.clone() });
                }
                id.clone()
            }
            ActiveTheme::SwapIn(theme) => {
                if !theme.has_mobile_rules() {
                    return Err(ThemeError::MissingRules {
                        id: theme.uuid.clone(),
                    });
                }
                theme.uuid.clone()
            }
        };

        if let Some(ActiveTheme::Registered(previous)) = self.active.take() {
            if let Some(theme) = self.registry.find_by_identifier_mut(&previous) {
                theme.set_active(false);
            }
        }
        self.active = Some(next);

        let theme = match self.active.as_mut() {
            Some(ActiveTheme::Registered(id)) => self.registry.find_by_identifier_mut(id),
            Some(ActiveTheme::SwapIn(theme)) => Some(theme),
            None => None,
        }
        .ok_or(ThemeError::ThemeNotFound { id: target_id })?;

        let filled = theme
            .mobile_rules_mut()
            .map(|rules| self.template.merge_into(&mut rules.variables))
            .unwrap_or_default();
        if filled > 0 {
            log::debug!(
                "Filled {filled} missing template variables for theme '{}'",
                theme.uuid
            );
        }

        theme.set_active(true);
        self.icons.load_icons(theme);
        log::info!("Activated theme: {} ({})", theme.name, theme.uuid);

        self.observers.notify_all();
        Ok(())
    }

    async fn persist_activation(&self, persist: bool) {
        let Some(theme) = self.active_theme() else {
            return;
        };

        if theme.is_system_theme {
            let name = theme.name.clone();
            if let Err(error) = self
                .store
                .set_item(&self.settings.active_system_theme_key, name)
                .await
            {
                log::warn!("Failed to remember system theme: {error}");
            }
            if let Err(error) = self
                .store
                .remove_item(&self.settings.active_theme_key)
                .await
            {
                log::warn!("Failed to clear persisted custom theme: {error}");
            }
        } else if persist {
            let encoded = ThemeRecord::from_theme(theme).to_json();
            match encoded {
                Ok(json) => {
                    if let Err(error) = self
                        .store
                        .set_item(&self.settings.active_theme_key, json)
                        .await
                    {
                        log::warn!("Failed to persist active theme: {error}");
                    }
                    if let Err(error) = self
                        .store
                        .remove_item(&self.settings.active_system_theme_key)
                        .await
                    {
                        log::warn!("Failed to clear remembered system theme: {error}");
                    }
                }
                Err(error) => log::warn!("{error}"),
            }
        } else {
            log::debug!("Skipping persistence for theme '{}'", theme.uuid);
        }
    }

    fn reconcile_swap_in(&mut self) {
        let Some(ActiveTheme::SwapIn(swap_in)) = &self.active else {
            return;
        };
        let id = swap_in.uuid.clone();
        let rules = swap_in.mobile_rules().cloned();

        let Some(matching) = self.registry.find_by_identifier_mut(&id) else {
            log::debug!("Swap-in theme '{id}' not yet known to the registry");
            return;
        };
        if !matching.has_mobile_rules() {
            if let Some(rules) = rules {
                matching.set_mobile_rules(rules);
            }
        }
        matching.set_swap_in(false);

        match self.apply_activation(ActiveTheme::Registered(id.clone())) {
            Ok(()) => log::info!("Reconciled persisted theme '{id}' with the registry"),
            Err(error) => log::warn!("Failed to reconcile swap-in theme '{id}': {error}"),
        }
    }

    fn log_stage(id: &str, stage: ActivationStage) {
        log::debug!("Theme activation '{id}': {stage}");
    }
}

/// A [`ThemeSession`] shared between tasks.
///
/// Requests queue on a fair mutex and run one after another, in the order
/// they were issued.
#[derive(Clone)]
pub struct SharedThemeSession {
    inner: Arc<Mutex<ThemeSession>>,
}

impl SharedThemeSession {
    pub fn new(session: ThemeSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, ThemeSession> {
        self.inner.lock().await
    }

    pub async fn resolve_initial_theme(&self) -> Result<Theme, ThemeError> {
        let mut session = self.inner.lock().await;
        session.resolve_initial_theme().await.cloned()
    }

    pub async fn activate_theme(&self, id: &str, persist: bool) -> Result<Theme, ThemeError> {
        let mut session = self.inner.lock().await;
        session.activate_theme(id, persist).await.cloned()
    }

    pub async fn active_theme(&self) -> Option<Theme> {
        self.inner.lock().await.active_theme().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display() {
        assert_eq!(ActivationStage::Downloading.to_string(), "downloading");
        assert_eq!(ActivationStage::Aborted.to_string(), "aborted");
    }
}
