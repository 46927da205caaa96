use crate::builtin;
use crate::config::Platform;
use crate::theme::Theme;

/// In-memory collection of known themes.
///
/// System themes come first, in the order they were registered, followed by
/// remote themes in the order the last sync reported them. The registry owns
/// every [`Theme`]; the session refers to the active one by identifier.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    system: Vec<Theme>,
    remote: Vec<Theme>,
}

impl ThemeRegistry {
    pub fn new(system: Vec<Theme>) -> Self {
        Self {
            system,
            remote: Vec::new(),
        }
    }

    /// Registry holding the built-in themes for `platform`.
    pub fn with_builtins(platform: Platform) -> Self {
        Self::new(builtin::system_themes(platform))
    }

    pub fn all_themes(&self) -> impl Iterator<Item = &Theme> {
        self.system.iter().chain(self.remote.iter())
    }

    pub fn system_themes(&self) -> &[Theme] {
        &self.system
    }

    pub fn remote_themes(&self) -> &[Theme] {
        &self.remote
    }

    pub fn len(&self) -> usize {
        self.system.len() + self.remote.len()
    }

    pub fn is_empty(&self) -> bool {
        self.system.is_empty() && self.remote.is_empty()
    }

    pub fn find_by_identifier(&self, id: &str) -> Option<&Theme> {
        self.all_themes().find(|theme| theme.uuid == id)
    }

    pub fn find_by_identifier_mut(&mut self, id: &str) -> Option<&mut Theme> {
        self.system
            .iter_mut()
            .chain(self.remote.iter_mut())
            .find(|theme| theme.uuid == id)
    }

    pub fn first_system_theme(&self) -> Option<&Theme> {
        self.system.first()
    }

    /// Insert or update a remote theme.
    ///
    /// An update keeps the local state the server does not know about:
    /// materialized rules (when the incoming copy has none), the active flag
    /// and the not-available marker. System theme identifiers are reserved.
    pub fn upsert_remote(&mut self, mut theme: Theme) -> bool {
        if self.system.iter().any(|existing| existing.uuid == theme.uuid) {
            log::warn!(
                "Ignoring remote theme '{}': identifier is reserved by a system theme",
                theme.uuid
            );
            return false;
        }

        match self.remote.iter_mut().find(|existing| existing.uuid == theme.uuid) {
            Some(existing) => {
                carry_local_state(existing, &mut theme);
                *existing = theme;
            }
            None => {
                theme.set_active(false);
                self.remote.push(theme);
            }
        }
        true
    }

    /// Replace the remote themes with the server's list.
    ///
    /// Themes missing from `themes` are dropped, except the active one, which
    /// stays registered until another theme is activated. Only the first
    /// occurrence of a repeated identifier is kept.
    pub fn replace_remote(&mut self, themes: Vec<Theme>) {
        let previous = std::mem::take(&mut self.remote);

        for theme in themes {
            if self.remote.iter().any(|kept| kept.uuid == theme.uuid) {
                log::warn!("Ignoring duplicate remote theme '{}'", theme.uuid);
                continue;
            }
            if let Some(existing) = previous.iter().find(|old| old.uuid == theme.uuid) {
                self.remote.push(existing.clone());
            }
            self.upsert_remote(theme);
        }

        for theme in previous {
            if theme.is_active() && self.find_by_identifier(&theme.uuid).is_none() {
                log::debug!("Keeping active theme '{}' absent from sync", theme.uuid);
                self.remote.push(theme);
            }
        }
    }

    pub fn active_count(&self) -> usize {
        self.all_themes().filter(|theme| theme.is_active()).count()
    }
}

fn carry_local_state(existing: &Theme, incoming: &mut Theme) {
    if !incoming.has_mobile_rules() {
        if let Some(rules) = existing.mobile_rules() {
            incoming.set_mobile_rules(rules.clone());
        }
    }
    incoming.set_active(existing.is_active());
    if existing.is_not_available_on_client() {
        incoming.mark_not_available_on_client();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{BLUE_THEME_NAME, RED_THEME_NAME};
    use crate::theme::MobileRules;
    use claims::{assert_none, assert_some};

    fn rules(name: &str) -> MobileRules {
        MobileRules {
            name: name.to_string(),
            rules: Default::default(),
            variables: Default::default(),
            status_bar: Default::default(),
        }
    }

    #[test]
    fn test_builtins_come_first() {
        let mut registry = ThemeRegistry::with_builtins(Platform::Ios);
        registry.upsert_remote(Theme::custom("abc", "Midnight"));

        let ids: Vec<&str> = registry.all_themes().map(|t| t.uuid.as_str()).collect();
        assert_eq!(ids, vec![RED_THEME_NAME, BLUE_THEME_NAME, "abc"]);
        assert_eq!(
            assert_some!(registry.first_system_theme()).name,
            RED_THEME_NAME
        );
    }

    #[test]
    fn test_find_by_identifier() {
        let mut registry = ThemeRegistry::with_builtins(Platform::Ios);
        registry.upsert_remote(Theme::custom("abc", "Midnight"));

        assert_eq!(
            assert_some!(registry.find_by_identifier("abc")).name,
            "Midnight"
        );
        assert_none!(registry.find_by_identifier("missing"));
    }

    #[test]
    fn test_upsert_rejects_system_identifier() {
        let mut registry = ThemeRegistry::with_builtins(Platform::Ios);
        assert!(!registry.upsert_remote(Theme::custom(RED_THEME_NAME, "Impostor")));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_upsert_keeps_downloaded_rules() {
        let mut registry = ThemeRegistry::new(Vec::new());
        registry.upsert_remote(Theme::custom("abc", "Midnight").with_rules(rules("Midnight")));
        registry.upsert_remote(Theme::custom("abc", "Midnight v2"));

        let theme = assert_some!(registry.find_by_identifier("abc"));
        assert_eq!(theme.name, "Midnight v2");
        assert!(theme.has_mobile_rules());
    }

    #[test]
    fn test_replace_remote_drops_stale_but_keeps_active() {
        let mut registry = ThemeRegistry::new(Vec::new());
        registry.upsert_remote(Theme::custom("stale", "Stale"));
        registry.upsert_remote(Theme::custom("active", "Active"));
        assert_some!(registry.find_by_identifier_mut("active")).set_active(true);

        registry.replace_remote(vec![Theme::custom("fresh", "Fresh")]);

        let ids: Vec<&str> = registry.all_themes().map(|t| t.uuid.as_str()).collect();
        assert_eq!(ids, vec!["fresh", "active"]);
        assert_eq!(registry.active_count(), 1);
    }

    #[test]
    fn test_replace_remote_keeps_first_of_repeated_identifier() {
        let mut registry = ThemeRegistry::new(Vec::new());
        registry.upsert_remote(Theme::custom("abc", "Midnight").with_rules(rules("Midnight")));

        registry.replace_remote(vec![
            Theme::custom("abc", "Midnight"),
            Theme::custom("abc", "Midnight copy"),
        ]);

        assert_eq!(registry.remote_themes().len(), 1);
        let theme = assert_some!(registry.find_by_identifier("abc"));
        assert_eq!(theme.name, "Midnight");
        assert!(theme.has_mobile_rules());
    }
}
