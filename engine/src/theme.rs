use crate::rules::StyleRules;
use crate::variables::VariableSet;
use serde::{Deserialize, Serialize};

/// Status bar appearance requested by a theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusBarStyle {
    #[serde(rename = "light-content")]
    LightContent,
    #[default]
    #[serde(rename = "dark-content")]
    DarkContent,
}

/// The full style payload of a theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileRules {
    pub name: String,
    #[serde(default)]
    pub rules: StyleRules,
    #[serde(default)]
    pub variables: VariableSet,
    #[serde(default)]
    pub status_bar: StatusBarStyle,
}

/// A theme known to the client, either shipped with it or synced from a server.
///
/// `mobile_rules` stays absent until rules are materialized, either because
/// the theme is built in or because it was downloaded. Activation state is
/// owned by the session: only the crate can flip `is_active`.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub uuid: String,
    pub name: String,
    pub is_system_theme: bool,
    mobile_rules: Option<MobileRules>,
    is_active: bool,
    is_swap_in: bool,
    not_available_on_client: bool,
}

impl Theme {
    /// A built-in theme; its uuid is its name.
    pub fn system(name: &str, rules: MobileRules) -> Self {
        Self {
            uuid: name.to_string(),
            name: name.to_string(),
            is_system_theme: true,
            mobile_rules: Some(rules),
            is_active: false,
            is_swap_in: false,
            not_available_on_client: false,
        }
    }

    /// A custom theme whose rules have not been downloaded yet.
    pub fn custom(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            is_system_theme: false,
            mobile_rules: None,
            is_active: false,
            is_swap_in: false,
            not_available_on_client: false,
        }
    }

    pub fn with_rules(mut self, rules: MobileRules) -> Self {
        self.mobile_rules = Some(rules);
        self
    }

    pub fn mobile_rules(&self) -> Option<&MobileRules> {
        self.mobile_rules.as_ref()
    }

    pub fn mobile_rules_mut(&mut self) -> Option<&mut MobileRules> {
        self.mobile_rules.as_mut()
    }

    pub fn has_mobile_rules(&self) -> bool {
        self.mobile_rules.is_some()
    }

    pub fn set_mobile_rules(&mut self, rules: MobileRules) {
        self.mobile_rules = Some(rules);
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    /// Whether this theme was reconstructed from persisted state and still
    /// awaits reconciliation against the registry.
    pub fn is_swap_in(&self) -> bool {
        self.is_swap_in
    }

    pub(crate) fn set_swap_in(&mut self, swap_in: bool) {
        self.is_swap_in = swap_in;
    }

    pub fn is_not_available_on_client(&self) -> bool {
        self.not_available_on_client
    }

    /// Flag set by a transport when the theme has no rules for this client.
    pub fn mark_not_available_on_client(&mut self) {
        self.not_available_on_client = true;
    }

    pub(crate) fn clear_not_available_on_client(&mut self) {
        self.not_available_on_client = false;
    }
}
