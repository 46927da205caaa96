use crate::theme::StatusBarStyle;
use serde::{Deserialize, Serialize};

/// Storage key holding the full JSON record of the active custom theme.
pub const ACTIVE_THEME_KEY: &str = "activeTheme";

/// Storage key holding the name of the active system theme.
pub const ACTIVE_SYSTEM_THEME_KEY: &str = "activeSystemTheme";

/// Client platform the styles are resolved for.
///
/// The platform selects platform-specific rule variants (keys suffixed with
/// `IOS` or `Android`) and the status bar style of built-in themes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    #[default]
    Ios,
    Android,
}

impl Platform {
    /// Suffix appended to a rule key for the platform-specific variant.
    pub fn rule_suffix(self) -> &'static str {
        match self {
            Platform::Ios => "IOS",
            Platform::Android => "Android",
        }
    }

    /// Status bar style used by built-in themes on this platform.
    pub fn status_bar_style(self) -> StatusBarStyle {
        match self {
            Platform::Android => StatusBarStyle::LightContent,
            Platform::Ios => StatusBarStyle::DarkContent,
        }
    }
}

/// Settings for a [`ThemeSession`](crate::session::ThemeSession).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSettings {
    pub platform: Platform,
    pub active_theme_key: String,
    pub active_system_theme_key: String,
}

impl SessionSettings {
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            platform,
            ..Self::default()
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            active_theme_key: ACTIVE_THEME_KEY.to_string(),
            active_system_theme_key: ACTIVE_SYSTEM_THEME_KEY.to_string(),
        }
    }
}
