use engine::{IconLoader, Theme};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Variables icon assets are tinted with.
pub const ICON_TINT_VARIABLES: [&str; 3] = [
    "stylekitInfoColor",
    "stylekitNeutralColor",
    "stylekitForegroundColor",
];

/// Icon loader for the command line, which has no icon assets: it logs the
/// tint each reload would use.
#[derive(Debug, Default)]
pub struct LoggingIconLoader {
    reloads: AtomicUsize,
}

impl LoggingIconLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reload_count(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

impl IconLoader for LoggingIconLoader {
    fn load_icons(&self, theme: &Theme) {
        self.reloads.fetch_add(1, Ordering::SeqCst);

        let Some(rules) = theme.mobile_rules() else {
            log::warn!("Theme '{}' has no rules to tint icons with", theme.uuid);
            return;
        };

        let tint: Vec<String> = ICON_TINT_VARIABLES
            .iter()
            .filter_map(|name| {
                rules
                    .variables
                    .get(*name)
                    .map(|value| format!("{name}={value}"))
            })
            .collect();
        log::debug!("Reloading icons for '{}': {}", theme.name, tint.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::Platform;
    use engine::builtin::system_themes;

    #[test]
    fn test_each_load_is_counted() {
        let loader = LoggingIconLoader::new();
        let themes = system_themes(Platform::Ios);

        loader.load_icons(&themes[0]);
        loader.load_icons(&Theme::custom("a1", "Midnight"));

        assert_eq!(loader.reload_count(), 2);
    }
}
