use crate::theme::Theme;

/// UI collaborator reloading icon assets tinted for the active theme.
///
/// Invoked once per activation, after the theme became active and before
/// observers are notified.
pub trait IconLoader: Send + Sync {
    fn load_icons(&self, theme: &Theme);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopIconLoader;

impl IconLoader for NoopIconLoader {
    fn load_icons(&self, _theme: &Theme) {}
}
