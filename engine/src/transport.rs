use crate::errors::TransportError;
use crate::registry::ThemeRegistry;
use crate::theme::Theme;
use async_trait::async_trait;

/// Network collaborator that materializes remote themes.
#[async_trait]
pub trait ThemeTransport: Send + Sync {
    /// Populate `theme`'s mobile rules, or mark it not available on this
    /// client with [`Theme::mark_not_available_on_client`].
    async fn download_theme(&self, theme: &mut Theme) -> Result<(), TransportError>;

    /// Reconcile the registry's remote themes with server state.
    async fn sync(&self, registry: &mut ThemeRegistry) -> Result<(), TransportError>;
}

/// Transport for clients without a theme server.
///
/// Every download reports the theme as not available and sync leaves the
/// registry untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineTransport;

#[async_trait]
impl ThemeTransport for OfflineTransport {
    async fn download_theme(&self, theme: &mut Theme) -> Result<(), TransportError> {
        log::debug!("Offline: theme '{}' cannot be downloaded", theme.uuid);
        theme.mark_not_available_on_client();
        Ok(())
    }

    async fn sync(&self, _registry: &mut ThemeRegistry) -> Result<(), TransportError> {
        Ok(())
    }
}
