use thiserror::Error;

/// Errors raised by the theme core.
///
/// Most variants are recovered inside the session: an unreadable persisted
/// record falls back to the default system theme, and a failed write after a
/// successful in-memory activation is only logged. [`ThemeUnavailable`] is the
/// one outcome surfaced to the user, because the requested activation was
/// aborted and the previous theme remains in effect.
///
/// [`ThemeUnavailable`]: ThemeError::ThemeUnavailable
#[derive(Debug, Error)]
pub enum ThemeError {
    /// The persisted record could not be read or parsed.
    #[error("Persisted theme state is unreadable: {reason}")]
    PersistedStateUnreadable { reason: String },

    /// The persisted record declares a schema version this build does not know.
    #[error("Unsupported theme record schema version {version}")]
    UnsupportedSchema { version: u64 },

    /// The remote theme cannot be used on this client.
    #[error("Theme '{name}' is not available on this client")]
    ThemeUnavailable { name: String },

    /// No theme with this identifier is known to the registry.
    #[error("Theme '{id}' not found")]
    ThemeNotFound { id: String },

    /// The theme has no materialized rules to activate.
    #[error("Theme '{id}' has no mobile rules")]
    MissingRules { id: String },

    /// The registry holds no system theme to fall back to.
    #[error("No system themes are registered")]
    NoSystemThemes,

    /// A theme could not be serialized for persistence.
    #[error("Failed to serialize theme '{id}': {reason}")]
    Serialization { id: String, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors returned by [`ThemeStore`](crate::store::ThemeStore) implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Failed to read '{key}': {reason}")]
    Read { key: String, reason: String },

    #[error("Failed to write '{key}': {reason}")]
    Write { key: String, reason: String },

    #[error("Failed to remove '{key}': {reason}")]
    Remove { key: String, reason: String },
}

/// Errors returned by [`ThemeTransport`](crate::transport::ThemeTransport) implementations.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("Download of theme '{theme}' failed: {reason}")]
    Download { theme: String, reason: String },

    #[error("Sync failed: {reason}")]
    Sync { reason: String },
}
