use engine::{ColorError, ThemeError};
use thiserror::Error;

/// Application-wide error type for the StyleKit command-line front end.
///
/// Engine failures keep their original error so callers can match on the
/// cases worth a dedicated message, most notably
/// [`ThemeError::ThemeUnavailable`]. Everything the binary itself can get
/// wrong (configuration, file access, user input) is carried as a message.
///
/// # Examples
///
/// ```no_run
/// use stylekit::error::{AppError, AppResult};
/// use engine::ThemeError;
///
/// fn describe(result: AppResult<()>) -> String {
///     match result {
///         Ok(()) => "ok".to_string(),
///         Err(AppError::Theme(ThemeError::ThemeUnavailable { name })) => {
///             format!("'{name}' cannot be used on this device")
///         }
///         Err(other) => other.to_string(),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Theme resolution, activation or persistence failures.
    #[error("Theme Error: {0}")]
    Theme(#[from] ThemeError),

    /// Malformed color input.
    #[error("Color Error: {0}")]
    Color(#[from] ColorError),

    /// Configuration loading and deserialization errors.
    #[error("Configuration Error: {0}")]
    Config(String),

    /// File system failures outside the theme store.
    #[error("I/O Error: {0}")]
    Io(String),

    /// Rejected user input.
    #[error("Validation Error: {0}")]
    Validation(String),
}

impl AppError {
    /// Whether the error reports a theme the client cannot use.
    pub fn is_theme_unavailable(&self) -> bool {
        matches!(self, AppError::Theme(ThemeError::ThemeUnavailable { .. }))
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        AppError::Io(error.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(error: config::ConfigError) -> Self {
        AppError::Config(error.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
