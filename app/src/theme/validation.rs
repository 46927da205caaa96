use crate::error::AppError;
use crate::validation::Validator;
use std::path::Path;

const MAX_THEME_ID_LEN: usize = 64;

/// Validation errors specific to theme input.
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeValidationError {
    InvalidThemeId { id: String, reason: String },
    InvalidCatalogPath { path: String, reason: String },
    OutOfRange { name: String, value: f64, min: f64, max: f64 },
}

impl ThemeValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ThemeValidationError::InvalidThemeId { id, reason } => {
                format!(
                    "Invalid theme identifier: '{id}'\n\n\
                    Reason: {reason}\n\n\
                    Use the identifier shown by `stylekit list`."
                )
            }
            ThemeValidationError::InvalidCatalogPath { path, reason } => {
                format!(
                    "Invalid theme catalog: '{path}'\n\n\
                    Reason: {reason}"
                )
            }
            ThemeValidationError::OutOfRange {
                name,
                value,
                min,
                max,
            } => {
                format!("{name} must be between {min} and {max}, got {value}")
            }
        }
    }
}

impl From<ThemeValidationError> for AppError {
    fn from(error: ThemeValidationError) -> Self {
        AppError::Validation(error.user_message())
    }
}

/// Theme identifiers: system theme names or remote uuids.
///
/// Identifiers double as catalog file names, so only alphanumerics, hyphens
/// and underscores are accepted.
pub struct ThemeIdValidator;

impl Validator<str> for ThemeIdValidator {
    type Error = ThemeValidationError;

    fn validate(&self, input: &str) -> Result<(), Self::Error> {
        let invalid = |reason: &str| ThemeValidationError::InvalidThemeId {
            id: input.to_string(),
            reason: reason.to_string(),
        };

        if input.is_empty() {
            return Err(invalid("Identifier cannot be empty"));
        }

        if input.len() > MAX_THEME_ID_LEN {
            return Err(invalid("Identifier too long (max 64 characters)"));
        }

        if !input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(invalid(
                "Identifier contains invalid characters (only alphanumeric, hyphens, and underscores allowed)",
            ));
        }

        Ok(())
    }
}

/// The catalog directory must exist and be a directory.
pub struct CatalogDirValidator;

impl Validator<Path> for CatalogDirValidator {
    type Error = ThemeValidationError;

    fn validate(&self, input: &Path) -> Result<(), Self::Error> {
        if !input.exists() {
            return Err(ThemeValidationError::InvalidCatalogPath {
                path: input.display().to_string(),
                reason: "Directory does not exist".to_string(),
            });
        }

        if !input.is_dir() {
            return Err(ThemeValidationError::InvalidCatalogPath {
                path: input.display().to_string(),
                reason: "Path is not a directory".to_string(),
            });
        }

        Ok(())
    }
}

/// Inclusive numeric range check for color arguments.
pub struct RangeValidator {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
}

impl RangeValidator {
    pub const ALPHA: RangeValidator = RangeValidator {
        name: "Alpha",
        min: 0.0,
        max: 1.0,
    };

    pub const FRACTION: RangeValidator = RangeValidator {
        name: "Blend fraction",
        min: -1.0,
        max: 1.0,
    };

    pub const AMOUNT: RangeValidator = RangeValidator {
        name: "Amount",
        min: 0.0,
        max: 1.0,
    };
}

impl Validator<f64> for RangeValidator {
    type Error = ThemeValidationError;

    fn validate(&self, input: &f64) -> Result<(), Self::Error> {
        if input.is_nan() || *input < self.min || *input > self.max {
            return Err(ThemeValidationError::OutOfRange {
                name: self.name.to_string(),
                value: *input,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}
