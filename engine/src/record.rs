//! Persisted theme record and schema migration.
//!
//! The active custom theme is stored as a JSON record. Records carry a
//! `schemaVersion` tag that is read before anything else is parsed:
//!
//! - **version 2** (current): rules nested under `content.mobileRules`
//! - **version 1** (legacy, also assumed when the tag is absent): rules stored
//!   in a top-level `mobileRules` field beside `content`
//!
//! Legacy records are migrated in memory on read. Writes always emit the
//! current schema, so a migrated record is rewritten on the next activation.

use crate::errors::ThemeError;
use crate::theme::{MobileRules, Theme};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const CURRENT_SCHEMA_VERSION: u64 = 2;
pub const LEGACY_SCHEMA_VERSION: u64 = 1;

const SCHEMA_VERSION_FIELD: &str = "schemaVersion";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeRecord {
    pub schema_version: u64,
    pub uuid: String,
    pub content: RecordContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordContent {
    pub name: String,
    #[serde(default)]
    pub is_system_theme: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_rules: Option<MobileRules>,
}

impl ThemeRecord {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            uuid: theme.uuid.clone(),
            content: RecordContent {
                name: theme.name.clone(),
                is_system_theme: theme.is_system_theme,
                mobile_rules: theme.mobile_rules().cloned(),
            },
        }
    }

    pub fn to_json(&self) -> Result<String, ThemeError> {
        serde_json::to_string(self).map_err(|e| ThemeError::Serialization {
            id: self.uuid.clone(),
            reason: e.to_string(),
        })
    }

    /// Rebuild a theme from the record's content.
    pub fn into_theme(self) -> Theme {
        let mut theme = Theme::custom(self.uuid, self.content.name);
        theme.is_system_theme = self.content.is_system_theme;
        if let Some(rules) = self.content.mobile_rules {
            theme.set_mobile_rules(rules);
        }
        theme
    }
}

/// Record shape written before schema versions existed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyThemeRecord {
    pub uuid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub content: Option<LegacyContent>,
    #[serde(default)]
    pub mobile_rules: Option<MobileRules>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyContent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_system_theme: bool,
    #[serde(default)]
    pub mobile_rules: Option<MobileRules>,
}

impl LegacyThemeRecord {
    /// Whether the rules still sit in the legacy top-level field.
    pub fn needs_migration(&self) -> bool {
        self.mobile_rules.is_some()
    }

    /// Move the top-level rules into the nested container.
    ///
    /// The legacy field is left empty. Content fields fall back to their
    /// top-level counterparts, then to the uuid for the name.
    pub fn migrate(&mut self) -> ThemeRecord {
        let content = self.content.take().unwrap_or_default();
        let name = content
            .name
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| self.uuid.clone());

        ThemeRecord {
            schema_version: CURRENT_SCHEMA_VERSION,
            uuid: self.uuid.clone(),
            content: RecordContent {
                name,
                is_system_theme: content.is_system_theme,
                mobile_rules: self.mobile_rules.take().or(content.mobile_rules),
            },
        }
    }
}

/// A record read from storage, normalized to the current schema.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRecord {
    pub record: ThemeRecord,
    /// Set when legacy top-level rules were moved into the nested container.
    pub migrated: bool,
}

/// Parse a stored record, dispatching on its schema version.
pub fn decode(raw: &str) -> Result<DecodedRecord, ThemeError> {
    let value: Value = serde_json::from_str(raw).map_err(unreadable)?;

    let version = match value.get(SCHEMA_VERSION_FIELD) {
        None | Some(Value::Null) => LEGACY_SCHEMA_VERSION,
        Some(tag) => tag
            .as_u64()
            .ok_or_else(|| ThemeError::PersistedStateUnreadable {
                reason: format!("{SCHEMA_VERSION_FIELD} is not an unsigned integer: {tag}"),
            })?,
    };

    match version {
        LEGACY_SCHEMA_VERSION => {
            let mut legacy: LegacyThemeRecord =
                serde_json::from_value(value).map_err(unreadable)?;
            let migrated = legacy.needs_migration();
            Ok(DecodedRecord {
                record: legacy.migrate(),
                migrated,
            })
        }
        CURRENT_SCHEMA_VERSION => Ok(DecodedRecord {
            record: serde_json::from_value(value).map_err(unreadable)?,
            migrated: false,
        }),
        other => Err(ThemeError::UnsupportedSchema { version: other }),
    }
}

fn unreadable(error: serde_json::Error) -> ThemeError {
    ThemeError::PersistedStateUnreadable {
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_matches, assert_ok, assert_some};
    use serde_json::json;

    fn legacy_json() -> String {
        json!({
            "uuid": "3f1c",
            "content": { "name": "Midnight", "isSystemTheme": false },
            "mobileRules": {
                "name": "Midnight",
                "rules": { "uiText": { "color": "#eeeeee" } },
                "variables": { "stylekitForegroundColor": "#eeeeee" },
                "statusBar": "light-content"
            }
        })
        .to_string()
    }

    #[test]
    fn test_untagged_record_is_migrated() {
        let decoded = assert_ok!(decode(&legacy_json()));

        assert!(decoded.migrated);
        assert_eq!(decoded.record.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(decoded.record.content.name, "Midnight");
        let rules = assert_some!(decoded.record.content.mobile_rules.as_ref());
        assert_eq!(rules.variables["stylekitForegroundColor"].as_str(), Some("#eeeeee"));
    }

    #[test]
    fn test_migrate_clears_legacy_field() {
        let mut legacy: LegacyThemeRecord =
            serde_json::from_str(&legacy_json()).expect("legacy record parses");
        assert!(legacy.needs_migration());

        let record = legacy.migrate();

        assert!(legacy.mobile_rules.is_none());
        assert!(record.content.mobile_rules.is_some());
    }

    #[test]
    fn test_legacy_name_falls_back_to_top_level_field() {
        let raw = json!({ "uuid": "9a", "name": "Flat", "mobileRules": { "name": "Flat" } });
        let decoded = assert_ok!(decode(&raw.to_string()));
        assert_eq!(decoded.record.content.name, "Flat");
    }

    #[test]
    fn test_written_record_uses_current_schema() {
        let theme = Theme::custom("3f1c", "Midnight").with_rules(MobileRules {
            name: "Midnight".to_string(),
            rules: Default::default(),
            variables: Default::default(),
            status_bar: Default::default(),
        });

        let raw = assert_ok!(ThemeRecord::from_theme(&theme).to_json());
        let value: Value = serde_json::from_str(&raw).expect("record is json");

        assert_eq!(value["schemaVersion"], json!(CURRENT_SCHEMA_VERSION));
        assert!(value.get("mobileRules").is_none());
        assert_eq!(value["content"]["mobileRules"]["name"], json!("Midnight"));

        let decoded = assert_ok!(decode(&raw));
        assert!(!decoded.migrated);
        assert_eq!(decoded.record.into_theme(), theme);
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let raw = json!({ "schemaVersion": 7, "uuid": "x", "content": { "name": "x" } });
        assert_matches!(
            decode(&raw.to_string()),
            Err(ThemeError::UnsupportedSchema { version: 7 })
        );
    }

    #[test]
    fn test_malformed_json_is_unreadable() {
        assert_matches!(
            decode("{not json"),
            Err(ThemeError::PersistedStateUnreadable { .. })
        );
        assert_err!(decode(r#"{"schemaVersion":"two"}"#));
    }
}
