use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Style variables of a theme, keyed by variable name.
pub type VariableSet = BTreeMap<String, VariableValue>;

/// A single style variable: a color literal or a scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Number(f64),
    Text(String),
}

impl VariableValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            VariableValue::Text(text) => Some(text),
            VariableValue::Number(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            VariableValue::Number(value) => Some(*value),
            VariableValue::Text(_) => None,
        }
    }
}

impl From<&str> for VariableValue {
    fn from(value: &str) -> Self {
        VariableValue::Text(value.to_string())
    }
}

impl From<String> for VariableValue {
    fn from(value: String) -> Self {
        VariableValue::Text(value)
    }
}

impl From<f64> for VariableValue {
    fn from(value: f64) -> Self {
        VariableValue::Number(value)
    }
}

impl From<&VariableValue> for serde_json::Value {
    fn from(value: &VariableValue) -> Self {
        match value {
            VariableValue::Number(number) => serde_json::json!(number),
            VariableValue::Text(text) => serde_json::Value::String(text.clone()),
        }
    }
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableValue::Number(value) => write!(f, "{value}"),
            VariableValue::Text(text) => f.write_str(text),
        }
    }
}

/// The canonical, complete set of style variables shipped with the application.
///
/// Themes downloaded from elsewhere cannot be relied on to define every
/// variable the UI references, so every activation merges the template into
/// the theme's variables. The template only fills keys that are absent;
/// values the theme already defines always win.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableTemplate {
    variables: VariableSet,
}

impl VariableTemplate {
    pub fn new(variables: VariableSet) -> Self {
        Self { variables }
    }

    /// Template built from the first system theme's variables.
    pub fn builtin() -> Self {
        Self::new(crate::builtin::red_variables())
    }

    pub fn variables(&self) -> &VariableSet {
        &self.variables
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Fill the absent keys of `variables` from the template.
    ///
    /// Returns the number of keys that were filled.
    pub fn merge_into(&self, variables: &mut VariableSet) -> usize {
        let mut filled = 0;
        for (name, value) in &self.variables {
            if !variables.contains_key(name) {
                variables.insert(name.clone(), value.clone());
                filled += 1;
            }
        }
        filled
    }

    /// Non-mutating form of [`merge_into`](Self::merge_into).
    pub fn merged(&self, variables: &VariableSet) -> VariableSet {
        let mut result = variables.clone();
        self.merge_into(&mut result);
        result
    }
}

impl Default for VariableTemplate {
    fn default() -> Self {
        Self::builtin()
    }
}
