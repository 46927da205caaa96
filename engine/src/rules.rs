//! Style rule catalog.
//!
//! Built-in themes derive their named style objects from their variables with
//! [`default_rules`]. Color properties reference template variables, and a
//! few rules have platform-specific variants stored under the base key with
//! the platform suffix appended (`noteTextIOS`, `sectionHeaderAndroid`).

use crate::config::Platform;
use crate::variables::VariableSet;
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// Style properties of one named rule.
pub type StyleObject = serde_json::Map<String, Value>;

/// Named style rules of a theme.
pub type StyleRules = BTreeMap<String, StyleObject>;

const MAIN_TEXT_FONT_SIZE: i64 = 16;
const PADDING_LEFT: i64 = 14;

pub fn default_rules(variables: &VariableSet, platform: Platform) -> StyleRules {
    let var = |name: &str| variables.get(name).map(Value::from).unwrap_or(Value::Null);
    let android = platform == Platform::Android;

    let foreground = var("stylekitForegroundColor");
    let background = var("stylekitBackgroundColor");
    let neutral = var("stylekitNeutralColor");
    let info = var("stylekitInfoColor");
    let border = var("stylekitBorderColor");
    let header_weight = if android { "bold" } else { "normal" };
    let button_color = if android { &foreground } else { &info };

    let catalog = [
        ("container", json!({ "height": "100%" })),
        (
            "flexContainer",
            json!({ "flex": 1, "flexDirection": "column" }),
        ),
        (
            "centeredContainer",
            json!({
                "flex": 1,
                "flexDirection": "column",
                "justifyContent": "center",
                "alignItems": "center"
            }),
        ),
        (
            "uiText",
            json!({ "color": foreground, "fontSize": MAIN_TEXT_FONT_SIZE }),
        ),
        (
            "tableSection",
            json!({ "marginTop": 10, "marginBottom": 10, "backgroundColor": background }),
        ),
        (
            "sectionHeaderContainer",
            json!({
                "flex": 1,
                "flexGrow": 0,
                "justifyContent": "space-between",
                "flexDirection": "row",
                "paddingRight": PADDING_LEFT,
                "paddingBottom": 10,
                "paddingTop": 10,
                "backgroundColor": "rgba(52,52,52,0)"
            }),
        ),
        (
            "sectionHeader",
            json!({
                "backgroundColor": "transparent",
                "fontSize": MAIN_TEXT_FONT_SIZE - 4,
                "paddingLeft": PADDING_LEFT,
                "color": neutral,
                "fontWeight": header_weight
            }),
        ),
        (
            "sectionHeaderAndroid",
            json!({ "fontSize": MAIN_TEXT_FONT_SIZE - 2, "color": info }),
        ),
        (
            "sectionedTableCell",
            json!({
                "borderBottomColor": border,
                "borderBottomWidth": 1,
                "paddingLeft": PADDING_LEFT,
                "paddingRight": PADDING_LEFT,
                "paddingTop": 13,
                "paddingBottom": 12,
                "backgroundColor": background,
                "flex": 1
            }),
        ),
        (
            "sectionedTableCellFirst",
            json!({ "borderTopColor": border, "borderTopWidth": 1 }),
        ),
        (
            "buttonCellButton",
            json!({
                "textAlign": "center",
                "textAlignVertical": "center",
                "color": button_color,
                "fontSize": MAIN_TEXT_FONT_SIZE
            }),
        ),
        (
            "noteText",
            json!({
                "flexGrow": 1,
                "marginTop": 0,
                "paddingTop": 10,
                "color": foreground,
                "paddingLeft": PADDING_LEFT,
                "paddingRight": PADDING_LEFT,
                "paddingBottom": 10,
                "backgroundColor": background
            }),
        ),
        (
            "noteTextIOS",
            json!({ "paddingLeft": PADDING_LEFT - 5, "paddingRight": PADDING_LEFT - 5 }),
        ),
        ("actionSheetBody", json!({ "backgroundColor": border })),
        (
            "actionSheetTitleText",
            json!({ "color": foreground, "opacity": 0.5 }),
        ),
        (
            "actionSheetCancelButtonTitle",
            json!({ "color": info, "fontWeight": "normal" }),
        ),
        ("bold", json!({ "fontWeight": "bold" })),
    ];

    catalog
        .into_iter()
        .map(|(name, value)| (name.to_string(), style_object(value)))
        .collect()
}

/// The rule for `key` followed by its platform variant, when one exists.
pub fn styles_for_key<'a>(
    rules: &'a StyleRules,
    key: &str,
    platform: Platform,
) -> Vec<&'a StyleObject> {
    let platform_key = format!("{key}{}", platform.rule_suffix());
    [rules.get(key), rules.get(&platform_key)]
        .into_iter()
        .flatten()
        .collect()
}

fn style_object(value: Value) -> StyleObject {
    match value {
        Value::Object(map) => map,
        _ => StyleObject::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::red_variables;

    #[test]
    fn test_rules_reference_variables() {
        let variables = red_variables();
        let rules = default_rules(&variables, Platform::Ios);

        assert_eq!(
            rules["uiText"]["color"],
            Value::from(&variables["stylekitForegroundColor"])
        );
        assert_eq!(rules["uiText"]["fontSize"], json!(16));
        assert_eq!(rules["buttonCellButton"]["color"], json!("#fb0206"));
    }

    #[test]
    fn test_platform_changes_rule_values() {
        let variables = red_variables();
        let android = default_rules(&variables, Platform::Android);

        assert_eq!(android["sectionHeader"]["fontWeight"], json!("bold"));
        assert_eq!(
            android["buttonCellButton"]["color"],
            Value::from(&variables["stylekitForegroundColor"])
        );
    }

    #[test]
    fn test_styles_for_key_appends_platform_variant() {
        let rules = default_rules(&red_variables(), Platform::Ios);

        assert_eq!(styles_for_key(&rules, "noteText", Platform::Ios).len(), 2);
        assert_eq!(styles_for_key(&rules, "noteText", Platform::Android).len(), 1);
        assert_eq!(
            styles_for_key(&rules, "sectionHeader", Platform::Android).len(),
            2
        );
        assert!(styles_for_key(&rules, "missing", Platform::Ios).is_empty());
    }
}
