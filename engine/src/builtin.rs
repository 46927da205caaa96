use crate::color::{self, Color};
use crate::config::Platform;
use crate::rules::default_rules;
use crate::theme::{MobileRules, Theme};
use crate::variables::{VariableSet, VariableValue};

pub const RED_THEME_NAME: &str = "Red";
pub const BLUE_THEME_NAME: &str = "Blue";

const RED_INFO: Color = Color::Hex(0xfb, 0x02, 0x06);
const BLUE_INFO: Color = Color::Hex(0x08, 0x6d, 0xd6);
const BORDER: Color = Color::Hex(0xef, 0xef, 0xef);

// Variables shared by both palettes; the info accent is what sets them apart.
const BASE_VARIABLES: &[(&str, &str)] = &[
    ("stylekitInfoContrastColor", "#ffffff"),
    ("stylekitNeutralColor", "#989898"),
    ("stylekitNeutralContrastColor", "#ffffff"),
    ("stylekitSuccessColor", "#2b9612"),
    ("stylekitSuccessContrastColor", "#ffffff"),
    ("stylekitWarningColor", "#f6a200"),
    ("stylekitWarningContrastColor", "#ffffff"),
    ("stylekitDangerColor", "#f80324"),
    ("stylekitDangerContrastColor", "#ffffff"),
    ("stylekitForegroundColor", "#000000"),
    ("stylekitBackgroundColor", "#ffffff"),
    ("stylekitContrastForegroundColor", "#313131"),
    ("stylekitContrastBackgroundColor", "#f6f6f6"),
];

fn palette(info: Color) -> VariableSet {
    let mut variables: VariableSet = BASE_VARIABLES
        .iter()
        .map(|(name, value)| (name.to_string(), VariableValue::from(*value)))
        .collect();

    variables.insert("stylekitInfoColor".to_string(), info.to_string().into());
    variables.insert("stylekitBorderColor".to_string(), BORDER.to_string().into());
    variables.insert(
        "stylekitContrastBorderColor".to_string(),
        color::darken_by(BORDER, 0.05).to_string().into(),
    );
    variables.insert(
        "stylekitInfoBackgroundColor".to_string(),
        color::lighten_by(info, 0.9).to_string().into(),
    );
    variables
}

/// Variables of the "Red" theme; also the canonical template.
pub fn red_variables() -> VariableSet {
    palette(RED_INFO)
}

pub fn blue_variables() -> VariableSet {
    palette(BLUE_INFO)
}

/// The system themes in registry order; the first one is the default.
pub fn system_themes(platform: Platform) -> Vec<Theme> {
    [
        (RED_THEME_NAME, red_variables()),
        (BLUE_THEME_NAME, blue_variables()),
    ]
    .into_iter()
    .map(|(name, variables)| {
        Theme::system(
            name,
            MobileRules {
                name: name.to_string(),
                rules: default_rules(&variables, platform),
                variables,
                status_bar: platform.status_bar_style(),
            },
        )
    })
    .collect()
}
