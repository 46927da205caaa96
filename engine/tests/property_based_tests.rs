use engine::color::{self, Color};
use engine::{VariableSet, VariableTemplate, VariableValue};
use proptest::prelude::*;

fn variable_set() -> impl Strategy<Value = VariableSet> {
    prop::collection::btree_map(
        "[a-z]{1,8}",
        prop_oneof![
            "#[0-9a-f]{6}".prop_map(VariableValue::from),
            (0.0f64..100.0).prop_map(VariableValue::from),
        ],
        0..12,
    )
}

fn hex_color() -> impl Strategy<Value = Color> {
    any::<(u8, u8, u8)>().prop_map(|(r, g, b)| Color::Hex(r, g, b))
}

#[cfg(test)]
mod template_merge_properties {
    use super::*;

    proptest! {
        #[test]
        fn test_merge_is_union_with_own_values_winning(
            template in variable_set(),
            own in variable_set()
        ) {
            let template = VariableTemplate::new(template);
            let merged = template.merged(&own);

            // Property: every key of either side is present
            for key in template.keys().chain(own.keys().map(String::as_str)) {
                prop_assert!(merged.contains_key(key));
            }
            prop_assert!(merged.len() <= template.len() + own.len());

            // Property: own values are never overwritten
            for (key, value) in &own {
                prop_assert_eq!(&merged[key], value);
            }

            // Property: template fills only what was absent
            for (key, value) in template.variables() {
                if !own.contains_key(key) {
                    prop_assert_eq!(&merged[key], value);
                }
            }
        }

        #[test]
        fn test_merge_is_idempotent(template in variable_set(), own in variable_set()) {
            let template = VariableTemplate::new(template);
            let mut once = own.clone();
            template.merge_into(&mut once);
            let mut twice = once.clone();

            prop_assert_eq!(template.merge_into(&mut twice), 0);
            prop_assert_eq!(once, twice);
        }
    }
}

#[cfg(test)]
mod color_properties {
    use super::*;

    proptest! {
        #[test]
        fn test_blend_stays_between_endpoints(
            base in hex_color(),
            target in hex_color(),
            fraction in 0.0f64..=1.0
        ) {
            let (br, bg, bb) = base.channels();
            let (tr, tg, tb) = target.channels();
            let (r, g, b) = color::blend(fraction, base, Some(target)).channels();

            for (value, from, to) in [(r, br, tr), (g, bg, tg), (b, bb, tb)] {
                prop_assert!(value >= from.min(to) && value <= from.max(to));
            }
        }

        #[test]
        fn test_blend_endpoints(base in hex_color(), target in hex_color()) {
            prop_assert_eq!(color::blend(0.0, base, Some(target)), base);
            prop_assert_eq!(color::blend(1.0, base, Some(target)).channels(), target.channels());
        }

        #[test]
        fn test_darken_and_lighten_move_toward_extremes(color in hex_color()) {
            let (r, g, b) = color.channels();
            let (dr, dg, db) = color::darken(color).channels();
            let (lr, lg, lb) = color::lighten(color).channels();

            prop_assert!(dr <= r && dg <= g && db <= b);
            prop_assert!(lr >= r && lg >= g && lb >= b);
        }

        #[test]
        fn test_display_parses_back(color in hex_color()) {
            let parsed: Color = color.to_string().parse().expect("display output parses");
            prop_assert_eq!(parsed, color);
        }
    }
}
