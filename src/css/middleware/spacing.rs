use crate::css::compiler::NodeRef;
use crate::css::serializer::{Middleware, Serializer, Transform};
use crate::theme::Theme;
use crate::util::scale_to_px;

use super::spacing_base;

/// Properties whose bare numeric values are spacing multipliers.
pub const SPACING_PROPERTIES: &[&str] = &[
    "margin",
    "margin-top",
    "margin-right",
    "margin-bottom",
    "margin-left",
    "padding",
    "padding-top",
    "padding-right",
    "padding-bottom",
    "padding-left",
    "padding-block",
    "padding-block-start",
    "padding-block-end",
    "top",
    "right",
    "bottom",
    "left",
    "inset",
    "gap",
    "row-gap",
    "column-gap",
];

/// Scales bare numbers in spacing declarations by the theme spacing base.
///
/// `margin: 1.5 1` becomes `margin:12px 8px;` with a base of 8. Values with
/// parentheses (`calc()`, `var()`) are left alone, as are tokens carrying a
/// unit.
pub struct SpacingMiddleware<'a> {
    theme: Option<&'a Theme>,
}

impl<'a> SpacingMiddleware<'a> {
    pub fn new(theme: Option<&'a Theme>) -> Self {
        Self { theme }
    }
}

impl Middleware for SpacingMiddleware<'_> {
    fn visit(&self, node: NodeRef<'_>, _ser: &Serializer<'_>) -> Transform {
        let (Some(property), Some(value)) = (node.property(), node.declared_value()) else {
            return Transform::Keep;
        };
        if !SPACING_PROPERTIES.contains(&property) || value.contains(['(', ')']) {
            return Transform::Keep;
        }

        let base = spacing_base(self.theme);
        let scaled: Vec<String> = value
            .split_whitespace()
            .map(|token| scale_to_px(token, base).unwrap_or_else(|| token.to_string()))
            .collect();

        Transform::Replace(format!("{property}:{};", scaled.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn process(css: &str, base: f64) -> String {
        let theme = Theme::new(base);
        Serializer::new()
            .with(SpacingMiddleware::new(Some(&theme)))
            .process(css)
    }

    #[test]
    fn test_shorthand_values() {
        assert_eq!(process(".a{margin: 1.5 1}", 8.0), ".a{margin:12px 8px;}");
        assert_eq!(process(".a{padding:2 auto -1}", 8.0), ".a{padding:16px auto -8px;}");
    }

    #[test]
    fn test_expressions_untouched() {
        assert_eq!(
            process(".a{margin:calc(1px + 2px)}", 8.0),
            ".a{margin:calc(1px + 2px);}"
        );
        assert_eq!(process(".a{gap:var(--gap)}", 8.0), ".a{gap:var(--gap);}");
    }

    #[test]
    fn test_other_properties_untouched() {
        assert_eq!(process(".a{z-index:2;line-height:1.5}", 8.0), ".a{z-index:2;line-height:1.5;}");
    }

    #[test]
    fn test_without_theme() {
        let ser = Serializer::new().with(SpacingMiddleware::new(None));
        assert_eq!(ser.process(".a{top:3}"), ".a{top:0px;}");
    }

    proptest! {
        #[test]
        fn prop_plain_numbers_scale(n in -100i32..100, base in 1u8..16) {
            let css = process(&format!(".a{{margin:{n}}}"), f64::from(base));
            prop_assert_eq!(css, format!(".a{{margin:{}px;}}", n * i32::from(base)));
        }

        #[test]
        fn prop_unit_values_pass_through(n in 0u16..500, unit in "(px|em|rem|%)") {
            let css = process(&format!(".a{{padding:{n}{unit}}}"), 8.0);
            prop_assert_eq!(css, format!(".a{{padding:{n}{unit};}}"));
        }
    }
}
