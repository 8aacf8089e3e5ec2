use crate::css::serializer::Middleware;

use super::{AtRuleExpansion, AtRuleMiddleware};

/// Declarations for a `@honey-center` mode.
pub(crate) fn center_declarations(mode: Option<&str>) -> &'static str {
    match mode {
        Some("horizontal" | "x") => "display:flex;justify-content:center;",
        Some("vertical" | "y") => "display:flex;align-items:center;",
        Some("block") => "display:block;text-align:center;",
        Some("inline") => "display:inline-flex;align-items:center;justify-content:center;",
        _ => "display:flex;align-items:center;justify-content:center;",
    }
}

/// `@honey-center[(horizontal|x|vertical|y|block|inline)]`.
pub fn center() -> impl Middleware {
    AtRuleMiddleware::new("center", |args, _, _| {
        let mode = args.first().map(String::as_str);
        Some(AtRuleExpansion::Declarations(center_declarations(mode).to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::serializer::Serializer;

    fn process(css: &str) -> String {
        Serializer::new().with(center()).process(css)
    }

    #[test]
    fn test_default_centers_both_axes() {
        assert_eq!(
            process(".a{@honey-center;}"),
            ".a{display:flex;align-items:center;justify-content:center;}"
        );
    }

    #[test]
    fn test_modes() {
        assert_eq!(
            process(".a{@honey-center(x);}"),
            ".a{display:flex;justify-content:center;}"
        );
        assert_eq!(
            process(".a{@honey-center(vertical);}"),
            ".a{display:flex;align-items:center;}"
        );
        assert_eq!(
            process(".a{@honey-center(block);}"),
            ".a{display:block;text-align:center;}"
        );
        assert_eq!(
            process(".a{@honey-center(inline);}"),
            ".a{display:inline-flex;align-items:center;justify-content:center;}"
        );
    }

    #[test]
    fn test_unknown_mode_falls_back() {
        assert_eq!(
            process(".a{@honey-center(diagonal);}"),
            ".a{display:flex;align-items:center;justify-content:center;}"
        );
    }
}
