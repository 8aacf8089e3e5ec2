use crate::css::serializer::Middleware;
use crate::theme::Theme;

use super::{AtRuleExpansion, AtRuleMiddleware, gap_declaration};

/// `@honey-inline[(gap)]`: horizontal flex layout, vertically centered.
pub fn inline(theme: Option<&Theme>) -> impl Middleware + '_ {
    AtRuleMiddleware::new("inline", move |args, _, _| {
        Some(AtRuleExpansion::Declarations(format!(
            "display:flex;align-items:center;{}",
            gap_declaration(args.first(), theme)
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::serializer::Serializer;

    #[test]
    fn test_inline() {
        let theme = Theme::new(4.0);
        let ser = Serializer::new().with(inline(Some(&theme)));
        assert_eq!(
            ser.process(".a{@honey-inline;}"),
            ".a{display:flex;align-items:center;}"
        );
        assert_eq!(
            ser.process(".a{@honey-inline(2 center);}"),
            ".a{display:flex;align-items:center;gap:8px;}"
        );
        assert_eq!(
            ser.process(".a{@honey-inline(1.5rem);}"),
            ".a{display:flex;align-items:center;gap:1.5rem;}"
        );
    }
}
