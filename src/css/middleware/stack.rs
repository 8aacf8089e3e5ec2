use crate::css::serializer::Middleware;
use crate::theme::Theme;

use super::{AtRuleExpansion, AtRuleMiddleware, gap_declaration};

/// `@honey-stack[(gap)]`: vertical flex layout.
pub fn stack(theme: Option<&Theme>) -> impl Middleware + '_ {
    AtRuleMiddleware::new("stack", move |args, _, _| {
        Some(AtRuleExpansion::Declarations(format!(
            "display:flex;flex-direction:column;{}",
            gap_declaration(args.first(), theme)
        )))
    })
}
