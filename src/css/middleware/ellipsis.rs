use crate::css::serializer::Middleware;

use super::{AtRuleExpansion, AtRuleMiddleware};

/// `@honey-ellipsis`: single-line text truncation.
pub fn ellipsis() -> impl Middleware {
    AtRuleMiddleware::new("ellipsis", |_, _, _| {
        Some(AtRuleExpansion::Declarations(
            "white-space:nowrap;overflow:hidden;text-overflow:ellipsis;".to_string(),
        ))
    })
}
