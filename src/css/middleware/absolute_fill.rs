use crate::css::serializer::Middleware;

use super::{AtRuleExpansion, AtRuleMiddleware};

/// `@honey-absolute-fill`: stretch over the positioned ancestor.
pub fn absolute_fill() -> impl Middleware {
    AtRuleMiddleware::new("absolute-fill", |_, _, _| {
        Some(AtRuleExpansion::Declarations("position:absolute;inset:0;".to_string()))
    })
}
