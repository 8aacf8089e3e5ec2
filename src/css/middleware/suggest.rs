use crate::css::compiler::NodeRef;
use crate::css::serializer::{Middleware, Serializer, Transform};

/// A declaration set that one of the shorthand at-rules produces.
struct Pattern {
    at_rule: &'static str,
    declarations: &'static [(&'static str, &'static str)],
}

/// Checked in order; the first match is reported.
const PATTERNS: &[Pattern] = &[
    Pattern {
        at_rule: "@honey-center",
        declarations: &[
            ("display", "flex"),
            ("align-items", "center"),
            ("justify-content", "center"),
        ],
    },
    Pattern {
        at_rule: "@honey-stack",
        declarations: &[("display", "flex"), ("flex-direction", "column")],
    },
    Pattern {
        at_rule: "@honey-inline",
        declarations: &[("display", "flex"), ("align-items", "center")],
    },
];

/// Logs a hint when a rule spells out what a shorthand at-rule would emit.
///
/// Never changes the output.
#[derive(Debug, Default, Clone, Copy)]
pub struct SuggestMiddleware;

impl SuggestMiddleware {
    /// The shorthand matching the rule's declarations, if any.
    pub fn suggestion(node: NodeRef<'_>) -> Option<&'static str> {
        if !node.is_rule() {
            return None;
        }
        let declarations: Vec<(&str, &str)> = node
            .children()
            .filter_map(|child| Some((child.property()?, child.declared_value()?)))
            .collect();

        PATTERNS
            .iter()
            .find(|pattern| {
                pattern
                    .declarations
                    .iter()
                    .all(|expected| declarations.contains(expected))
            })
            .map(|pattern| pattern.at_rule)
    }
}

impl Middleware for SuggestMiddleware {
    fn visit(&self, node: NodeRef<'_>, _ser: &Serializer<'_>) -> Transform {
        if let Some(at_rule) = Self::suggestion(node) {
            tracing::info!(
                "The CSS rule \"{}\" can be simplified using the shorthand at-rule \"{at_rule}\"",
                node.value()
            );
        }
        Transform::Keep
    }
}
