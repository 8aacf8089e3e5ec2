//! Factory for `@honey-<name>` at-rule middlewares.

use crate::css::compiler::{HONEY_AT_RULE_PREFIX, NodeRef};
use crate::css::serializer::{Middleware, Serializer, Transform};

/// What an at-rule expands to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtRuleExpansion {
    /// Declarations applied to the enclosing rule; the at-rule's own body
    /// is appended after them.
    Declarations(String),
    /// Complete CSS emitted in place of the at-rule.
    Css(String),
}

/// Middleware expanding one custom at-rule.
///
/// Matches at-rules named `honey-<name>` whose parent is a rule with a
/// selector. The transform receives the parsed arguments, the at-rule node
/// and the serializer; returning `None` (or empty text) suppresses the
/// at-rule entirely.
pub struct AtRuleMiddleware<F> {
    at_rule: String,
    transform: F,
}

impl<F> AtRuleMiddleware<F>
where
    F: Fn(&[String], NodeRef<'_>, &Serializer<'_>) -> Option<AtRuleExpansion>,
{
    pub fn new(name: &str, transform: F) -> Self {
        Self {
            at_rule: format!("{HONEY_AT_RULE_PREFIX}{name}"),
            transform,
        }
    }
}

impl<F> Middleware for AtRuleMiddleware<F>
where
    F: Fn(&[String], NodeRef<'_>, &Serializer<'_>) -> Option<AtRuleExpansion>,
{
    fn visit(&self, node: NodeRef<'_>, ser: &Serializer<'_>) -> Transform {
        if node.at_rule_name() != Some(self.at_rule.as_str()) {
            return Transform::Keep;
        }
        let Some(parent) = node.parent().filter(|p| p.is_rule() && !p.value().is_empty()) else {
            return Transform::Keep;
        };

        let args = parse_args(node.prelude().unwrap_or(""));

        match (self.transform)(&args, node, ser) {
            Some(AtRuleExpansion::Declarations(declarations)) if !declarations.is_empty() => {
                let children = ser.serialize_children(node);
                Transform::Replace(ser.process(&format!(
                    "{}{{{declarations}{children}}}",
                    parent.value()
                )))
            }
            Some(AtRuleExpansion::Css(css)) if !css.is_empty() => Transform::Replace(ser.process(&css)),
            _ => Transform::Suppress,
        }
    }
}

/// Parse `(a b c)` into `["a", "b", "c"]`.
///
/// Anything that is not a single non-empty parenthesized group, optionally
/// followed by `;`, yields no arguments.
pub fn parse_args(prelude: &str) -> Vec<String> {
    let trimmed = prelude.trim();
    let trimmed = trimmed.strip_suffix(';').unwrap_or(trimmed).trim_end();

    let Some(inner) = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    else {
        return Vec::new();
    };

    if inner.contains(')') {
        return Vec::new();
    }

    inner.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args("(2)"), vec!["2"]);
        assert_eq!(parse_args(" ( 2  center ) "), vec!["2", "center"]);
        assert_eq!(parse_args("(sm:down portrait);"), vec!["sm:down", "portrait"]);
    }

    #[test]
    fn test_parse_args_malformed() {
        assert!(parse_args("").is_empty());
        assert!(parse_args("()").is_empty());
        assert!(parse_args("2").is_empty());
        assert!(parse_args("(a) (b)").is_empty());
        assert!(parse_args("(a").is_empty());
    }

    fn decorate() -> impl Middleware {
        AtRuleMiddleware::new("decorate", |args, _, _| match args.first().map(String::as_str) {
            Some("none") => None,
            Some("raw") => Some(AtRuleExpansion::Css(".raw{top:0}".to_string())),
            _ => Some(AtRuleExpansion::Declarations("outline:none;".to_string())),
        })
    }

    #[test]
    fn test_expands_into_parent_rule() {
        let ser = Serializer::new().with(decorate());
        assert_eq!(
            ser.process(".a{color:red;@honey-decorate{&:hover{top:0}}}"),
            ".a{color:red;}.a{outline:none;}.a:hover{top:0;}"
        );
    }

    #[test]
    fn test_css_expansion_and_suppression() {
        let ser = Serializer::new().with(decorate());
        assert_eq!(ser.process(".a{@honey-decorate(raw);}"), ".raw{top:0;}");
        assert_eq!(ser.process(".a{@honey-decorate(none);}"), "");
    }

    #[test]
    fn test_ignored_without_parent_rule() {
        let ser = Serializer::new().with(decorate());
        assert_eq!(ser.process("@honey-decorate;"), "");
        assert_eq!(ser.process(".a{@honey-other;}"), "");
    }
}
