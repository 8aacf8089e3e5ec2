//! `@honey-media(<tokens>)`: responsive blocks keyed by theme breakpoints.
//!
//! Tokens are breakpoints (`sm`, `sm:up`, `md:down`), an orientation
//! (`portrait`, `landscape`) or a media type (`all`, `print`, `screen`,
//! `speech`). Each breakpoint produces one media rule; orientation and media
//! type apply to all of them.

use crate::config::StyleConfig;
use crate::css::compiler::NodeRef;
use crate::css::media::{MediaRule, MediaType, Orientation, media_query};
use crate::css::serializer::{Middleware, Serializer};
use crate::theme::Theme;

use super::{AtRuleExpansion, AtRuleMiddleware};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

/// Parse `name[:up|:down]`; `None` when the token is not breakpoint syntax.
fn parse_breakpoint(token: &str) -> Option<(&str, Direction)> {
    let (name, direction) = match token.split_once(':') {
        Some((name, "up")) => (name, Direction::Up),
        Some((name, "down")) => (name, Direction::Down),
        Some(_) => return None,
        None => (token, Direction::Up),
    };

    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    Some((name, direction))
}

/// Media rules for the given tokens. Unknown tokens are skipped.
fn build_rules(args: &[String], theme: &Theme, config: StyleConfig) -> Vec<MediaRule> {
    let mut rules = Vec::new();
    let mut orientation = None;
    let mut media_type = None;

    for token in args {
        if let Some(o) = Orientation::parse(token) {
            orientation = Some(o);
            continue;
        }
        if let Some(t) = MediaType::parse(token) {
            media_type = Some(t);
            continue;
        }

        let Some((name, direction)) = parse_breakpoint(token) else {
            if config.dev {
                tracing::warn!("Unknown @honey-media token: \"{token}\"");
            }
            continue;
        };

        let Some(px) = theme.breakpoint(name).filter(|&px| px > 0) else {
            if config.dev {
                tracing::warn!("Unknown breakpoint \"{name}\" in @honey-media");
            }
            continue;
        };

        let rule = match direction {
            Direction::Up => MediaRule::new().min_width(format!("{px}px")),
            Direction::Down => MediaRule::new().max_width(format!("{px}px")),
        };
        rules.push(rule);
    }

    for rule in &mut rules {
        rule.orientation = orientation;
        rule.media_type = media_type;
    }
    rules
}

fn expand(
    args: &[String],
    node: NodeRef<'_>,
    ser: &Serializer<'_>,
    theme: Option<&Theme>,
    config: StyleConfig,
) -> Option<AtRuleExpansion> {
    let parent = node.parent()?;
    let theme = theme?;
    if args.is_empty() || !node.has_children() {
        return None;
    }

    let rules = build_rules(args, theme, config);
    if rules.is_empty() {
        return None;
    }

    let (declarations, other): (Vec<_>, Vec<_>) =
        node.children().partition(|child| child.is_declaration());

    let selector = parent.value();
    let mut body = String::new();
    if !other.is_empty() {
        body.push_str(&format!("{selector}{{{}}}", ser.serialize_nodes(other)));
    }
    if !declarations.is_empty() {
        body.push_str(&format!("{selector}{{{}}}", ser.serialize_nodes(declarations)));
    }

    Some(AtRuleExpansion::Css(format!("{}{{{body}}}", media_query(&rules))))
}

/// `@honey-media` middleware; needs theme breakpoints to do anything.
pub fn media(theme: Option<&Theme>, config: StyleConfig) -> impl Middleware + '_ {
    AtRuleMiddleware::new("media", move |args, node, ser| {
        expand(args, node, ser, theme, config)
    })
}
