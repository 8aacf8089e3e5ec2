//! Middlewares run by the CSS processor.
//!
//! Layout shorthands (`@honey-stack`, `@honey-inline`, `@honey-center`,
//! `@honey-ellipsis`, `@honey-absolute-fill`) and `@honey-media` are built
//! with [`AtRuleMiddleware`]; spacing and suggestions are plain visitors.

mod absolute_fill;
mod at_rule;
mod center;
mod ellipsis;
mod inline;
mod media;
mod spacing;
mod stack;
mod suggest;

pub use absolute_fill::absolute_fill;
pub use at_rule::{AtRuleExpansion, AtRuleMiddleware, parse_args};
pub use center::center;
pub use ellipsis::ellipsis;
pub use inline::inline;
pub use media::media;
pub use spacing::{SPACING_PROPERTIES, SpacingMiddleware};
pub use stack::stack;
pub use suggest::SuggestMiddleware;

use crate::theme::Theme;
use crate::util::scale_to_px;

/// Spacing multiplier of the active theme; `0` without a theme.
pub(crate) fn spacing_base(theme: Option<&Theme>) -> f64 {
    theme.map_or(0.0, |theme| theme.spacings.base)
}

/// `gap:<value>;` for an optional shorthand argument.
///
/// A bare number is scaled by the spacing base and gets `px`; anything else
/// is used verbatim.
pub(crate) fn gap_declaration(arg: Option<&String>, theme: Option<&Theme>) -> String {
    match arg {
        Some(arg) => {
            let value = scale_to_px(arg, spacing_base(theme)).unwrap_or_else(|| arg.clone());
            format!("gap:{value};")
        }
        None => String::new(),
    }
}
