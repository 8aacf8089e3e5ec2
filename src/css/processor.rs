//! The CSS processor: compile, run the middleware chain, serialize.

use std::borrow::Cow;

use super::middleware::{
    SpacingMiddleware, SuggestMiddleware, absolute_fill, center, ellipsis, inline, media, stack,
};
use super::serializer::Serializer;
use crate::config::StyleConfig;
use crate::theme::Theme;

/// Inputs for [`process_css`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOptions<'a> {
    /// Supplies the spacing base and breakpoints.
    pub theme: Option<&'a Theme>,
    pub config: StyleConfig,
}

impl<'a> ProcessOptions<'a> {
    pub fn new(theme: Option<&'a Theme>) -> Self {
        Self {
            theme,
            config: StyleConfig::default(),
        }
    }

    pub fn with_config(mut self, config: StyleConfig) -> Self {
        self.config = config;
        self
    }
}

/// The serializer with the standard middleware chain.
///
/// Order: (suggestions), media, spacing, stack, inline, center, ellipsis,
/// absolute-fill, then the built-in stringifier.
pub fn serializer<'a>(options: &ProcessOptions<'a>) -> Serializer<'a> {
    let mut ser = Serializer::new();
    if options.config.suggest_shorthands {
        ser.push(SuggestMiddleware);
    }
    ser.with(media(options.theme, options.config))
        .with(SpacingMiddleware::new(options.theme))
        .with(stack(options.theme))
        .with(inline(options.theme))
        .with(center())
        .with(ellipsis())
        .with(absolute_fill())
}

/// Process raw CSS, optionally scoped under `selector`.
pub fn process_css(raw: &str, selector: Option<&str>, options: &ProcessOptions<'_>) -> String {
    let css = match selector {
        Some(selector) => Cow::Owned(format!("{selector}{{{raw}}}")),
        None => Cow::Borrowed(raw),
    };
    let processed = serializer(options).process(&css);
    tracing::trace!(selector, len = processed.len(), "processed css");
    processed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process(raw: &str) -> String {
        let theme = Theme::new(8.0).with_breakpoint("sm", 768);
        process_css(raw, Some(".x"), &ProcessOptions::new(Some(&theme)))
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(process(""), "");
        assert_eq!(process_css("", None, &ProcessOptions::default()), "");
    }

    #[test]
    fn test_scopes_under_selector() {
        assert_eq!(
            process("color: red; &:hover { color: blue; }"),
            ".x{color:red;}.x:hover{color:blue;}"
        );
    }

    #[test]
    fn test_media_declarations_are_scaled() {
        assert_eq!(
            process("@honey-media(sm) { padding: 2; }"),
            "@media screen and (min-width: 768px){.x{padding:16px;}}"
        );
    }

    #[test]
    fn test_nested_shorthands() {
        assert_eq!(
            process("@honey-stack { gap: 1; align-items: center; .nested { @honey-stack(0.5) { padding: 1; } } }"),
            ".x{display:flex;flex-direction:column;gap:8px;align-items:center;}\
             .x .nested{display:flex;flex-direction:column;gap:4px;padding:8px;}"
        );
    }

    #[test]
    fn test_shorthand_inside_media() {
        assert_eq!(
            process("@media print { @honey-center(block); }"),
            "@media print{.x{display:block;text-align:center;}}"
        );
    }
}
