//! Tagged CSS templates.

use super::interpolation::{Interpolation, StyleContext, resolve_interpolation};

/// Literal segments interleaved with interpolations.
///
/// Evaluation is pure: the same context always yields the same CSS.
#[derive(Debug, Clone, Default)]
pub struct CssTemplate {
    segments: Vec<String>,
    interpolations: Vec<Interpolation>,
}

/// Build a template from literal segments and the values between them.
///
/// There is normally one more segment than interpolations; extra values on
/// either side are still emitted in order.
pub fn css<S: AsRef<str>>(segments: &[S], interpolations: Vec<Interpolation>) -> CssTemplate {
    CssTemplate {
        segments: segments.iter().map(|s| s.as_ref().to_string()).collect(),
        interpolations,
    }
}

impl CssTemplate {
    /// A template without interpolations.
    pub fn raw(css: &str) -> Self {
        Self {
            segments: vec![css.to_string()],
            interpolations: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(String::is_empty) && self.interpolations.is_empty()
    }

    /// Resolve against a render context.
    pub fn evaluate(&self, ctx: &StyleContext<'_>) -> String {
        let mut out = String::new();
        let count = self.segments.len().max(self.interpolations.len());

        for i in 0..count {
            if let Some(segment) = self.segments.get(i) {
                out.push_str(segment);
            }
            if let Some(value) = self.interpolations.get(i) {
                out.push_str(&resolve_interpolation(value, ctx));
            }
        }
        out
    }
}

impl From<CssTemplate> for Interpolation {
    fn from(template: CssTemplate) -> Self {
        Interpolation::func(move |ctx| Interpolation::Str(template.evaluate(ctx)))
    }
}

impl From<&str> for CssTemplate {
    fn from(css: &str) -> Self {
        Self::raw(css)
    }
}
