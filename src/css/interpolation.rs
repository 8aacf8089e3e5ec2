//! Interpolation values and their resolution to CSS text.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::styled::ComponentId;
use crate::theme::Theme;
use crate::util::{format_number, to_kebab_case};

/// A style function evaluated against the render context.
pub type StyleFn = Rc<dyn Fn(&StyleContext<'_>) -> Interpolation>;

/// A value that can appear inside a CSS template.
#[derive(Clone, Default)]
pub enum Interpolation {
    /// `null` / `undefined`: renders nothing.
    #[default]
    Absent,
    /// `false` renders nothing, `true` renders `true`.
    Bool(bool),
    Str(String),
    Number(f64),
    /// Prop-dependent style, invoked with the context and resolved again.
    Function(StyleFn),
    /// Reference to another styled component, rendered as `.<id>`.
    Component(ComponentId),
    /// camelCase style object; `Absent`/`false` values are dropped.
    Object(Vec<(String, Interpolation)>),
    /// Resolved element-wise and joined with newlines.
    List(Vec<Interpolation>),
}

impl Interpolation {
    /// Wrap a closure as a style function.
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&StyleContext<'_>) -> Interpolation + 'static,
    {
        Self::Function(Rc::new(f))
    }

    /// Build a style object from `(camelCaseKey, value)` pairs.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Interpolation)>,
    {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Whether this value renders as nothing regardless of context.
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Absent | Self::Bool(false) => true,
            Self::Str(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Debug for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
            Self::Component(id) => f.debug_tuple("Component").field(id).finish(),
            Self::Object(entries) => f.debug_tuple("Object").field(entries).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
        }
    }
}

impl From<&str> for Interpolation {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Interpolation {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<f64> for Interpolation {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Interpolation {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for Interpolation {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<Interpolation>> for Interpolation {
    fn from(value: Vec<Interpolation>) -> Self {
        Self::List(value)
    }
}

impl<T: Into<Interpolation>> From<Option<T>> for Interpolation {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

impl From<ComponentId> for Interpolation {
    fn from(value: ComponentId) -> Self {
        Self::Component(value)
    }
}

/// A prop value passed to a styled component.
#[derive(Debug, Clone)]
pub enum PropValue {
    Str(String),
    Number(f64),
    Bool(bool),
    /// Style-valued prop such as the deprecated `css` prop.
    Style(Interpolation),
}

impl PropValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Truthiness as a template would see it.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Str(s) => !s.is_empty(),
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Bool(b) => *b,
            Self::Style(style) => !style.is_absent(),
        }
    }

    /// Convert into an interpolation for use inside a template.
    pub fn to_interpolation(&self) -> Interpolation {
        match self {
            Self::Str(s) => Interpolation::Str(s.clone()),
            Self::Number(n) => Interpolation::Number(*n),
            Self::Bool(b) => Interpolation::Bool(*b),
            Self::Style(style) => style.clone(),
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Interpolation> for PropValue {
    fn from(value: Interpolation) -> Self {
        Self::Style(value)
    }
}

/// Component props keyed by React-style names (`className`, `data-id`, ...).
#[derive(Debug, Clone, Default)]
pub struct Props(BTreeMap<String, PropValue>);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: impl Into<PropValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<PropValue>) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.0.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(PropValue::as_str)
    }

    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(PropValue::as_number)
    }

    /// `true` when the prop is present and truthy.
    pub fn is_truthy(&self, name: &str) -> bool {
        self.get(name).is_some_and(PropValue::is_truthy)
    }

    pub fn remove(&mut self, name: &str) -> Option<PropValue> {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Overlay `other` on top of these props; `other` wins on conflicts.
    pub fn merge(&mut self, other: &Props) {
        for (name, value) in &other.0 {
            self.0.insert(name.clone(), value.clone());
        }
    }

    /// Keep only the props for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.0.retain(|name, _| keep(name.as_str()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Read-only per-render snapshot handed to style functions.
#[derive(Debug, Clone, Copy)]
pub struct StyleContext<'a> {
    pub theme: &'a Theme,
    pub props: &'a Props,
}

impl<'a> StyleContext<'a> {
    pub fn new(theme: &'a Theme, props: &'a Props) -> Self {
        Self { theme, props }
    }

    pub fn prop(&self, name: &str) -> Option<&'a PropValue> {
        self.props.get(name)
    }
}

/// Resolve one interpolation to a CSS fragment.
///
/// Absent values (`Absent`, `false`, empty string) render as nothing,
/// numbers and strings verbatim. Functions are invoked with `ctx` and
/// resolved again; lists join with newlines; objects render one
/// `kebab-key: value;` line per present entry.
pub fn resolve_interpolation(value: &Interpolation, ctx: &StyleContext<'_>) -> String {
    match value {
        Interpolation::Absent | Interpolation::Bool(false) => String::new(),
        Interpolation::Bool(true) => "true".to_string(),
        Interpolation::Str(s) => s.clone(),
        Interpolation::Number(n) => format_number(*n),
        Interpolation::Component(id) => format!(".{id}"),
        Interpolation::Function(f) => resolve_interpolation(&f(ctx), ctx),
        Interpolation::List(items) => items
            .iter()
            .map(|item| resolve_interpolation(item, ctx))
            .collect::<Vec<_>>()
            .join("\n"),
        Interpolation::Object(entries) => entries
            .iter()
            .filter(|(_, v)| !matches!(v, Interpolation::Absent | Interpolation::Bool(false)))
            .map(|(k, v)| format!("{}: {};", to_kebab_case(k), resolve_interpolation(v, ctx)))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn with_ctx<R>(props: Props, f: impl FnOnce(&StyleContext<'_>) -> R) -> R {
        let theme = Theme::new(8.0);
        let ctx = StyleContext::new(&theme, &props);
        f(&ctx)
    }

    #[test]
    fn test_absent_values_resolve_to_empty() {
        with_ctx(Props::new(), |ctx| {
            for value in [
                Interpolation::from(""),
                Interpolation::Bool(false),
                Interpolation::Absent,
                Interpolation::from(None::<String>),
            ] {
                assert_eq!(resolve_interpolation(&value, ctx), "");
            }
        });
    }

    #[test]
    fn test_numbers_and_strings_verbatim() {
        with_ctx(Props::new(), |ctx| {
            assert_eq!(resolve_interpolation(&0.into(), ctx), "0");
            assert_eq!(resolve_interpolation(&1.5.into(), ctx), "1.5");
            assert_eq!(resolve_interpolation(&"12px".into(), ctx), "12px");
            assert_eq!(resolve_interpolation(&true.into(), ctx), "true");
        });
    }

    #[test]
    fn test_component_reference() {
        with_ctx(Props::new(), |ctx| {
            let value = Interpolation::Component(ComponentId::new("hsc-1a"));
            assert_eq!(resolve_interpolation(&value, ctx), ".hsc-1a");
        });
    }

    #[test]
    fn test_function_uses_props_and_recurses() {
        let props = Props::new().with("active", true);
        with_ctx(props, |ctx| {
            let value = Interpolation::func(|ctx| {
                if ctx.props.is_truthy("active") {
                    Interpolation::func(|ctx| {
                        format!("padding: {}px;", ctx.theme.spacings.base).into()
                    })
                } else {
                    Interpolation::Absent
                }
            });
            assert_eq!(resolve_interpolation(&value, ctx), "padding: 8px;");
        });
    }

    #[test]
    fn test_list_joins_with_newlines() {
        with_ctx(Props::new(), |ctx| {
            let value = Interpolation::List(vec![
                "color: red;".into(),
                Interpolation::Absent,
                "margin: 0;".into(),
            ]);
            assert_eq!(resolve_interpolation(&value, ctx), "color: red;\n\nmargin: 0;");
        });
    }

    #[test]
    fn test_object_kebab_cases_and_filters() {
        with_ctx(Props::new(), |ctx| {
            let value = Interpolation::object([
                ("backgroundColor", "red".into()),
                ("marginTop", Interpolation::Absent),
                ("display", false.into()),
                ("zIndex", 2.into()),
            ]);
            assert_eq!(
                resolve_interpolation(&value, ctx),
                "background-color: red;\nz-index: 2;"
            );
        });
    }

    #[test]
    fn test_props_merge_overrides() {
        let mut base = Props::new().with("size", "small").with("id", "a");
        base.merge(&Props::new().with("size", "large"));
        assert_eq!(base.get_str("size"), Some("large"));
        assert_eq!(base.get_str("id"), Some("a"));
    }

    proptest! {
        #[test]
        fn prop_numbers_render_like_display(n in -1.0e6f64..1.0e6) {
            let theme = Theme::new(8.0);
            let props = Props::new();
            let ctx = StyleContext::new(&theme, &props);
            prop_assert_eq!(resolve_interpolation(&n.into(), &ctx), format_number(n));
        }

        #[test]
        fn prop_object_lines_are_terminated(keys in prop::collection::vec("[a-z]{1,6}([A-Z][a-z]{1,6})?", 1..6)) {
            let theme = Theme::new(8.0);
            let props = Props::new();
            let ctx = StyleContext::new(&theme, &props);
            let value = Interpolation::object(keys.iter().map(|k| (k.clone(), Interpolation::from("1px"))));
            let css = resolve_interpolation(&value, &ctx);
            for line in css.lines() {
                prop_assert!(line.ends_with(';'));
                prop_assert!(!line.chars().any(|c| c.is_ascii_uppercase()));
            }
        }
    }
}
