//! Styled components.
//!
//! [`styled`] wraps a host element or another component with a CSS
//! template. Rendering a [`StyledComponent`] evaluates the template against
//! the merged props and theme, hashes the result to a class name, and
//! schedules an insertion effect that processes and mounts the CSS in the
//! provider's registry. The registry is never touched during render itself.
//!
//! Composition depth orders mounted rules: a styled component that targets
//! another styled component passes `depth - 1` to its base, so the base's
//! rules are emitted first and the extension wins ties.

use std::fmt;
use std::rc::Rc;

use crate::attrs::filter_non_html_attrs;
use crate::css::{
    CssTemplate, Interpolation, ProcessOptions, PropValue, Props, StyleContext, process_css,
    resolve_interpolation,
};
use crate::error::Result;
use crate::hash::{combine_class_names, generate_id, resolve_class_name};
use crate::lifecycle::{EffectKey, EffectScheduler, InstanceId};
use crate::provider::{StyleProvider, use_honey_style};

/// Priority of rules mounted for the deprecated `css` prop.
pub const CSS_PROP_PRIORITY: i32 = 1;

/// Stable identifier of a styled component, also its first class name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(String);

impl ComponentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh process-unique `hsc-*` id.
    pub fn generate() -> Self {
        Self(generate_id("hsc"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A renderable component.
pub trait Component {
    fn render(&self, props: StyledProps, ctx: &mut RenderContext<'_>) -> Result<Element>;

    fn name(&self) -> String {
        "Component".to_string()
    }

    /// Set for styled components only.
    fn styled_id(&self) -> Option<&ComponentId> {
        None
    }
}

/// What an element renders to.
#[derive(Clone)]
pub enum Target {
    /// Primitive element such as `div`.
    Host(String),
    Component(Rc<dyn Component>),
}

impl Target {
    pub fn name(&self) -> String {
        match self {
            Self::Host(tag) => tag.clone(),
            Self::Component(component) => component.name(),
        }
    }

    pub fn is_host(&self) -> bool {
        matches!(self, Self::Host(_))
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host(tag) => f.debug_tuple("Host").field(tag).finish(),
            Self::Component(component) => f.debug_tuple("Component").field(&component.name()).finish(),
        }
    }
}

impl From<&str> for Target {
    fn from(tag: &str) -> Self {
        Self::Host(tag.to_string())
    }
}

impl From<String> for Target {
    fn from(tag: String) -> Self {
        Self::Host(tag)
    }
}

impl<C: Component + 'static> From<Rc<C>> for Target {
    fn from(component: Rc<C>) -> Self {
        Self::Component(component)
    }
}

impl<C: Component + 'static> From<&Rc<C>> for Target {
    fn from(component: &Rc<C>) -> Self {
        Self::Component(component.clone())
    }
}

/// Props as a component receives them.
#[derive(Debug, Clone, Default)]
pub struct StyledProps {
    /// Polymorphic `as` override.
    pub as_target: Option<Target>,
    pub class_name: Option<String>,
    /// Deprecated inline style override.
    pub css: Option<Interpolation>,
    pub composition_depth: i32,
    /// Every other prop.
    pub attrs: Props,
}

impl StyledProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attr(mut self, name: &str, value: impl Into<PropValue>) -> Self {
        self.attrs.insert(name, value);
        self
    }

    pub fn as_target(mut self, target: impl Into<Target>) -> Self {
        self.as_target = Some(target.into());
        self
    }

    pub fn class_name(mut self, class_name: &str) -> Self {
        self.class_name = Some(class_name.to_string());
        self
    }

    pub fn css(mut self, css: impl Into<Interpolation>) -> Self {
        self.css = Some(css.into());
        self
    }

    /// Attributes plus `className`, for components that forward to a host.
    pub fn into_props(self) -> Props {
        let mut props = self.attrs;
        if let Some(class_name) = self.class_name {
            props.insert("className", class_name);
        }
        props
    }
}

impl From<Props> for StyledProps {
    /// Splits `className` and `css` out of a flat prop map.
    fn from(mut attrs: Props) -> Self {
        let class_name = match attrs.remove("className") {
            Some(PropValue::Str(name)) => Some(name),
            _ => None,
        };
        let css = attrs.remove("css").map(|value| value.to_interpolation());
        Self {
            as_target: None,
            class_name,
            css,
            composition_depth: 0,
            attrs,
        }
    }
}

/// An element produced by rendering.
#[derive(Debug, Clone)]
pub struct Element {
    pub target: Target,
    pub props: Props,
    pub as_target: Option<Target>,
    /// Composition depth handed to a styled target.
    pub composition_depth: Option<i32>,
}

impl Element {
    pub fn new(target: impl Into<Target>, props: Props) -> Self {
        Self {
            target: target.into(),
            props,
            as_target: None,
            composition_depth: None,
        }
    }

    pub fn host(tag: &str, props: Props) -> Self {
        Self::new(tag, props)
    }

    pub fn with_as(mut self, target: impl Into<Target>) -> Self {
        self.as_target = Some(target.into());
        self
    }
}

/// A fully resolved primitive element.
#[derive(Debug, Clone)]
pub struct HostElement {
    pub tag: String,
    pub props: Props,
}

impl HostElement {
    pub fn class_name(&self) -> &str {
        self.props.get_str("className").unwrap_or("")
    }

    /// Individual class names in order.
    pub fn classes(&self) -> Vec<&str> {
        self.class_name().split_whitespace().collect()
    }
}

/// Everything a component needs while rendering.
pub struct RenderContext<'a> {
    pub provider: Option<&'a StyleProvider>,
    pub scheduler: &'a mut dyn EffectScheduler,
    pub instance: InstanceId,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        provider: Option<&'a StyleProvider>,
        scheduler: &'a mut dyn EffectScheduler,
        instance: InstanceId,
    ) -> Self {
        Self {
            provider,
            scheduler,
            instance,
        }
    }
}

/// Render `element` down to a host element.
pub fn render_element(element: Element, ctx: &mut RenderContext<'_>) -> Result<HostElement> {
    let mut element = element;
    loop {
        let component = match element.target {
            Target::Host(tag) => {
                return Ok(HostElement {
                    tag,
                    props: element.props,
                });
            }
            Target::Component(component) => component,
        };

        let mut props = StyledProps::from(element.props);
        props.as_target = element.as_target;
        props.composition_depth = element.composition_depth.unwrap_or(0);

        element = component.render(props, ctx)?;
    }
}

/// Default props, static or derived from the style context.
#[derive(Clone)]
pub enum DefaultProps {
    Static(Props),
    /// Sees the caller's props plus `className` and, when an `as` override
    /// is given, its target name under `as`.
    Dynamic(Rc<dyn Fn(&StyleContext<'_>) -> Props>),
}

/// Builder returned by [`styled`].
pub struct StyledBuilder {
    target: Target,
    default_props: Option<DefaultProps>,
    omit_props: Option<Rc<dyn Fn(&str) -> bool>>,
}

/// Start building a styled component for `target`.
pub fn styled(target: impl Into<Target>) -> StyledBuilder {
    StyledBuilder {
        target: target.into(),
        default_props: None,
        omit_props: None,
    }
}

impl StyledBuilder {
    pub fn default_props(mut self, props: Props) -> Self {
        self.default_props = Some(DefaultProps::Static(props));
        self
    }

    pub fn default_props_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&StyleContext<'_>) -> Props + 'static,
    {
        self.default_props = Some(DefaultProps::Dynamic(Rc::new(f)));
        self
    }

    /// Props for which `omit` returns true never reach the target.
    pub fn omit_props<F>(mut self, omit: F) -> Self
    where
        F: Fn(&str) -> bool + 'static,
    {
        self.omit_props = Some(Rc::new(omit));
        self
    }

    /// Attach the CSS template.
    pub fn style(self, template: impl Into<CssTemplate>) -> Rc<StyledComponent> {
        let display_name = format!("HoneyStyledComponent({})", self.target.name());
        Rc::new(StyledComponent {
            id: ComponentId::generate(),
            target: self.target,
            template: template.into(),
            default_props: self.default_props,
            omit_props: self.omit_props,
            display_name,
        })
    }
}

/// A component carrying a CSS template.
pub struct StyledComponent {
    id: ComponentId,
    target: Target,
    template: CssTemplate,
    default_props: Option<DefaultProps>,
    omit_props: Option<Rc<dyn Fn(&str) -> bool>>,
    display_name: String,
}

impl StyledComponent {
    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Interpolation selecting this component's elements (`.hsc-*`).
    pub fn selector(&self) -> Interpolation {
        Interpolation::Component(self.id.clone())
    }

    fn resolve_default_props(
        &self,
        ctx: &StyleContext<'_>,
        class_name: Option<&str>,
    ) -> Props {
        let mut defaults = match &self.default_props {
            Some(DefaultProps::Static(props)) => props.clone(),
            Some(DefaultProps::Dynamic(f)) => f(ctx),
            None => Props::new(),
        };
        if let Some(class_name) = class_name.filter(|c| !c.is_empty()) {
            defaults.insert("className", class_name);
        }
        defaults
    }

    fn schedule_mount(
        &self,
        ctx: &mut RenderContext<'_>,
        provider: &StyleProvider,
        slot: u8,
        class_name: &str,
        raw_css: String,
        priority: i32,
    ) {
        let registry = provider.registry.clone();
        let theme = provider.theme.clone();
        let config = provider.config;
        let owned_class = class_name.to_string();

        ctx.scheduler.insertion_effect(
            EffectKey::new(ctx.instance, self.id.as_str(), slot),
            class_name.to_string(),
            Box::new(move || {
                if owned_class.is_empty() {
                    return None;
                }
                let options = ProcessOptions::new(Some(&*theme)).with_config(config);
                let css = process_css(&raw_css, Some(&format!(".{owned_class}")), &options);
                Some(registry.mount(&owned_class, &css, priority).into_callback())
            }),
        );
    }
}

impl Component for StyledComponent {
    fn render(&self, props: StyledProps, ctx: &mut RenderContext<'_>) -> Result<Element> {
        let provider = use_honey_style(ctx.provider)?;
        let theme = provider.theme.clone();

        if provider.config.dev && props.css.is_some() {
            tracing::warn!(
                component = %self.display_name,
                "The \"css\" prop is deprecated. Please use inheritance or composition instead."
            );
        }

        let StyledProps {
            as_target,
            class_name,
            css: css_prop,
            composition_depth,
            attrs,
        } = props;

        let defaults = {
            let mut seed = attrs.clone();
            if let Some(class_name) = &class_name {
                seed.insert("className", class_name.as_str());
            }
            if let Some(target) = &as_target {
                seed.insert("as", target.name());
            }
            self.resolve_default_props(&StyleContext::new(&theme, &seed), class_name.as_deref())
        };

        let mut merged = defaults.clone();
        merged.merge(&attrs);
        let style_ctx = StyleContext::new(&theme, &merged);

        let raw_css = self.template.evaluate(&style_ctx);
        let base_class = resolve_class_name(&raw_css);
        self.schedule_mount(ctx, provider, 0, &base_class, raw_css, composition_depth);

        let css_prop = css_prop
            .map(|css| resolve_interpolation(&css, &style_ctx))
            .unwrap_or_default();
        let css_class = if css_prop.is_empty() {
            String::new()
        } else {
            resolve_class_name(&css_prop)
        };
        self.schedule_mount(ctx, provider, 1, &css_class, css_prop, CSS_PROP_PRIORITY);

        let final_class = combine_class_names([
            self.id.as_str(),
            base_class.as_str(),
            defaults.get_str("className").unwrap_or(""),
            css_class.as_str(),
        ]);
        merged.insert("className", final_class);

        if let Some(omit) = &self.omit_props {
            merged.retain(|name| !omit(name));
        }

        match &self.target {
            Target::Host(_) => {
                let target = as_target.unwrap_or_else(|| self.target.clone());
                let props = if target.is_host() {
                    filter_non_html_attrs(&merged)
                } else {
                    merged
                };
                Ok(Element::new(target, props))
            }
            Target::Component(component) => Ok(Element {
                target: self.target.clone(),
                props: merged,
                as_target,
                composition_depth: component.styled_id().map(|_| composition_depth - 1),
            }),
        }
    }

    fn name(&self) -> String {
        self.display_name.clone()
    }

    fn styled_id(&self) -> Option<&ComponentId> {
        Some(&self.id)
    }
}

impl From<&Rc<StyledComponent>> for Interpolation {
    fn from(component: &Rc<StyledComponent>) -> Self {
        component.selector()
    }
}

impl fmt::Debug for StyledComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyledComponent")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .finish()
    }
}
