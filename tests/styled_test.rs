//! Styled component lifecycle tests.
//!
//! Renders component trees against an in-memory head and checks what ends
//! up in the managed `<style>` element across re-renders and unmounts.

use std::cell::RefCell;
use std::rc::Rc;

use honey_style::css::Interpolation;
use honey_style::host::StyleElementId;
use honey_style::lifecycle::InstanceId;
use honey_style::registry::HONEY_STYLE_ATTR;
use honey_style::{
    Component, Element, Head, HostElement, Lifecycle, Props, RenderContext, Result, StyleConfig,
    StyleHost, StyleProvider, StyleRegistry, StyledProps, Theme, css, render_element,
    resolve_class_name, styled,
};

struct App {
    provider: StyleProvider,
    head: Rc<RefCell<Head>>,
    lifecycle: Lifecycle,
}

impl App {
    fn new() -> Self {
        let (registry, head) = StyleRegistry::in_memory();
        let theme = Theme::new(8.0).with_breakpoint("sm", 768);
        Self {
            provider: StyleProvider::new(theme, registry).with_config(StyleConfig::production()),
            head,
            lifecycle: Lifecycle::new(),
        }
    }

    fn render(&mut self, instance: InstanceId, element: Element) -> Result<HostElement> {
        let host = {
            let mut ctx = RenderContext::new(Some(&self.provider), &mut self.lifecycle, instance);
            render_element(element, &mut ctx)?
        };
        self.lifecycle.commit();
        Ok(host)
    }

    fn style_text(&self) -> String {
        let head = self.head.borrow();
        head.styles()
            .iter()
            .find(|style| style.attr(HONEY_STYLE_ATTR) == Some("true"))
            .map(|style| style.text.clone())
            .unwrap_or_default()
    }
}

fn sized_box() -> Rc<honey_style::StyledComponent> {
    styled("div").style(css(
        &["padding: ", "; @honey-media(sm) { padding: ", "; }"],
        vec![
            Interpolation::func(|ctx| ctx.props.get_number("size").into()),
            Interpolation::func(|ctx| ctx.props.get_number("size").map(|n| n * 2.0).into()),
        ],
    ))
}

// ============================================================================
// Re-render Tests
// ============================================================================

#[test]
fn test_prop_change_swaps_rules() {
    let mut app = App::new();
    let component = sized_box();
    let instance = app.lifecycle.create_instance();

    let first = app
        .render(instance, Element::new(&component, Props::new().with("size", 1)))
        .unwrap();
    let first_class = first.classes()[1].to_string();
    assert_eq!(
        app.style_text(),
        format!(
            ".{first_class}{{padding:8px;}}@media screen and (min-width: 768px){{.{first_class}{{padding:16px;}}}}"
        )
    );

    let second = app
        .render(instance, Element::new(&component, Props::new().with("size", 2)))
        .unwrap();
    let second_class = second.classes()[1].to_string();
    assert_ne!(first_class, second_class);
    assert!(!app.provider.registry.contains(&first_class));
    assert!(app.style_text().starts_with(&format!(".{second_class}{{padding:16px;}}")));
}

#[test]
fn test_unchanged_render_keeps_mount() {
    let mut app = App::new();
    let component = sized_box();
    let instance = app.lifecycle.create_instance();

    app.render(instance, Element::new(&component, Props::new().with("size", 1)))
        .unwrap();
    let host = app
        .render(instance, Element::new(&component, Props::new().with("size", 1)))
        .unwrap();

    assert_eq!(app.provider.registry.usages(host.classes()[1]), 1);
    assert_eq!(app.lifecycle.mounted_effects(), 2);
}

#[test]
fn test_identical_styles_share_one_entry() {
    let mut app = App::new();
    let component = sized_box();
    let a = app.lifecycle.create_instance();
    let b = app.lifecycle.create_instance();

    let host = app
        .render(a, Element::new(&component, Props::new().with("size", 3)))
        .unwrap();
    app.render(b, Element::new(&component, Props::new().with("size", 3)))
        .unwrap();

    let class = host.classes()[1].to_string();
    assert_eq!(app.provider.registry.usages(&class), 2);

    app.lifecycle.unmount(a);
    assert_eq!(app.provider.registry.usages(&class), 1);

    app.lifecycle.unmount(b);
    assert!(app.provider.registry.is_empty());
    assert_eq!(app.style_text(), "");
}

// ============================================================================
// Composition Tests
// ============================================================================

/// Plain component forwarding its props to an anchor.
struct Link;

impl Component for Link {
    fn render(&self, props: StyledProps, _ctx: &mut RenderContext<'_>) -> Result<Element> {
        Ok(Element::host("a", props.into_props().with("rel", "noopener")))
    }

    fn name(&self) -> String {
        "Link".to_string()
    }
}

#[test]
fn test_styling_a_plain_component() {
    let mut app = App::new();
    let link = styled(Rc::new(Link)).style(css(&["color: blue;"], vec![]));
    assert_eq!(link.display_name(), "HoneyStyledComponent(Link)");

    let instance = app.lifecycle.create_instance();
    let host = app
        .render(
            instance,
            Element::new(&link, Props::new().with("href", "/docs").with("size", 1)),
        )
        .unwrap();

    assert_eq!(host.tag, "a");
    assert_eq!(host.props.get_str("href"), Some("/docs"));
    assert_eq!(host.props.get_str("rel"), Some("noopener"));
    // Unknown attributes are only filtered for host targets.
    assert!(host.props.get("size").is_some());
    assert_eq!(
        host.class_name(),
        format!("{} {}", link.id(), resolve_class_name("color: blue;"))
    );
}

#[test]
fn test_three_level_composition_priorities() {
    let mut app = App::new();
    let base = styled("p").style(css(&["margin: 0;"], vec![]));
    let middle = styled(&base).style(css(&["margin: 1;"], vec![]));
    let top = styled(&middle).style(css(&["margin: 2;"], vec![]));

    let instance = app.lifecycle.create_instance();
    app.render(instance, Element::new(&top, Props::new())).unwrap();

    let registry = &app.provider.registry;
    assert_eq!(registry.entry(&resolve_class_name("margin: 0;")).unwrap().priority, -2);
    assert_eq!(registry.entry(&resolve_class_name("margin: 1;")).unwrap().priority, -1);
    assert_eq!(registry.entry(&resolve_class_name("margin: 2;")).unwrap().priority, 0);

    let text = app.style_text();
    let positions: Vec<usize> = ["margin:0px", "margin:8px", "margin:16px"]
        .iter()
        .map(|needle| text.find(needle).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

// ============================================================================
// Custom Host Tests
// ============================================================================

/// Host that records every write.
#[derive(Default)]
struct RecordingHost {
    next: u32,
    writes: Vec<(StyleElementId, String)>,
    removed: Vec<StyleElementId>,
}

impl StyleHost for RecordingHost {
    fn find_style(&self, _attr: &str, _value: &str) -> Option<StyleElementId> {
        None
    }

    fn create_style(
        &mut self,
        _attrs: &[(&str, &str)],
        _placement: honey_style::Placement,
    ) -> StyleElementId {
        self.next += 1;
        StyleElementId(self.next)
    }

    fn set_text_content(&mut self, id: StyleElementId, text: &str) {
        self.writes.push((id, text.to_string()));
    }

    fn remove_style(&mut self, id: StyleElementId) {
        self.removed.push(id);
    }
}

#[test]
fn test_registry_rewrites_one_element() {
    let host = Rc::new(RefCell::new(RecordingHost::default()));
    let registry = StyleRegistry::new(host.clone());

    let a = registry.mount("hs-a", ".hs-a{top:0;}", 0);
    let b = registry.mount("hs-b", ".hs-b{top:1px;}", -1);
    a.run();
    b.run();

    let host = host.borrow();
    assert!(host.writes.iter().all(|(id, _)| *id == StyleElementId(1)));
    let texts: Vec<&str> = host.writes.iter().map(|(_, text)| text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            ".hs-a{top:0;}",
            ".hs-b{top:1px;}\n.hs-a{top:0;}",
            ".hs-b{top:1px;}",
            "",
        ]
    );
}
