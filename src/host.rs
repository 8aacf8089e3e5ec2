//! Document head abstraction used to inject `<style>` elements.

use std::cell::RefCell;
use std::fmt::Write;
use std::rc::Rc;

/// Handle of a style element owned by a [`StyleHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleElementId(pub u32);

/// Where a new element goes in the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// After every existing element.
    Append,
    /// Before every existing element, i.e. lowest cascade order.
    Prepend,
}

/// The part of a document the style runtime writes to.
pub trait StyleHost {
    /// First style element whose attribute `attr` equals `value`.
    fn find_style(&self, attr: &str, value: &str) -> Option<StyleElementId>;

    fn create_style(&mut self, attrs: &[(&str, &str)], placement: Placement) -> StyleElementId;

    /// Replace the text content of an element.
    fn set_text_content(&mut self, id: StyleElementId, text: &str);

    fn remove_style(&mut self, id: StyleElementId);
}

/// Host shared between the registry and global styles.
pub type SharedHost = Rc<RefCell<dyn StyleHost>>;

/// One `<style>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleElement {
    pub id: StyleElementId,
    pub attrs: Vec<(String, String)>,
    pub text: String,
}

impl StyleElement {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// In-memory document head, usable for server rendering and tests.
#[derive(Debug, Default)]
pub struct Head {
    styles: Vec<StyleElement>,
    next_id: u32,
}

impl Head {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a new head for sharing.
    pub fn shared() -> Rc<RefCell<Head>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Style elements in document order.
    pub fn styles(&self) -> &[StyleElement] {
        &self.styles
    }

    pub fn get(&self, id: StyleElementId) -> Option<&StyleElement> {
        self.styles.iter().find(|s| s.id == id)
    }

    /// Text of the element with the given id, if present.
    pub fn text_content(&self, id: StyleElementId) -> Option<&str> {
        self.get(id).map(|s| s.text.as_str())
    }

    /// Render every style element as HTML.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for style in &self.styles {
            html.push_str("<style");
            for (name, value) in &style.attrs {
                let _ = write!(html, " {name}=\"{}\"", escape_attr(value));
            }
            html.push('>');
            html.push_str(&style.text.replace("</style", "<\\/style"));
            html.push_str("</style>");
        }
        html
    }
}

impl StyleHost for Head {
    fn find_style(&self, attr: &str, value: &str) -> Option<StyleElementId> {
        self.styles
            .iter()
            .find(|s| s.attr(attr) == Some(value))
            .map(|s| s.id)
    }

    fn create_style(&mut self, attrs: &[(&str, &str)], placement: Placement) -> StyleElementId {
        self.next_id += 1;
        let element = StyleElement {
            id: StyleElementId(self.next_id),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            text: String::new(),
        };
        let id = element.id;
        match placement {
            Placement::Append => self.styles.push(element),
            Placement::Prepend => self.styles.insert(0, element),
        }
        id
    }

    fn set_text_content(&mut self, id: StyleElementId, text: &str) {
        if let Some(style) = self.styles.iter_mut().find(|s| s.id == id) {
            style.text = text.to_string();
        }
    }

    fn remove_style(&mut self, id: StyleElementId) {
        self.styles.retain(|s| s.id != id);
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}
