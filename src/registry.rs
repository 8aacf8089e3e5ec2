//! Reference-counted registry of mounted style rules.
//!
//! Every mounted class owns one entry. The registry renders all live entries
//! into a single `<style data-honey-style="true">` element, ordered by
//! ascending priority (ties keep insertion order), and rewrites that element
//! whenever an entry is added or removed.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::host::{Head, Placement, SharedHost, StyleElementId};

/// Marker attribute of the managed `<style>` element.
pub const HONEY_STYLE_ATTR: &str = "data-honey-style";

/// One mounted class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRegistryEntry {
    pub css: String,
    /// Live mounts; the entry is removed when this reaches zero.
    pub usages: usize,
    pub priority: i32,
    seq: u64,
}

struct RegistryState {
    entries: HashMap<String, StyleRegistryEntry>,
    host: SharedHost,
    tag: Option<StyleElementId>,
    next_seq: u64,
}

impl RegistryState {
    fn stylesheet(&self) -> String {
        let mut entries: Vec<&StyleRegistryEntry> = self.entries.values().collect();
        entries.sort_by_key(|entry| (entry.priority, entry.seq));
        entries
            .iter()
            .map(|entry| entry.css.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn ensure_tag(&mut self) -> StyleElementId {
        if let Some(tag) = self.tag {
            return tag;
        }
        let mut host = self.host.borrow_mut();
        let tag = host
            .find_style(HONEY_STYLE_ATTR, "true")
            .unwrap_or_else(|| host.create_style(&[(HONEY_STYLE_ATTR, "true")], Placement::Append));
        drop(host);
        self.tag = Some(tag);
        tag
    }

    fn rebuild(&mut self) {
        let tag = self.ensure_tag();
        let css = self.stylesheet();
        tracing::trace!(entries = self.entries.len(), len = css.len(), "rebuilding stylesheet");
        self.host.borrow_mut().set_text_content(tag, &css);
    }
}

/// Shared handle to a style registry.
///
/// Cloning is cheap; clones refer to the same registry.
#[derive(Clone)]
pub struct StyleRegistry {
    state: Rc<RefCell<RegistryState>>,
}

impl StyleRegistry {
    pub fn new(host: SharedHost) -> Self {
        Self {
            state: Rc::new(RefCell::new(RegistryState {
                entries: HashMap::new(),
                host,
                tag: None,
                next_seq: 0,
            })),
        }
    }

    /// A registry writing into a fresh in-memory [`Head`].
    pub fn in_memory() -> (Self, Rc<RefCell<Head>>) {
        let head = Head::shared();
        let host: SharedHost = head.clone();
        (Self::new(host), head)
    }

    /// The host this registry writes to.
    pub fn host(&self) -> SharedHost {
        self.state.borrow().host.clone()
    }

    /// Mount `css` under `class_name`.
    ///
    /// An already mounted class only gains a usage; its css and priority
    /// stay as first mounted. The returned cleanup must run exactly once.
    pub fn mount(&self, class_name: &str, css: &str, priority: i32) -> StyleCleanup {
        let mut state = self.state.borrow_mut();

        if let Some(entry) = state.entries.get_mut(class_name) {
            entry.usages += 1;
            tracing::trace!(class_name, usages = entry.usages, "style reused");
        } else {
            let seq = state.next_seq;
            state.next_seq += 1;
            state.entries.insert(
                class_name.to_string(),
                StyleRegistryEntry {
                    css: css.to_string(),
                    usages: 1,
                    priority,
                    seq,
                },
            );
            tracing::debug!(class_name, priority, "style mounted");
            state.rebuild();
        }

        StyleCleanup {
            registry: self.clone(),
            class_name: class_name.to_string(),
        }
    }

    fn release(&self, class_name: &str) {
        let mut state = self.state.borrow_mut();
        let Some(entry) = state.entries.get_mut(class_name) else {
            return;
        };

        entry.usages = entry.usages.saturating_sub(1);
        if entry.usages == 0 {
            state.entries.remove(class_name);
            tracing::debug!(class_name, "style unmounted");
            state.rebuild();
        }
    }

    pub fn entry(&self, class_name: &str) -> Option<StyleRegistryEntry> {
        self.state.borrow().entries.get(class_name).cloned()
    }

    /// Current usage count; zero when not mounted.
    pub fn usages(&self, class_name: &str) -> usize {
        self.state
            .borrow()
            .entries
            .get(class_name)
            .map_or(0, |entry| entry.usages)
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.state.borrow().entries.contains_key(class_name)
    }

    pub fn len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().entries.is_empty()
    }

    /// The stylesheet text as it is written to the host.
    pub fn stylesheet(&self) -> String {
        self.state.borrow().stylesheet()
    }
}

impl std::fmt::Debug for StyleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("StyleRegistry")
            .field("entries", &state.entries)
            .field("tag", &state.tag)
            .finish()
    }
}

/// Releases one mount of a class.
#[must_use = "dropping a StyleCleanup leaves the style mounted"]
pub struct StyleCleanup {
    registry: StyleRegistry,
    class_name: String,
}

impl StyleCleanup {
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Release the mount.
    pub fn run(self) {
        self.registry.release(&self.class_name);
    }

    /// Convert into a boxed callback for an effect scheduler.
    pub fn into_callback(self) -> Box<dyn FnOnce()> {
        Box::new(move || self.run())
    }
}

impl std::fmt::Debug for StyleCleanup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleCleanup")
            .field("class_name", &self.class_name)
            .finish()
    }
}
