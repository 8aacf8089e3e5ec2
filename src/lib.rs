//! # honey-style
//!
//! Themable CSS-in-Rust styling for component trees.
//!
//! ## Features
//!
//! - `css` templates with prop- and theme-aware interpolations
//! - Nested CSS flattened by a `cssparser`-based compiler
//! - Custom `@honey-*` at-rules (stack, inline, center, ellipsis,
//!   absolute-fill, media) expanded by a middleware chain
//! - Bare numbers in spacing properties scaled by the theme spacing base
//! - Content-hashed class names and a reference-counted style registry
//!   that rewrites one `<style>` element in the document head
//!
//! ## Quick Start
//!
//! ```
//! use honey_style::{ProcessOptions, Theme, process_css};
//!
//! let theme = Theme::new(8.0).with_breakpoint("sm", 768);
//! let css = process_css(
//!     "padding: 2; @honey-center;",
//!     Some(".card"),
//!     &ProcessOptions::new(Some(&theme)),
//! );
//! assert_eq!(
//!     css,
//!     ".card{padding:16px;}.card{display:flex;align-items:center;justify-content:center;}"
//! );
//! ```
//!
//! ## Styled Components
//!
//! ```
//! use honey_style::{
//!     Element, Lifecycle, Props, RenderContext, StyleConfig, StyleProvider, StyleRegistry,
//!     Theme, css, render_element, styled,
//! };
//!
//! let (registry, head) = StyleRegistry::in_memory();
//! let provider = StyleProvider::new(Theme::new(8.0), registry)
//!     .with_config(StyleConfig::production());
//!
//! let button = styled("button").style(css(&["padding: 1;"], vec![]));
//!
//! let mut lifecycle = Lifecycle::new();
//! let instance = lifecycle.create_instance();
//! let host = {
//!     let mut ctx = RenderContext::new(Some(&provider), &mut lifecycle, instance);
//!     render_element(Element::new(&button, Props::new()), &mut ctx).unwrap()
//! };
//! lifecycle.commit();
//!
//! assert_eq!(host.tag, "button");
//! assert!(head.borrow().to_html().contains("padding:8px;"));
//! ```

pub mod attrs;
pub mod config;
pub mod css;
pub mod error;
pub mod global_style;
pub mod hash;
pub mod host;
pub mod lifecycle;
pub mod provider;
pub mod registry;
pub mod styled;
pub mod theme;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use attrs::filter_non_html_attrs;
pub use config::StyleConfig;
pub use css::{
    CssTemplate, Interpolation, MediaRule, Middleware, ProcessOptions, PropValue, Props,
    Serializer, StyleContext, Transform, compile, css, media_query, process_css,
};
pub use error::{Error, Result};
pub use global_style::{GlobalStyle, create_global_style};
pub use hash::{combine_class_names, generate_id, hash_string, resolve_class_name};
pub use host::{Head, Placement, StyleHost};
pub use lifecycle::{EffectScheduler, Lifecycle};
pub use provider::{StyleProvider, use_honey_style};
pub use registry::{StyleCleanup, StyleRegistry, StyleRegistryEntry};
pub use styled::{
    Component, ComponentId, Element, HostElement, RenderContext, StyledComponent, StyledProps,
    Target, render_element, styled,
};
pub use theme::Theme;
