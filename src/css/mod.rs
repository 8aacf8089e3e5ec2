//! CSS authoring pipeline.
//!
//! - [`interpolation`]: values embedded in templates and their resolution
//! - [`template`]: the `css` template evaluator
//! - [`compiler`]: nested CSS to a flat arena AST
//! - [`serializer`]: middleware-driven AST serialization
//! - [`middleware`]: `@honey-*` at-rules and spacing scaling
//! - [`media`]: `@media` query construction
//! - [`processor`]: the full pipeline behind [`process_css`]

pub mod compiler;
pub mod interpolation;
pub mod media;
pub mod middleware;
pub mod processor;
pub mod serializer;
pub mod template;

pub use compiler::{Ast, NodeId, NodeKind, NodeRef, compile};
pub use interpolation::{Interpolation, PropValue, Props, StyleContext, StyleFn, resolve_interpolation};
pub use media::{MediaRule, MediaType, Orientation, media_query};
pub use processor::{ProcessOptions, process_css};
pub use serializer::{Middleware, Serializer, Transform};
pub use template::{CssTemplate, css};
