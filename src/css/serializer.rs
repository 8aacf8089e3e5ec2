//! AST serialization through a middleware chain.

use super::compiler::{Ast, NodeKind, NodeRef, compile};

/// At-rules that are complete statements when they carry no block.
const STATEMENT_AT_RULES: &[&str] = &["import", "charset", "namespace", "layer"];

/// Decision returned by a middleware for one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
    /// Not handled; ask the next middleware.
    Keep,
    /// Emit this text instead of the node.
    Replace(String),
    /// Emit nothing for this node.
    Suppress,
}

/// Visitor invoked once per serialized node.
///
/// Middlewares never mutate the AST. They inspect the node and return a
/// [`Transform`]; the first non-`Keep` decision in the chain wins, and when
/// every middleware keeps the node the built-in stringifier renders it.
/// `ser` serializes children (or freshly compiled CSS) through the same
/// chain.
pub trait Middleware {
    fn visit(&self, node: NodeRef<'_>, ser: &Serializer<'_>) -> Transform;
}

/// Ordered middleware chain with a final stringifier.
#[derive(Default)]
pub struct Serializer<'a> {
    middlewares: Vec<Box<dyn Middleware + 'a>>,
}

impl<'a> Serializer<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a middleware to the chain.
    pub fn with(mut self, middleware: impl Middleware + 'a) -> Self {
        self.push(middleware);
        self
    }

    pub fn push(&mut self, middleware: impl Middleware + 'a) {
        self.middlewares.push(Box::new(middleware));
    }

    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// Serialize a whole AST.
    pub fn serialize(&self, ast: &Ast) -> String {
        self.serialize_nodes(ast.roots())
    }

    /// Serialize a sequence of nodes and concatenate the output.
    pub fn serialize_nodes<'n>(&self, nodes: impl IntoIterator<Item = NodeRef<'n>>) -> String {
        nodes.into_iter().map(|node| self.visit(node)).collect()
    }

    /// Serialize the children of `node`.
    pub fn serialize_children(&self, node: NodeRef<'_>) -> String {
        self.serialize_nodes(node.children())
    }

    /// Compile `css` and serialize it through this chain.
    pub fn process(&self, css: &str) -> String {
        self.serialize(&compile(css))
    }

    /// Render one node: middlewares first, then the stringifier.
    pub fn visit(&self, node: NodeRef<'_>) -> String {
        for middleware in &self.middlewares {
            match middleware.visit(node, self) {
                Transform::Keep => continue,
                Transform::Replace(css) => return css,
                Transform::Suppress => return String::new(),
            }
        }
        self.stringify(node)
    }

    fn stringify(&self, node: NodeRef<'_>) -> String {
        match node.kind() {
            NodeKind::Declaration => node.value().to_string(),
            NodeKind::Rule => {
                if node.value().is_empty() {
                    return String::new();
                }
                let children = self.serialize_children(node);
                if children.is_empty() {
                    String::new()
                } else {
                    format!("{}{{{children}}}", node.value())
                }
            }
            NodeKind::AtRule(name) => {
                let children = self.serialize_children(node);
                if !children.is_empty() {
                    format!("{}{{{children}}}", node.value())
                } else if !node.has_children() && STATEMENT_AT_RULES.contains(&name.as_str()) {
                    format!("{};", node.value())
                } else {
                    String::new()
                }
            }
        }
    }
}
