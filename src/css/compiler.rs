//! CSS compiler: parses raw CSS (with nesting) into a flat arena AST.
//!
//! Parsing is done with `cssparser`'s rule body parser, which accepts
//! declarations, nested qualified rules and at-rules at every level. The
//! parsed tree is then flattened the way CSS-in-JS preprocessors do it:
//!
//! - nested rules become sibling rules with selectors resolved against the
//!   enclosing rule (`&` is replaced, otherwise a descendant combinator is
//!   inserted);
//! - grouping at-rules (`@media`, `@supports`, ...) nested in a rule wrap a
//!   synthetic rule carrying the enclosing selectors;
//! - other at-rules keep their body as children and point at the enclosing
//!   rule through `parent`.
//!
//! Nodes live in an [`Ast`] arena and refer to each other by [`NodeId`], so
//! `parent` is a plain lookup key with no ownership.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, Token,
};

use crate::util::{collapse_whitespace, split_top_level_commas, strip_comments};

/// Prefix of custom at-rules expanded by the middleware chain.
pub const HONEY_AT_RULE_PREFIX: &str = "honey-";

/// At-rules that group rules and therefore re-wrap the enclosing selector.
const GROUPING_AT_RULES: &[&str] = &["media", "supports", "container", "layer", "document"];

/// Index of a node in its [`Ast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Node type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// `property: value;`
    Declaration,
    /// Qualified rule with resolved selectors.
    Rule,
    /// At-rule; holds the lowercased name without `@`.
    AtRule(String),
}

/// One AST node.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Raw text: `prop:value;` for declarations, the comma-joined selector
    /// list for rules, `@name prelude` for at-rules.
    pub value: String,
    /// `[prop, value]` for declarations, the selector list for rules,
    /// `[prelude]` for at-rules.
    pub props: Vec<String>,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

/// Arena holding the result of one compile pass.
#[derive(Debug, Clone, Default)]
pub struct Ast {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

/// Where a newly created node is attached.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Root,
    Children(NodeId),
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Borrowing handle for a node.
    #[inline]
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { ast: self, id }
    }

    /// Top-level nodes in source order.
    pub fn roots(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        self.roots.iter().map(|&id| self.node(id))
    }

    fn alloc(&mut self, node: Node, slot: Slot) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        match slot {
            Slot::Root => self.roots.push(id),
            Slot::Children(parent) => self.nodes[parent.index()].children.push(id),
        }
        id
    }
}

/// Borrowed view of a node with navigation helpers.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    ast: &'a Ast,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn ast(&self) -> &'a Ast {
        self.ast
    }

    fn data(&self) -> &'a Node {
        &self.ast.nodes[self.id.index()]
    }

    pub fn kind(&self) -> &'a NodeKind {
        &self.data().kind
    }

    pub fn value(&self) -> &'a str {
        &self.data().value
    }

    pub fn props(&self) -> &'a [String] {
        &self.data().props
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.data().parent.map(|id| self.ast.node(id))
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let ast = self.ast;
        self.data().children.iter().map(move |&id| ast.node(id))
    }

    pub fn has_children(&self) -> bool {
        !self.data().children.is_empty()
    }

    pub fn is_declaration(&self) -> bool {
        matches!(self.kind(), NodeKind::Declaration)
    }

    pub fn is_rule(&self) -> bool {
        matches!(self.kind(), NodeKind::Rule)
    }

    /// At-rule name, lowercased, without `@`.
    pub fn at_rule_name(&self) -> Option<&'a str> {
        match self.kind() {
            NodeKind::AtRule(name) => Some(name),
            _ => None,
        }
    }

    /// Declaration property name.
    pub fn property(&self) -> Option<&'a str> {
        match self.kind() {
            NodeKind::Declaration => self.props().first().map(String::as_str),
            _ => None,
        }
    }

    /// Declaration value without the trailing `;`.
    pub fn declared_value(&self) -> Option<&'a str> {
        match self.kind() {
            NodeKind::Declaration => self.props().get(1).map(String::as_str),
            _ => None,
        }
    }

    /// At-rule prelude (everything between the name and the block).
    pub fn prelude(&self) -> Option<&'a str> {
        match self.kind() {
            NodeKind::AtRule(_) => self.props().first().map(String::as_str),
            _ => None,
        }
    }
}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("kind", self.kind())
            .field("value", &self.value())
            .finish()
    }
}

/// Compile CSS text into an AST.
///
/// Parsing is lenient: invalid constructs are skipped.
pub fn compile(css: &str) -> Ast {
    let cleaned = strip_comments(css);
    let items = parse_items(&cleaned);

    let mut ast = Ast::new();
    let scope = Scope {
        selectors: &[],
        rule: None,
        slot: Slot::Root,
        owner: None,
    };
    Flattener { ast: &mut ast }.emit_block(&items, &scope);
    ast
}

// =============================================================================
// Parsing
// =============================================================================

/// Nested CSS as written, before flattening.
#[derive(Debug, Clone, PartialEq)]
enum Item {
    Declaration {
        property: String,
        value: String,
    },
    Rule {
        prelude: String,
        body: Vec<Item>,
    },
    AtRule {
        name: String,
        prelude: String,
        body: Option<Vec<Item>>,
    },
}

fn parse_items(css: &str) -> Vec<Item> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    parse_body(&mut parser)
}

fn parse_body<'i>(input: &mut Parser<'i, '_>) -> Vec<Item> {
    let mut body_parser = BodyParser;
    let mut items = Vec::new();

    for result in RuleBodyParser::new(input, &mut body_parser) {
        match result {
            Ok(item) => items.push(item),
            Err((_, slice)) => tracing::debug!("skipping invalid CSS: {}", slice.trim()),
        }
    }

    items
}

/// Consume the rest of `input` and return its source text.
fn consume_rest<'i>(input: &mut Parser<'i, '_>) -> &'i str {
    let start = input.position();
    while input.next().is_ok() {}
    input.slice_from(start)
}

/// Parser for a rule body; also used at the top level.
struct BodyParser;

impl<'i> DeclarationParser<'i> for BodyParser {
    type Declaration = Item;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        loop {
            // A block means this was a selector like `a:hover { ... }`;
            // failing here lets the body parser retry it as a nested rule.
            let is_block = match input.next() {
                Ok(token) => matches!(token, Token::CurlyBracketBlock),
                Err(_) => break,
            };
            if is_block {
                return Err(input.new_custom_error(()));
            }
        }

        Ok(Item::Declaration {
            property: name.trim().to_string(),
            value: collapse_whitespace(input.slice_from(start)),
        })
    }
}

impl<'i> QualifiedRuleParser<'i> for BodyParser {
    type Prelude = String;
    type QualifiedRule = Item;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Ok(consume_rest(input).to_string())
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        Ok(Item::Rule {
            prelude,
            body: parse_body(input),
        })
    }
}

impl<'i> AtRuleParser<'i> for BodyParser {
    type Prelude = (String, String);
    type AtRule = Item;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Ok((
            name.to_ascii_lowercase(),
            collapse_whitespace(consume_rest(input)),
        ))
    }

    fn rule_without_block(
        &mut self,
        (name, prelude): Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        Ok(Item::AtRule {
            name,
            prelude,
            body: None,
        })
    }

    fn parse_block<'t>(
        &mut self,
        (name, prelude): Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        Ok(Item::AtRule {
            name,
            prelude,
            body: Some(parse_body(input)),
        })
    }
}

impl<'i> RuleBodyItemParser<'i, Item, ()> for BodyParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        true
    }
}

// =============================================================================
// Flattening
// =============================================================================

/// Resolve a selector list against the enclosing selectors.
///
/// Parts are expanded part-major: `a, b` inside `.x, .y` gives
/// `.x a, .y a, .x b, .y b`.
pub fn resolve_selectors(prelude: &str, parents: &[String]) -> Vec<String> {
    let parts = split_top_level_commas(prelude)
        .into_iter()
        .map(collapse_whitespace)
        .filter(|part| !part.is_empty());

    if parents.is_empty() {
        return parts.collect();
    }

    let mut resolved = Vec::new();
    for part in parts {
        for parent in parents {
            let selector = if part.contains('&') {
                part.replace('&', parent)
            } else {
                format!("{parent} {part}")
            };
            let selector = selector.trim();
            if !selector.is_empty() {
                resolved.push(selector.to_string());
            }
        }
    }
    resolved
}

/// Flattening context for one block.
struct Scope<'s> {
    /// Selectors nested rules resolve against; empty at the top level.
    selectors: &'s [String],
    /// Rule receiving declarations, if any.
    rule: Option<NodeId>,
    /// List receiving rules and at-rules.
    slot: Slot,
    /// Structural parent of nodes created in `slot`.
    owner: Option<NodeId>,
}

struct Flattener<'a> {
    ast: &'a mut Ast,
}

impl Flattener<'_> {
    fn emit_block(&mut self, items: &[Item], scope: &Scope<'_>) {
        for item in items {
            match item {
                Item::Declaration { property, value } => self.emit_declaration(property, value, scope),
                Item::Rule { prelude, body } => self.emit_rule(prelude, body, scope),
                Item::AtRule {
                    name,
                    prelude,
                    body,
                } => self.emit_at_rule(name, prelude, body.as_deref(), scope),
            }
        }
    }

    fn emit_declaration(&mut self, property: &str, value: &str, scope: &Scope<'_>) {
        let (slot, parent) = match scope.rule {
            Some(rule) => (Slot::Children(rule), Some(rule)),
            None => (scope.slot, scope.owner),
        };
        self.ast.alloc(
            Node {
                kind: NodeKind::Declaration,
                value: format!("{property}:{value};"),
                props: vec![property.to_string(), value.to_string()],
                children: Vec::new(),
                parent,
            },
            slot,
        );
    }

    fn emit_rule(&mut self, prelude: &str, body: &[Item], scope: &Scope<'_>) {
        let selectors = resolve_selectors(prelude, scope.selectors);
        if selectors.is_empty() {
            return;
        }

        let rule = self.ast.alloc(
            Node {
                kind: NodeKind::Rule,
                value: selectors.join(","),
                props: selectors.clone(),
                children: Vec::new(),
                parent: scope.rule.or(scope.owner),
            },
            scope.slot,
        );

        let inner = Scope {
            selectors: &selectors,
            rule: Some(rule),
            slot: scope.slot,
            owner: scope.owner,
        };
        self.emit_block(body, &inner);
    }

    fn emit_at_rule(&mut self, name: &str, prelude: &str, body: Option<&[Item]>, scope: &Scope<'_>) {
        let value = if prelude.is_empty() {
            format!("@{name}")
        } else {
            format!("@{name} {prelude}")
        };

        let at_rule = self.ast.alloc(
            Node {
                kind: NodeKind::AtRule(name.to_string()),
                value,
                props: vec![prelude.to_string()],
                children: Vec::new(),
                parent: scope.rule.or(scope.owner),
            },
            scope.slot,
        );

        let Some(body) = body else {
            return;
        };

        let slot = Slot::Children(at_rule);
        if GROUPING_AT_RULES.contains(&name) {
            // Inside a rule the enclosing selectors are re-applied through a
            // synthetic rule so bare declarations stay scoped.
            let rule = if scope.selectors.is_empty() {
                None
            } else {
                Some(self.ast.alloc(
                    Node {
                        kind: NodeKind::Rule,
                        value: scope.selectors.join(","),
                        props: scope.selectors.to_vec(),
                        children: Vec::new(),
                        parent: Some(at_rule),
                    },
                    slot,
                ))
            };
            let inner = Scope {
                selectors: scope.selectors,
                rule,
                slot,
                owner: Some(at_rule),
            };
            self.emit_block(body, &inner);
        } else {
            let relative = if name.starts_with(HONEY_AT_RULE_PREFIX) {
                "&"
            } else {
                ""
            };
            let selectors = [relative.to_string()];
            let inner = Scope {
                selectors: &selectors,
                rule: None,
                slot,
                owner: Some(at_rule),
            };
            self.emit_block(body, &inner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn describe(ast: &Ast) -> Vec<String> {
        fn walk(node: NodeRef<'_>, depth: usize, out: &mut Vec<String>) {
            out.push(format!("{}{}", "  ".repeat(depth), node.value()));
            for child in node.children() {
                walk(child, depth + 1, out);
            }
        }
        let mut out = Vec::new();
        for root in ast.roots() {
            walk(root, 0, &mut out);
        }
        out
    }

    #[test]
    fn test_compile_simple_rule() {
        let ast = compile(".a { color: red; margin: 1px  2px; }");
        assert_eq!(describe(&ast), vec![".a", "  color:red;", "  margin:1px 2px;"]);

        let rule = ast.roots().next().unwrap();
        assert!(rule.is_rule());
        let decl = rule.children().next().unwrap();
        assert_eq!(decl.property(), Some("color"));
        assert_eq!(decl.declared_value(), Some("red"));
        assert_eq!(decl.parent().map(|p| p.id()), Some(rule.id()));
    }

    #[test]
    fn test_nested_rules_are_flattened() {
        let ast = compile(".a{color:red;&:hover{color:blue}.b{margin:0}}");
        assert_eq!(
            describe(&ast),
            vec![".a", "  color:red;", ".a:hover", "  color:blue;", ".a .b", "  margin:0;"]
        );
    }

    #[test]
    fn test_nested_selector_lists_expand() {
        let ast = compile(".x,.y{a,&.b{top:0}}");
        let selectors: Vec<_> = ast.roots().map(|n| n.value().to_string()).collect();
        assert_eq!(selectors, vec![".x,.y", ".x a,.y a,.x.b,.y.b"]);
    }

    #[test]
    fn test_ident_selector_with_pseudo_class() {
        let ast = compile(".a{span:hover{color:red}}");
        assert_eq!(describe(&ast), vec![".a", ".a span:hover", "  color:red;"]);
    }

    #[test]
    fn test_media_inside_rule_wraps_parent_selector() {
        let ast = compile(".a{@media (min-width: 10px){color:red;.b{top:0}}}");
        assert_eq!(
            describe(&ast),
            vec![
                ".a",
                "@media (min-width: 10px)",
                "  .a",
                "    color:red;",
                "  .a .b",
                "    top:0;",
            ]
        );
        let media = ast.roots().nth(1).unwrap();
        assert_eq!(media.at_rule_name(), Some("media"));
        assert_eq!(media.prelude(), Some("(min-width: 10px)"));
        assert_eq!(media.parent().map(|p| p.value()), Some(".a"));
    }

    #[test]
    fn test_honey_at_rule_keeps_relative_children() {
        let ast = compile(".a{@honey-stack(2){gap:1;.c{top:0}}}");
        let at_rule = ast.roots().nth(1).unwrap();
        assert_eq!(at_rule.at_rule_name(), Some("honey-stack"));
        assert_eq!(at_rule.value(), "@honey-stack (2)");
        assert_eq!(at_rule.prelude(), Some("(2)"));
        assert_eq!(at_rule.parent().map(|p| p.value()), Some(".a"));

        let children: Vec<_> = at_rule.children().map(|c| c.value().to_string()).collect();
        assert_eq!(children, vec!["gap:1;", "& .c"]);
    }

    #[test]
    fn test_statement_at_rules() {
        let ast = compile("@import url(a.css);.a{@honey-center;}");
        let values: Vec<_> = ast.roots().map(|n| n.value().to_string()).collect();
        assert_eq!(values, vec!["@import url(a.css)", ".a", "@honey-center"]);
        assert!(!ast.roots().nth(2).unwrap().has_children());
    }

    #[test]
    fn test_comments_are_removed() {
        let ast = compile(".a{/* note */color:red;// trailing\n}");
        assert_eq!(describe(&ast), vec![".a", "  color:red;"]);
    }

    #[test]
    fn test_top_level_declarations() {
        let ast = compile("color: red;");
        assert_eq!(describe(&ast), vec!["color:red;"]);
    }

    #[test]
    fn test_keyframes_children_are_not_scoped() {
        let ast = compile(".a{@keyframes spin{from{top:0}to{top:1px}}}");
        let keyframes = ast.roots().nth(1).unwrap();
        let children: Vec<_> = keyframes.children().map(|c| c.value().to_string()).collect();
        assert_eq!(children, vec!["from", "to"]);
    }

    #[test]
    fn test_important_is_kept() {
        let ast = compile(".a{color:red !important}");
        let decl = ast.roots().next().unwrap().children().next().unwrap();
        assert_eq!(decl.value(), "color:red !important;");
    }

    #[test]
    fn test_resolve_selectors() {
        assert_eq!(resolve_selectors(".a", &[]), vec![".a"]);
        assert_eq!(resolve_selectors("&:hover", &[".a".into()]), vec![".a:hover"]);
        assert_eq!(resolve_selectors(".b", &["".into()]), vec![".b"]);
        assert_eq!(resolve_selectors(".b", &["&".into()]), vec!["& .b"]);
        assert_eq!(
            resolve_selectors("& + &", &[".a".into()]),
            vec![".a + .a"]
        );
    }
}
