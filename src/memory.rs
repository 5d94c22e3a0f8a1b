//! In-memory document tree.

use core::fmt;

use portable_atomic_util::Arc;
use spin::Mutex;

use crate::error::DocumentError;
use crate::Document;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Handle to a node of a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
enum Kind {
    Root,
    Fragment,
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
    Comment(String),
}

#[derive(Debug)]
struct NodeData {
    kind: Kind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Default)]
struct Tree {
    nodes: Vec<NodeData>,
}

/// A document kept entirely in memory.
///
/// Only available with the `testing` feature.
///
/// Clones share the same tree, so a test can hand one clone to a
/// [`Renderable`](crate::Renderable) and inspect the tree through another.
/// The markup parser is strict: unbalanced tags are a
/// [`DocumentError::Parse`] rather than being repaired.
///
/// Nodes live in an arena that only grows. Detached nodes, including the
/// staging element and fragment of every render, are never freed, so a
/// document is meant to last for one test or one short-lived render pass.
///
/// # Example
///
/// ```rust
/// use renderable::{Document, MemoryDocument};
///
/// let document = MemoryDocument::new();
/// let staging = document.create_element("body").unwrap();
/// document.set_inner_markup(&staging, "<p class=\"note\">hi</p>").unwrap();
///
/// let paragraph = document.first_element_child(&staging).unwrap();
/// document.append_child(&document.body(), &paragraph).unwrap();
///
/// assert_eq!(
///     document.inner_markup(document.body()),
///     r#"<p class="note">hi</p>"#
/// );
/// ```
#[derive(Clone)]
pub struct MemoryDocument {
    tree: Arc<Mutex<Tree>>,
    root: NodeId,
    body: NodeId,
}

impl MemoryDocument {
    /// Create a document holding an empty `<body>`.
    pub fn new() -> Self {
        let mut tree = Tree::default();
        let root = tree.push(Kind::Root);
        let body = tree.push(Kind::Element {
            tag: "body".to_string(),
            attributes: Vec::new(),
        });
        tree.adopt(root, body);

        Self {
            tree: Arc::new(Mutex::new(tree)),
            root,
            body,
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        let tree = self.tree.lock();
        tree.node(node)
            .map(|data| data.children.clone())
            .unwrap_or_default()
    }

    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.tree.lock().node(node).ok()?.parent
    }

    pub fn tag_name(&self, node: NodeId) -> Option<String> {
        match &self.tree.lock().node(node).ok()?.kind {
            Kind::Element { tag, .. } => Some(tag.clone()),
            _ => None,
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        match &self.tree.lock().node(node).ok()?.kind {
            Kind::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone()),
            _ => None,
        }
    }

    /// Whether `node` is reachable from the document root.
    pub fn is_attached(&self, node: NodeId) -> bool {
        let tree = self.tree.lock();
        tree.node(node).is_ok() && tree.contains(self.root, node)
    }

    /// Serialized children of `node`.
    pub fn inner_markup(&self, node: NodeId) -> String {
        let tree = self.tree.lock();
        let mut out = String::new();
        if let Ok(data) = tree.node(node) {
            for child in &data.children {
                tree.write(*child, &mut out);
            }
        }
        out
    }

    /// Serialized `node`, including itself.
    pub fn outer_markup(&self, node: NodeId) -> String {
        let tree = self.tree.lock();
        let mut out = String::new();
        if tree.node(node).is_ok() {
            tree.write(node, &mut out);
        }
        out
    }

    /// Number of attached elements whose id is `id`.
    pub fn count_by_id(&self, id: &str) -> usize {
        let tree = self.tree.lock();
        let mut count = 0;
        tree.walk(self.root, &mut |node| {
            if tree.has_id(node, id) {
                count += 1;
            }
            false
        });
        count
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryDocument")
            .field("body", &self.outer_markup(self.body))
            .finish()
    }
}

impl Document for MemoryDocument {
    type Node = NodeId;

    fn create_fragment(&self) -> Result<NodeId, DocumentError> {
        Ok(self.tree.lock().push(Kind::Fragment))
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, DocumentError> {
        Ok(self.tree.lock().push(Kind::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
        }))
    }

    fn set_inner_markup(&self, node: &NodeId, markup: &str) -> Result<(), DocumentError> {
        let parsed = Parser::new(markup).parse()?;

        let mut tree = self.tree.lock();
        match tree.node(*node)?.kind {
            Kind::Element { .. } | Kind::Fragment => {}
            _ => return Err(DocumentError::NotAnElement),
        }
        for child in tree.node(*node)?.children.clone() {
            tree.detach(child);
        }
        tree.build(*node, parsed);
        Ok(())
    }

    fn first_element_child(&self, node: &NodeId) -> Option<NodeId> {
        let tree = self.tree.lock();
        tree.node(*node)
            .ok()?
            .children
            .iter()
            .copied()
            .find(|child| matches!(tree.nodes[child.0].kind, Kind::Element { .. }))
    }

    fn element_child_count(&self, node: &NodeId) -> usize {
        let tree = self.tree.lock();
        tree.node(*node).map_or(0, |data| {
            data.children
                .iter()
                .filter(|child| matches!(tree.nodes[child.0].kind, Kind::Element { .. }))
                .count()
        })
    }

    fn set_id(&self, node: &NodeId, id: &str) -> Result<(), DocumentError> {
        let mut tree = self.tree.lock();
        match &mut tree.node_mut(*node)?.kind {
            Kind::Element { attributes, .. } => {
                match attributes.iter_mut().find(|(key, _)| key == "id") {
                    Some((_, value)) => *value = id.to_string(),
                    None => attributes.push(("id".to_string(), id.to_string())),
                }
                Ok(())
            }
            _ => Err(DocumentError::NotAnElement),
        }
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), DocumentError> {
        let mut tree = self.tree.lock();
        let index = tree.node(*parent)?.children.len();
        tree.insert(*parent, index, *child)
    }

    fn replace_child(&self, parent: &NodeId, new: &NodeId, old: &NodeId) -> Result<(), DocumentError> {
        let mut tree = self.tree.lock();
        tree.node(*new)?;
        let index = tree.position(*parent, *old)?;
        if new == old {
            return Ok(());
        }
        tree.detach(*old);
        tree.insert(*parent, index, *new)
    }

    fn remove_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), DocumentError> {
        let mut tree = self.tree.lock();
        tree.position(*parent, *child)?;
        tree.detach(*child);
        Ok(())
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let tree = self.tree.lock();
        let mut found = None;
        tree.walk(self.root, &mut |node| {
            if tree.has_id(node, id) {
                found = Some(node);
                return true;
            }
            false
        });
        found
    }
}

impl Tree {
    fn push(&mut self, kind: Kind) -> NodeId {
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    fn node(&self, id: NodeId) -> Result<&NodeData, DocumentError> {
        self.nodes.get(id.0).ok_or(DocumentError::UnknownNode)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData, DocumentError> {
        self.nodes.get_mut(id.0).ok_or(DocumentError::UnknownNode)
    }

    fn adopt(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != id);
        }
    }

    fn position(&self, parent: NodeId, child: NodeId) -> Result<usize, DocumentError> {
        self.node(child)?;
        self.node(parent)?
            .children
            .iter()
            .position(|candidate| *candidate == child)
            .ok_or(DocumentError::NotAChild)
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes[id.0].parent;
        }
        false
    }

    fn insert(&mut self, parent: NodeId, index: usize, node: NodeId) -> Result<(), DocumentError> {
        match self.node(parent)?.kind {
            Kind::Text(_) | Kind::Comment(_) => return Err(DocumentError::NotAnElement),
            _ => {}
        }
        let moved = match self.node(node)?.kind {
            Kind::Fragment => self.nodes[node.0].children.clone(),
            Kind::Root => return Err(DocumentError::Host("the root cannot be inserted".into())),
            _ => vec![node],
        };
        if self.contains(node, parent) {
            return Err(DocumentError::Host(
                "a node cannot be inserted into its own subtree".into(),
            ));
        }

        let mut index = index;
        for child in moved {
            if self.nodes[child.0].parent == Some(parent) {
                if let Ok(current) = self.position(parent, child) {
                    if current < index {
                        index -= 1;
                    }
                }
            }
            self.detach(child);
            self.nodes[child.0].parent = Some(parent);
            self.nodes[parent.0].children.insert(index, child);
            index += 1;
        }
        Ok(())
    }

    fn build(&mut self, parent: NodeId, parsed: Vec<Parsed>) {
        for node in parsed {
            let (kind, children) = match node {
                Parsed::Element {
                    tag,
                    attributes,
                    children,
                } => (Kind::Element { tag, attributes }, children),
                Parsed::Text(text) => (Kind::Text(text), Vec::new()),
                Parsed::Comment(text) => (Kind::Comment(text), Vec::new()),
            };
            let id = self.push(kind);
            self.adopt(parent, id);
            self.build(id, children);
        }
    }

    fn has_id(&self, node: NodeId, id: &str) -> bool {
        match &self.nodes[node.0].kind {
            Kind::Element { attributes, .. } => attributes
                .iter()
                .any(|(key, value)| key == "id" && value == id),
            _ => false,
        }
    }

    /// Depth-first, document-order walk. Stops once `visit` returns true.
    fn walk(&self, node: NodeId, visit: &mut dyn FnMut(NodeId) -> bool) -> bool {
        if visit(node) {
            return true;
        }
        self.nodes[node.0]
            .children
            .iter()
            .any(|child| self.walk(*child, &mut *visit))
    }

    fn write(&self, node: NodeId, out: &mut String) {
        let data = &self.nodes[node.0];
        match &data.kind {
            Kind::Root | Kind::Fragment => {
                for child in &data.children {
                    self.write(*child, out);
                }
            }
            Kind::Element { tag, attributes } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push_str(&format!(" {name}=\"{}\"", escape_attribute(value)));
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for child in &data.children {
                    self.write(*child, out);
                }
                out.push_str(&format!("</{tag}>"));
            }
            Kind::Text(text) => out.push_str(text),
            Kind::Comment(text) => out.push_str(&format!("<!--{text}-->")),
        }
    }
}

#[derive(Debug, PartialEq)]
enum Parsed {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<Parsed>,
    },
    Text(String),
    Comment(String),
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn parse(mut self) -> Result<Vec<Parsed>, DocumentError> {
        self.nodes(None)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn nodes(&mut self, open: Option<&str>) -> Result<Vec<Parsed>, DocumentError> {
        let mut nodes = Vec::new();
        loop {
            let rest = self.rest();
            if rest.is_empty() {
                return match open {
                    None => Ok(nodes),
                    Some(tag) => Err(parse_error(format!("unclosed <{tag}>"))),
                };
            }

            if let Some(comment) = rest.strip_prefix("<!--") {
                let end = comment
                    .find("-->")
                    .ok_or_else(|| parse_error("unterminated comment".to_string()))?;
                nodes.push(Parsed::Comment(comment[..end].to_string()));
                self.pos += 4 + end + 3;
            } else if rest.starts_with("</") {
                self.pos += 2;
                let name = self.name();
                self.skip_whitespace();
                self.expect('>')?;
                return match open {
                    Some(tag) if tag.eq_ignore_ascii_case(&name) => Ok(nodes),
                    _ => Err(parse_error(format!("unexpected </{name}>"))),
                };
            } else if rest.starts_with('<') && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
                nodes.push(self.element()?);
            } else {
                let skip = rest.chars().next().map_or(0, char::len_utf8);
                let len = rest[skip..].find('<').map_or(rest.len(), |i| i + skip);
                nodes.push(Parsed::Text(rest[..len].to_string()));
                self.pos += len;
            }
        }
    }

    fn element(&mut self) -> Result<Parsed, DocumentError> {
        self.pos += 1;
        let tag = self.name().to_ascii_lowercase();
        let mut attributes = Vec::new();

        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.is_empty() {
                return Err(parse_error(format!("unterminated <{tag}")));
            }
            if rest.starts_with("/>") {
                self.pos += 2;
                return Ok(Parsed::Element {
                    tag,
                    attributes,
                    children: Vec::new(),
                });
            }
            if rest.starts_with('>') {
                self.pos += 1;
                break;
            }

            let name = self.name();
            if name.is_empty() {
                return Err(parse_error(format!("unexpected character in <{tag}>")));
            }
            self.skip_whitespace();
            let value = if self.rest().starts_with('=') {
                self.pos += 1;
                self.skip_whitespace();
                self.attribute_value()?
            } else {
                String::new()
            };
            attributes.push((name.to_ascii_lowercase(), unescape_attribute(&value)));
        }

        let children = if VOID_ELEMENTS.contains(&tag.as_str()) {
            Vec::new()
        } else {
            self.nodes(Some(&tag))?
        };
        Ok(Parsed::Element {
            tag,
            attributes,
            children,
        })
    }

    fn name(&mut self) -> String {
        let rest = self.rest();
        let len = rest
            .find(|c: char| c.is_whitespace() || matches!(c, '=' | '>' | '/' | '<' | '"' | '\''))
            .unwrap_or(rest.len());
        self.pos += len;
        rest[..len].to_string()
    }

    fn attribute_value(&mut self) -> Result<String, DocumentError> {
        let rest = self.rest();
        match rest.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let end = rest[1..]
                    .find(quote)
                    .ok_or_else(|| parse_error("unterminated attribute value".to_string()))?;
                self.pos += end + 2;
                Ok(rest[1..end + 1].to_string())
            }
            _ => {
                let len = rest
                    .find(|c: char| c.is_whitespace() || c == '>')
                    .unwrap_or(rest.len());
                self.pos += len;
                Ok(rest[..len].to_string())
            }
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn expect(&mut self, c: char) -> Result<(), DocumentError> {
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            Ok(())
        } else {
            Err(parse_error(format!("expected `{c}`")))
        }
    }
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

fn unescape_attribute(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&#x2f;", "/")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

fn parse_error(message: String) -> DocumentError {
    DocumentError::Parse(message)
}
