//! The tagged document tree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Node kind. One closed set of tags covers every construct the dialect
/// knows about; the serialized names are the interchange contract and never
/// change even where the Rust names differ (`Html` is `"HTML"` on the wire,
/// the table parts are `"THead"`, `"TBody"`, `"Row"`, and `"Cell"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Document,
    Paragraph,
    Text,
    Image,
    #[serde(rename = "HTML")]
    Html,
    Heading,
    Link,
    List,
    ListItem,
    Admonition,
    Code,
    CodeFence,
    Bold,
    Emphasis,
    Comment,
    Snippet,
    Table,
    #[serde(rename = "THead")]
    TableHead,
    #[serde(rename = "TBody")]
    TableBody,
    #[serde(rename = "Row")]
    TableRow,
    #[serde(rename = "Cell")]
    TableCell,
}

/// A document tree node.
///
/// Interior constructs (documents, paragraphs, lists) carry `children`;
/// leaf constructs (text runs, code spans, fences) carry `literal`; both may
/// be present on the same node (a heading stores its title in `literal` and
/// its level in `attributes`). Attributes are an ordered string map so that
/// serialization and Markdown emission are deterministic.
///
/// On the wire a node is `{"type": …, "children": […], "text": "…",
/// "attributes": {…}}` with empty fields omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    #[serde(rename = "text", default, skip_serializing_if = "String::is_empty")]
    pub literal: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Node {
    /// Create an empty node of the given kind.
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            literal: String::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// Create a `Text` node holding the given literal.
    #[must_use]
    pub fn text(literal: impl Into<String>) -> Self {
        Self::with_literal(NodeKind::Text, literal)
    }

    /// Create a node of the given kind holding a literal payload.
    #[must_use]
    pub fn with_literal(kind: NodeKind, literal: impl Into<String>) -> Self {
        let mut node = Self::new(kind);
        node.literal = literal.into();
        node
    }

    /// Create a node of the given kind with the given children.
    #[must_use]
    pub fn with_children(kind: NodeKind, children: Vec<Node>) -> Self {
        let mut node = Self::new(kind);
        node.children = children;
        node
    }

    /// Add an attribute, builder style.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// True for an `HTML` node whose `tag` attribute equals `name`.
    #[must_use]
    pub fn is_tag(&self, name: &str) -> bool {
        self.kind == NodeKind::Html && self.attr("tag") == Some(name)
    }

    /// Find the first level-1 heading that carries an `id` attribute and
    /// return its `(title, id)` pair. Depth-first, document order.
    ///
    /// The planarizer uses this to name the flattened document.
    #[must_use]
    pub fn heading_with_id(&self) -> Option<(&str, &str)> {
        if self.kind == NodeKind::Heading && self.attr("level") == Some("1") {
            if let Some(id) = self.attr("id") {
                return Some((self.literal.as_str(), id));
            }
        }
        self.children.iter().find_map(Self::heading_with_id)
    }

    /// Title of the first level-1 heading, with or without an id.
    /// Depth-first, document order.
    #[must_use]
    pub fn heading_title(&self) -> Option<&str> {
        if self.kind == NodeKind::Heading && self.attr("level") == Some("1") {
            return Some(self.literal.as_str());
        }
        self.children.iter().find_map(|child| child.heading_title())
    }

    /// Depth-first traversal over the node and all descendants.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Depth-first traversal with mutable access to every node.
    ///
    /// A node is visited before its children, so children installed by
    /// `visit` are traversed too.
    pub fn walk_mut(&mut self, visit: &mut impl FnMut(&mut Node)) {
        visit(self);
        for child in &mut self.children {
            child.walk_mut(visit);
        }
    }

    /// Fallible depth-first traversal; stops at the first error.
    pub fn try_walk_mut<E>(
        &mut self,
        visit: &mut impl FnMut(&mut Node) -> Result<(), E>,
    ) -> Result<(), E> {
        visit(self)?;
        for child in &mut self.children {
            child.try_walk_mut(visit)?;
        }
        Ok(())
    }
}
