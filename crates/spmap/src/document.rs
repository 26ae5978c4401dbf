//! Arena-backed document tree.
//!
//! A [`Document`] owns every [`Node`] in a single `Vec`; nodes refer to each
//! other through [`NodeId`] indices. There is exactly one root, an anonymous
//! Object at depth zero, created with the document. Children keep insertion
//! order, which is also the order the writer emits them in.
use alloc::{
    collections::BTreeSet,
    string::{String, ToString},
    vec,
    vec::Vec,
};
use core::fmt;

use bstr::{BStr, BString};

use crate::{
    error::DocumentError,
    options::{DocumentOptions, NamePolicy},
};

/// Handle to a node inside one [`Document`].
///
/// Handles are only meaningful for the document that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The root of every document.
    pub const ROOT: NodeId = NodeId(0);

    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Object,
    Array,
    NameValuePair,
    Value,
}

impl NodeKind {
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(self, Self::Object | Self::Array)
    }
}

/// Payload of a [`NodeKind::NameValuePair`] or [`NodeKind::Value`] node.
///
/// Text is a byte string and is written out byte for byte; it need not be
/// UTF-8.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(BString),
    Int(i32),
    Float(f32),
}

impl From<BString> for Scalar {
    fn from(v: BString) -> Self {
        Self::Text(v)
    }
}

impl From<&BStr> for Scalar {
    fn from(v: &BStr) -> Self {
        Self::Text(v.into())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Self::Text(v.into())
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::Text(v.into())
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i16> for Scalar {
    fn from(v: i16) -> Self {
        Self::Int(v.into())
    }
}

impl From<u8> for Scalar {
    fn from(v: u8) -> Self {
        Self::Int(v.into())
    }
}

impl From<f32> for Scalar {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: Option<String>,
    kind: NodeKind,
    scalar: Option<Scalar>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    depth: usize,
}

impl Node {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[must_use]
    pub fn scalar(&self) -> Option<&Scalar> {
        self.scalar.as_ref()
    }

    /// `None` only for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// An output document under construction.
///
/// # Examples
///
/// ```rust
/// use spmap::{Document, NodeKind};
///
/// let mut doc = Document::new();
/// let list = doc.create_node(doc.root(), Some("items"), NodeKind::Array).unwrap();
/// doc.push_value(list, 7).unwrap();
/// doc.push_name_value_pair_as_object(list, "name", "seven").unwrap();
///
/// assert_eq!(
///     doc.to_string(),
///     "{\n\t\"items\": [\n\t\t7,\n\t\t{\n\t\t\t\"name\": \"seven\"\n\t\t}\n\t]\n}"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    nodes: Vec<Node>,
    options: DocumentOptions,
    // Every name declared so far; only maintained under `NamePolicy::Document`.
    registry: BTreeSet<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(DocumentOptions::default())
    }

    #[must_use]
    pub fn with_options(options: DocumentOptions) -> Self {
        Self {
            nodes: vec![Node {
                name: None,
                kind: NodeKind::Object,
                scalar: None,
                parent: None,
                children: Vec::new(),
                depth: 0,
            }],
            options,
            registry: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    #[must_use]
    pub fn options(&self) -> DocumentOptions {
        self.options
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a document holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Children of `id` in insertion order; empty for unknown handles.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], Node::children)
    }

    /// First child of `parent` declaring `name`.
    #[must_use]
    pub fn child_by_name(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&child| self.nodes[child.0].name() == Some(name))
    }

    /// Adds a node of `kind` as the last child of `parent`.
    ///
    /// An empty name is treated as no name.
    ///
    /// # Errors
    ///
    /// - [`DocumentError::UnknownNode`] if `parent` is not in this document.
    /// - [`DocumentError::DuplicateName`] if `name` is already taken in the
    ///   scope the [`NamePolicy`] checks.
    ///
    /// The document is unchanged when an error is returned.
    pub fn create_node(
        &mut self,
        parent: NodeId,
        name: Option<&str>,
        kind: NodeKind,
    ) -> Result<NodeId, DocumentError> {
        let name = name.filter(|n| !n.is_empty());
        let parent_node = self
            .nodes
            .get(parent.0)
            .ok_or(DocumentError::UnknownNode(parent))?;

        let depth = parent_node.depth + 1;
        if let Some(name) = name {
            self.check_name(parent, parent_node, name)?;
            if self.options.name_policy == NamePolicy::Document {
                self.registry.insert(name.to_string());
            }
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.map(ToString::to_string),
            kind,
            scalar: None,
            parent: Some(parent),
            children: Vec::new(),
            depth,
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    fn check_name(
        &self,
        parent: NodeId,
        parent_node: &Node,
        name: &str,
    ) -> Result<(), DocumentError> {
        let taken = match self.options.name_policy {
            NamePolicy::Siblings => {
                parent_node.kind == NodeKind::Object
                    && parent_node
                        .children
                        .iter()
                        .any(|&c| self.nodes[c.0].name() == Some(name))
            }
            NamePolicy::Document => self.registry.contains(name),
        };
        if taken {
            return Err(DocumentError::DuplicateName {
                name: name.to_string(),
                parent,
            });
        }
        Ok(())
    }

    /// Replaces the payload of any node.
    ///
    /// The writer prints payloads wherever they are, so giving one to an
    /// Object or Array yields output that is not valid JSON.
    ///
    /// # Errors
    ///
    /// [`DocumentError::UnknownNode`] if `id` is not in this document.
    pub fn set_scalar(
        &mut self,
        id: NodeId,
        scalar: impl Into<Scalar>,
    ) -> Result<(), DocumentError> {
        let node = self
            .nodes
            .get_mut(id.0)
            .ok_or(DocumentError::UnknownNode(id))?;
        node.scalar = Some(scalar.into());
        Ok(())
    }

    /// Appends an anonymous Value carrying `scalar`.
    ///
    /// # Errors
    ///
    /// See [`Document::create_node`].
    pub fn push_value(
        &mut self,
        parent: NodeId,
        scalar: impl Into<Scalar>,
    ) -> Result<NodeId, DocumentError> {
        let id = self.create_node(parent, None, NodeKind::Value)?;
        self.nodes[id.0].scalar = Some(scalar.into());
        Ok(id)
    }

    /// Appends a `name: scalar` pair.
    ///
    /// # Errors
    ///
    /// See [`Document::create_node`].
    pub fn push_name_value_pair(
        &mut self,
        parent: NodeId,
        name: &str,
        scalar: impl Into<Scalar>,
    ) -> Result<NodeId, DocumentError> {
        let id = self.create_node(parent, Some(name), NodeKind::NameValuePair)?;
        self.nodes[id.0].scalar = Some(scalar.into());
        Ok(id)
    }

    /// Appends `{ name: scalar }` as an anonymous Object and returns the
    /// Object's handle.
    ///
    /// # Errors
    ///
    /// See [`Document::create_node`]. The wrapper is freshly created, so the
    /// inner pair can only collide under [`NamePolicy::Document`]; in that
    /// case the wrapper is removed again and the document is unchanged.
    pub fn push_name_value_pair_as_object(
        &mut self,
        parent: NodeId,
        name: &str,
        scalar: impl Into<Scalar>,
    ) -> Result<NodeId, DocumentError> {
        let object = self.create_node(parent, None, NodeKind::Object)?;
        if let Err(err) = self.push_name_value_pair(object, name, scalar) {
            self.nodes.pop();
            self.nodes[parent.0].children.pop();
            return Err(err);
        }
        Ok(object)
    }

    /// Panics if parent links, child lists or depths disagree, or if a name
    /// repeats in a scope the [`NamePolicy`] checks.
    #[cfg(any(test, feature = "fuzzing"))]
    pub fn assert_invariants(&self) {
        let mut seen = BTreeSet::new();
        for (index, node) in self.nodes.iter().enumerate() {
            let id = NodeId(index);
            match node.parent {
                None => assert_eq!(id, NodeId::ROOT, "only the root may lack a parent"),
                Some(parent) => {
                    let parent_node = &self.nodes[parent.0];
                    assert!(parent.0 < index, "{id} created before its parent {parent}");
                    assert_eq!(node.depth, parent_node.depth + 1, "depth of {id}");
                    assert_eq!(
                        parent_node.children.iter().filter(|&&c| c == id).count(),
                        1,
                        "{id} listed once under {parent}"
                    );
                }
            }
            for &child in &node.children {
                assert_eq!(self.nodes[child.0].parent, Some(id), "parent of {child}");
            }

            let Some(name) = node.name() else { continue };
            match self.options.name_policy {
                NamePolicy::Document => {
                    assert!(seen.insert(name), "`{name}` declared twice");
                }
                NamePolicy::Siblings => {
                    let Some(parent) = node.parent else { continue };
                    if self.nodes[parent.0].kind != NodeKind::Object {
                        continue;
                    }
                    let first = self.child_by_name(parent, name);
                    assert_eq!(first, Some(id), "`{name}` declared twice under {parent}");
                }
            }
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::writer::DocumentWriter::new(self).write_to(f)
    }
}

impl Document {
    /// Renders the document with text payloads copied byte for byte.
    ///
    /// `to_string` gives the same output whenever every payload is UTF-8.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        crate::writer::DocumentWriter::new(self).to_bytes()
    }
}
