//! Node Handle - a cheap view of one node
//!
//! A handle is a shared reference to the tree plus a position. It owns no
//! node data; cloning one is a reference-count bump.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::kind::NodeKind;
use super::store::{TreeStore, XML_NAMESPACE_INDEX};
use crate::axis::{iterate_axis, Axis, AxisIterator, NodeTest};
use crate::error::{Result, TreeError};
use crate::name::{NameCode, NamespaceBinding, PrefixCode};

/// Where a node lives inside its tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodePos {
    /// Node number in the main sequence
    Node(u32),
    /// Index into the attribute columns
    Attribute(u32),
    /// Namespace node of element `parent`: index into the namespace columns,
    /// or [`XML_NAMESPACE_INDEX`] for the implicit `xml` binding
    Namespace { parent: u32, index: u32 },
}

impl NodePos {
    /// Key that sorts positions of one tree in document order: an element,
    /// then its namespaces, then its attributes, then its children
    fn order_key(self, tree: &TreeStore) -> (u32, u8, u32) {
        match self {
            NodePos::Node(nr) => (nr, 0, 0),
            NodePos::Namespace { parent, index } => (parent, 1, index),
            NodePos::Attribute(idx) => (tree.attribute_parent(idx), 2, idx),
        }
    }
}

/// Handle on one node of a [`TreeStore`]
#[derive(Clone)]
pub struct NodeHandle {
    tree: Arc<TreeStore>,
    pos: NodePos,
}

impl NodeHandle {
    pub(crate) fn new(tree: Arc<TreeStore>, pos: NodePos) -> Self {
        Self { tree, pos }
    }

    /// Handle on another position of the same tree
    #[inline]
    pub(crate) fn at(&self, pos: NodePos) -> Self {
        Self {
            tree: Arc::clone(&self.tree),
            pos,
        }
    }

    #[inline]
    pub fn tree(&self) -> &Arc<TreeStore> {
        &self.tree
    }

    #[inline]
    pub fn pos(&self) -> NodePos {
        self.pos
    }

    /// Node number, for nodes in the main sequence
    #[inline]
    pub fn node_number(&self) -> Option<u32> {
        match self.pos {
            NodePos::Node(nr) => Some(nr),
            _ => None,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self.pos {
            // Handles are never created for placeholders
            NodePos::Node(nr) => self.tree.node_kind(nr).unwrap_or(NodeKind::Element),
            NodePos::Attribute(_) => NodeKind::Attribute,
            NodePos::Namespace { .. } => NodeKind::Namespace,
        }
    }

    /// Name code of the node; [`NameCode::NONE`] for unnamed nodes.
    ///
    /// A namespace node is named by its prefix in no namespace; its code is
    /// only found if that name was ever allocated.
    pub fn fingerprint(&self) -> NameCode {
        match self.pos {
            NodePos::Node(nr) => self.tree.name_code(nr),
            NodePos::Attribute(idx) => self.tree.attribute_name_code(idx),
            NodePos::Namespace { .. } => self
                .namespace_binding()
                .filter(|b| !b.is_default())
                .and_then(|b| self.tree.name_pool().prefix(b.prefix))
                .and_then(|prefix| self.tree.name_pool().fingerprint("", &prefix))
                .unwrap_or(NameCode::NONE),
        }
    }

    /// The binding behind a namespace node
    pub fn namespace_binding(&self) -> Option<NamespaceBinding> {
        match self.pos {
            NodePos::Namespace { index, .. } => Some(self.tree.namespace_binding(index)),
            _ => None,
        }
    }

    fn prefix_code(&self) -> PrefixCode {
        match self.pos {
            NodePos::Node(nr) => self.tree.prefix_code(nr),
            NodePos::Attribute(idx) => self.tree.attribute_prefix_code(idx),
            NodePos::Namespace { .. } => PrefixCode::EMPTY,
        }
    }

    /// Local part of the name (a namespace node's prefix); `None` if unnamed
    pub fn local_name(&self) -> Option<Arc<str>> {
        if let Some(binding) = self.namespace_binding() {
            return self.tree.name_pool().prefix(binding.prefix);
        }
        let code = self.fingerprint();
        if code.is_none() {
            return None;
        }
        self.tree.name_pool().local_name(code)
    }

    /// Namespace URI of the name; `None` if unnamed
    pub fn uri(&self) -> Option<Arc<str>> {
        if self.namespace_binding().is_some() {
            return Some(Arc::from(""));
        }
        let code = self.fingerprint();
        if code.is_none() {
            return None;
        }
        self.tree.name_pool().uri(code)
    }

    /// Prefix the name was written with
    pub fn prefix(&self) -> Option<Arc<str>> {
        if !self.kind().is_named() {
            return None;
        }
        self.tree.name_pool().prefix(self.prefix_code())
    }

    /// Lexical `prefix:local` name; empty for unnamed nodes
    pub fn display_name(&self) -> String {
        if self.namespace_binding().is_some() {
            return self.local_name().map(|p| p.to_string()).unwrap_or_default();
        }
        let code = self.fingerprint();
        if code.is_none() {
            return String::new();
        }
        self.tree
            .name_pool()
            .display_name(self.prefix_code(), code)
            .unwrap_or_default()
    }

    pub fn string_value(&self) -> Cow<'_, str> {
        match self.pos {
            NodePos::Node(nr) => self.tree.string_value(nr),
            NodePos::Attribute(idx) => Cow::Borrowed(self.tree.attribute_value_at(idx)),
            NodePos::Namespace { index, .. } => {
                let uri = self.tree.namespace_binding(index).uri;
                Cow::Owned(
                    self.tree
                        .name_pool()
                        .uri_str(uri)
                        .map(|u| u.to_string())
                        .unwrap_or_default(),
                )
            }
        }
    }

    /// Distance from the root; attributes and namespaces sit one below
    /// their element
    pub fn depth(&self) -> u16 {
        match self.pos {
            NodePos::Node(nr) => self.tree.depth(nr),
            NodePos::Attribute(idx) => self.tree.depth(self.tree.attribute_parent(idx)) + 1,
            NodePos::Namespace { parent, .. } => self.tree.depth(parent) + 1,
        }
    }

    pub fn parent(&self) -> Option<NodeHandle> {
        let parent = match self.pos {
            NodePos::Node(nr) => self.tree.parent_of(nr)?,
            NodePos::Attribute(idx) => self.tree.attribute_parent(idx),
            NodePos::Namespace { parent, .. } => parent,
        };
        Some(self.at(NodePos::Node(parent)))
    }

    pub fn first_child(&self) -> Option<NodeHandle> {
        let nr = self.node_number()?;
        let child = self.tree.first_child_of(nr)?;
        Some(self.at(NodePos::Node(child)))
    }

    pub fn next_sibling(&self) -> Option<NodeHandle> {
        let nr = self.node_number()?;
        let sibling = self.tree.next_sibling_of(nr)?;
        Some(self.at(NodePos::Node(sibling)))
    }

    pub fn previous_sibling(&self) -> Option<NodeHandle> {
        let nr = self.node_number()?;
        let sibling = self.tree.previous_sibling_of(nr)?;
        Some(self.at(NodePos::Node(sibling)))
    }

    /// Root of the tree this node belongs to
    pub fn root(&self) -> NodeHandle {
        self.at(NodePos::Node(0))
    }

    /// Node number of this node, or of the element owning an attribute or
    /// namespace
    fn owner_number(&self) -> u32 {
        match self.pos {
            NodePos::Node(nr) => nr,
            NodePos::Attribute(idx) => self.tree.attribute_parent(idx),
            NodePos::Namespace { parent, .. } => parent,
        }
    }

    /// True for an attribute registered as an ID
    pub fn is_id(&self) -> bool {
        matches!(self.pos, NodePos::Attribute(idx) if self.tree.is_id_attribute(idx))
    }

    /// Source line, when the tree was built with line numbering. Attributes
    /// and namespaces report their element's line.
    pub fn line_number(&self) -> Option<u32> {
        self.tree.line_number(self.owner_number())
    }

    pub fn column_number(&self) -> Option<u32> {
        self.tree.column_number(self.owner_number())
    }

    /// System ID of the entity this node came from
    pub fn system_id(&self) -> Option<&str> {
        self.tree.system_id(self.owner_number())
    }

    /// Attributes of an element, in stored order
    pub fn attributes(&self) -> impl Iterator<Item = NodeHandle> + '_ {
        let range = self
            .node_number()
            .map(|nr| self.tree.attribute_range(nr))
            .unwrap_or(0..0);
        range.map(move |idx| self.at(NodePos::Attribute(idx)))
    }

    /// Value of this element's attribute with the given fingerprint
    pub fn attribute_value(&self, name: NameCode) -> Option<&str> {
        self.tree.attribute_value(self.node_number()?, name)
    }

    /// Declarations physically present on this element
    pub fn declared_namespaces(&self) -> &[NamespaceBinding] {
        match self.node_number() {
            Some(nr) => self.tree.declared_namespaces(nr),
            None => &[],
        }
    }

    /// Copy this element's declarations into a reusable buffer
    pub fn copy_declared_namespaces(&self, buffer: &mut Vec<NamespaceBinding>) -> usize {
        match self.node_number() {
            Some(nr) => self.tree.copy_declared_namespaces(nr, buffer),
            None => {
                buffer.clear();
                0
            }
        }
    }

    /// Namespaces in scope on this element, closest declaration first,
    /// without the implicit `xml` binding
    pub fn in_scope_namespaces(&self) -> Vec<NamespaceBinding> {
        match self.node_number() {
            Some(nr) if self.tree.is_element(nr) => self.tree.in_scope_namespaces(nr).collect(),
            _ => Vec::new(),
        }
    }

    /// Iterate `axis` from this node, keeping nodes that pass `test`
    pub fn iterate_axis(&self, axis: Axis, test: NodeTest) -> AxisIterator {
        iterate_axis(self, axis, test)
    }

    /// Identity comparison
    #[inline]
    pub fn is_same_node(&self, other: &NodeHandle) -> bool {
        self == other
    }

    /// Document order of two nodes of the same tree
    pub fn compare_order(&self, other: &NodeHandle) -> Result<Ordering> {
        if !Arc::ptr_eq(&self.tree, &other.tree) {
            return Err(TreeError::ForeignNode);
        }
        Ok(self
            .pos
            .order_key(&self.tree)
            .cmp(&other.pos.order_key(&self.tree)))
    }

    /// True if this node is a proper ancestor of `other`
    pub fn is_ancestor_of(&self, other: &NodeHandle) -> bool {
        if !Arc::ptr_eq(&self.tree, &other.tree) {
            return false;
        }
        let Some(nr) = self.node_number() else {
            return false;
        };
        match other.pos {
            NodePos::Node(n) => self.tree.is_ancestor(nr, n),
            NodePos::Attribute(idx) => {
                let owner = self.tree.attribute_parent(idx);
                owner == nr || self.tree.is_ancestor(nr, owner)
            }
            NodePos::Namespace { parent, .. } => parent == nr || self.tree.is_ancestor(nr, parent),
        }
    }

    /// Identifier unique across all trees in the process, stable for the
    /// lifetime of the tree
    pub fn generate_id(&self) -> String {
        let doc = self.tree.document_number();
        match self.pos {
            NodePos::Node(nr) => format!("d{doc}n{nr}"),
            NodePos::Attribute(idx) => format!("d{doc}a{idx}"),
            NodePos::Namespace { parent, index } if index == XML_NAMESPACE_INDEX => {
                format!("d{doc}n{parent}x")
            }
            NodePos::Namespace { parent, index } => format!("d{doc}n{parent}s{index}"),
        }
    }
}

impl PartialEq for NodeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos && Arc::ptr_eq(&self.tree, &other.tree)
    }
}

impl Eq for NodeHandle {}

impl Hash for NodeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tree.document_number().hash(state);
        self.pos.hash(state);
    }
}

impl fmt::Debug for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeHandle")
            .field("document", &self.tree.document_number())
            .field("pos", &self.pos)
            .field("kind", &self.kind())
            .field("name", &self.display_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::{NamePool, QName};
    use crate::tree::builder::{BuilderConfig, TreeBuilder};
    use std::collections::HashSet;

    fn sample() -> (Arc<NamePool>, Arc<TreeStore>) {
        let pool = Arc::new(NamePool::new());
        let mut b = TreeBuilder::with_config(BuilderConfig::default().with_name_pool(pool.clone()));
        b.start_document().unwrap();
        b.start_element(QName::new("h", "urn:h", "html")).unwrap();
        b.namespace("h", "urn:h").unwrap();
        b.attribute(QName::local("lang"), "en").unwrap();
        b.start_element(QName::new("h", "urn:h", "body")).unwrap();
        b.characters("hi").unwrap();
        b.end_element().unwrap();
        b.comment("c").unwrap();
        b.end_element().unwrap();
        b.end_document().unwrap();
        (pool, b.finish().unwrap())
    }

    #[test]
    fn test_names() {
        let (pool, tree) = sample();
        let html = tree.node(1).unwrap();
        assert_eq!(html.kind(), NodeKind::Element);
        assert_eq!(html.local_name().as_deref(), Some("html"));
        assert_eq!(html.uri().as_deref(), Some("urn:h"));
        assert_eq!(html.prefix().as_deref(), Some("h"));
        assert_eq!(html.display_name(), "h:html");
        assert_eq!(html.fingerprint(), pool.fingerprint("urn:h", "html").unwrap());

        let text = tree.node(3).unwrap();
        assert_eq!(text.kind(), NodeKind::Text);
        assert_eq!(text.local_name(), None);
        assert_eq!(text.display_name(), "");
        assert_eq!(text.prefix(), None);
    }

    #[test]
    fn test_navigation() {
        let (_, tree) = sample();
        let doc = tree.root();
        let html = doc.first_child().unwrap();
        let body = html.first_child().unwrap();
        let comment = body.next_sibling().unwrap();
        assert_eq!(comment.kind(), NodeKind::Comment);
        assert_eq!(comment.previous_sibling(), Some(body.clone()));
        assert_eq!(body.parent(), Some(html.clone()));
        assert_eq!(doc.parent(), None);
        assert_eq!(comment.root(), doc);
        assert_eq!(body.depth(), 2);
    }

    #[test]
    fn test_attributes() {
        let (pool, tree) = sample();
        let html = tree.node(1).unwrap();
        let attrs: Vec<_> = html.attributes().collect();
        assert_eq!(attrs.len(), 1);
        let lang = &attrs[0];
        assert_eq!(lang.kind(), NodeKind::Attribute);
        assert_eq!(lang.string_value(), "en");
        assert_eq!(lang.parent(), Some(html.clone()));
        assert_eq!(lang.depth(), 2);
        let code = pool.fingerprint("", "lang").unwrap();
        assert_eq!(html.attribute_value(code), Some("en"));
        assert!(tree.node(2).unwrap().attributes().next().is_none());
    }

    #[test]
    fn test_namespaces() {
        let (pool, tree) = sample();
        let html = tree.node(1).unwrap();
        let body = tree.node(2).unwrap();
        assert_eq!(html.declared_namespaces().len(), 1);
        assert!(body.declared_namespaces().is_empty());

        let mut buffer = vec![NamespaceBinding::XML; 4];
        assert_eq!(body.copy_declared_namespaces(&mut buffer), 0);
        assert!(buffer.is_empty());
        assert_eq!(html.copy_declared_namespaces(&mut buffer), 1);

        let in_scope = body.in_scope_namespaces();
        assert_eq!(in_scope.len(), 1);
        assert_eq!(
            in_scope[0].resolve(&pool),
            Some(("h".to_string(), "urn:h".to_string()))
        );
    }

    #[test]
    fn test_identity_and_order() {
        let (_, tree) = sample();
        let html = tree.node(1).unwrap();
        let again = tree.node(1).unwrap();
        let attr = html.attributes().next().unwrap();
        let body = tree.node(2).unwrap();
        assert!(html.is_same_node(&again));
        assert_eq!(html.compare_order(&attr).unwrap(), Ordering::Less);
        assert_eq!(attr.compare_order(&body).unwrap(), Ordering::Less);
        assert_eq!(body.compare_order(&html).unwrap(), Ordering::Greater);

        let mut set = HashSet::new();
        set.insert(html.clone());
        assert!(set.contains(&again));
        assert!(!set.contains(&body));
    }

    #[test]
    fn test_foreign_nodes() {
        let (_, a) = sample();
        let (_, b) = sample();
        let x = a.root();
        let y = b.root();
        assert_ne!(x, y);
        assert!(matches!(x.compare_order(&y), Err(TreeError::ForeignNode)));
        assert!(!x.is_ancestor_of(&b.node(1).unwrap()));
    }

    #[test]
    fn test_ancestry() {
        let (_, tree) = sample();
        let doc = tree.root();
        let html = tree.node(1).unwrap();
        let attr = html.attributes().next().unwrap();
        let text = tree.node(3).unwrap();
        assert!(doc.is_ancestor_of(&text));
        assert!(html.is_ancestor_of(&attr));
        assert!(doc.is_ancestor_of(&attr));
        assert!(!text.is_ancestor_of(&html));
        assert!(!html.is_ancestor_of(&html));
    }

    #[test]
    fn test_generate_id() {
        let (_, tree) = sample();
        let html = tree.node(1).unwrap();
        let attr = html.attributes().next().unwrap();
        let doc = tree.document_number();
        assert_eq!(html.generate_id(), format!("d{doc}n1"));
        assert_eq!(attr.generate_id(), format!("d{doc}a0"));
        assert_ne!(html.generate_id(), tree.node(2).unwrap().generate_id());
    }
}
