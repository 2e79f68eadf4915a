//! Axis Iterators
//!
//! All 13 XPath axes over a [`TreeStore`](crate::tree::TreeStore):
//! - child, parent, self
//! - descendant, descendant-or-self
//! - ancestor, ancestor-or-self
//! - following, following-sibling
//! - preceding, preceding-sibling
//! - attribute, namespace
//!
//! Every axis is a small stepping state ([`Stepper`]) driven by a shared
//! [`Cursor`], which adds the node test, position tracking, lookahead and
//! restart. Nothing is materialized: each `next()` computes one step from
//! the tree's pointer columns.

pub mod ancestor;
pub mod attribute;
pub mod cursor;
pub mod descendant;
pub mod following;
pub mod iter;
pub mod namespace;
pub mod sibling;
pub mod single;

pub use cursor::{Cursor, Stepper};
pub use iter::{iterate_axis, AxisIterator};
pub use namespace::InScopeNamespaces;
pub use test::NodeTest;

use std::iter::FusedIterator;

use crate::tree::{NodeHandle, NodeKind, NodePos, TreeStore};

/// XPath axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Ancestor,
    AncestorOrSelf,
    Attribute,
    Child,
    Descendant,
    DescendantOrSelf,
    Following,
    FollowingSibling,
    Namespace,
    Parent,
    Preceding,
    PrecedingSibling,
    Self_,
}

impl Axis {
    pub const ALL: [Axis; 13] = [
        Axis::Ancestor,
        Axis::AncestorOrSelf,
        Axis::Attribute,
        Axis::Child,
        Axis::Descendant,
        Axis::DescendantOrSelf,
        Axis::Following,
        Axis::FollowingSibling,
        Axis::Namespace,
        Axis::Parent,
        Axis::Preceding,
        Axis::PrecedingSibling,
        Axis::Self_,
    ];

    /// Reverse axes yield nodes in reverse document order
    #[inline]
    pub const fn is_reverse(self) -> bool {
        matches!(
            self,
            Axis::Ancestor
                | Axis::AncestorOrSelf
                | Axis::Parent
                | Axis::Preceding
                | Axis::PrecedingSibling
        )
    }

    #[inline]
    pub const fn is_forward(self) -> bool {
        !self.is_reverse()
    }

    /// Kind a bare name test selects on this axis
    pub const fn principal_node_kind(self) -> NodeKind {
        match self {
            Axis::Attribute => NodeKind::Attribute,
            Axis::Namespace => NodeKind::Namespace,
            _ => NodeKind::Element,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Axis::Ancestor => "ancestor",
            Axis::AncestorOrSelf => "ancestor-or-self",
            Axis::Attribute => "attribute",
            Axis::Child => "child",
            Axis::Descendant => "descendant",
            Axis::DescendantOrSelf => "descendant-or-self",
            Axis::Following => "following",
            Axis::FollowingSibling => "following-sibling",
            Axis::Namespace => "namespace",
            Axis::Parent => "parent",
            Axis::Preceding => "preceding",
            Axis::PrecedingSibling => "preceding-sibling",
            Axis::Self_ => "self",
        }
    }

    pub fn from_name(name: &str) -> Option<Axis> {
        Axis::ALL.into_iter().find(|axis| axis.name() == name)
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Operations every axis iterator offers on top of `Iterator`
pub trait AxisIter: Iterator<Item = NodeHandle> + FusedIterator {
    /// Items yielded so far (0 before the first), or `None` once exhausted
    fn position(&self) -> Option<usize>;

    /// The node most recently yielded; `None` before the start and at the end
    fn current(&self) -> Option<&NodeHandle>;

    /// Fresh iterator over the same axis, start node and test
    fn another(&self) -> Self
    where
        Self: Sized;

    /// Whether another node would be yielded, without consuming it
    fn has_next(&self) -> bool;
}

/// Owning node of a position: parent for tree nodes, element for
/// attributes and namespaces
pub(crate) fn parent_node(tree: &TreeStore, pos: NodePos) -> Option<u32> {
    match pos {
        NodePos::Node(nr) => tree.parent_of(nr),
        NodePos::Attribute(idx) => Some(tree.attribute_parent(idx)),
        NodePos::Namespace { parent, .. } => Some(parent),
    }
}
