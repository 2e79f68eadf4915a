//! child::, following-sibling:: and preceding-sibling::
//!
//! Forward stepping follows `next` pointers until one points backwards (an
//! owner link), passing over parent-pointer placeholders. Attributes and
//! namespaces have no siblings and no children.

use std::sync::Arc;

use super::cursor::Stepper;
use super::test::NodeTest;
use crate::tree::{NodePos, TreeStore};

/// Forward walk along one sibling chain
#[derive(Debug, Clone)]
pub struct SiblingStep {
    next: Option<u32>,
}

impl SiblingStep {
    pub fn children(tree: &TreeStore, start: NodePos) -> Self {
        let next = match start {
            NodePos::Node(nr) => tree.first_child_of(nr),
            _ => None,
        };
        Self { next }
    }

    pub fn following(tree: &TreeStore, start: NodePos) -> Self {
        let next = match start {
            NodePos::Node(nr) => tree.next_sibling_of(nr),
            _ => None,
        };
        Self { next }
    }
}

impl Stepper for SiblingStep {
    fn step(&mut self, tree: &Arc<TreeStore>, test: &NodeTest) -> Option<NodePos> {
        while let Some(nr) = self.next {
            self.next = tree.next_sibling_of(nr);
            if test.matches(tree, NodePos::Node(nr)) {
                return Some(NodePos::Node(nr));
            }
        }
        None
    }
}

/// Backward walk along one sibling chain, closest sibling first
#[derive(Debug, Clone)]
pub struct PrecedingSiblingStep {
    next: Option<u32>,
}

impl PrecedingSiblingStep {
    pub fn new(tree: &TreeStore, start: NodePos) -> Self {
        let next = match start {
            NodePos::Node(nr) => tree.previous_sibling_of(nr),
            _ => None,
        };
        Self { next }
    }
}

impl Stepper for PrecedingSiblingStep {
    fn step(&mut self, tree: &Arc<TreeStore>, test: &NodeTest) -> Option<NodePos> {
        while let Some(nr) = self.next {
            self.next = tree.previous_sibling_of(nr);
            if test.matches(tree, NodePos::Node(nr)) {
                return Some(NodePos::Node(nr));
            }
        }
        None
    }
}
