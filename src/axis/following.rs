//! following:: and preceding::
//!
//! Node numbers are document order, so both axes are plain runs over the
//! node columns: following starts after the subtree of the start node,
//! preceding counts down from it and steps over its ancestors.

use std::sync::Arc;

use super::cursor::Stepper;
use super::parent_node;
use super::test::NodeTest;
use crate::tree::{NodePos, TreeStore};

#[derive(Debug, Clone)]
pub struct FollowingStep {
    next: u32,
}

impl FollowingStep {
    pub fn new(tree: &TreeStore, start: NodePos) -> Self {
        let next = match start {
            NodePos::Node(nr) => tree.subtree_end(nr),
            // Everything after the owning element's start tag
            NodePos::Attribute(idx) => tree.attribute_parent(idx) + 1,
            NodePos::Namespace { parent, .. } => parent + 1,
        };
        Self { next }
    }
}

impl Stepper for FollowingStep {
    fn step(&mut self, tree: &Arc<TreeStore>, test: &NodeTest) -> Option<NodePos> {
        let len = tree.len() as u32;
        while self.next < len {
            let nr = self.next;
            self.next += 1;
            if test.matches(tree, NodePos::Node(nr)) {
                return Some(NodePos::Node(nr));
            }
        }
        None
    }
}

#[derive(Debug, Clone)]
pub struct PrecedingStep {
    /// Exclusive upper bound of the nodes still to visit
    next: u32,
    /// Next ancestor to step over
    ancestor: Option<u32>,
}

impl PrecedingStep {
    pub fn new(tree: &TreeStore, start: NodePos) -> Self {
        // An attribute or namespace precedes nothing its element does not
        let nr = match start {
            NodePos::Node(nr) => nr,
            _ => parent_node(tree, start).unwrap_or(0),
        };
        Self {
            next: nr,
            ancestor: tree.parent_of(nr),
        }
    }
}

impl Stepper for PrecedingStep {
    fn step(&mut self, tree: &Arc<TreeStore>, test: &NodeTest) -> Option<NodePos> {
        while self.next > 0 {
            self.next -= 1;
            let nr = self.next;
            if self.ancestor == Some(nr) {
                self.ancestor = tree.parent_of(nr);
                continue;
            }
            if test.matches(tree, NodePos::Node(nr)) {
                return Some(NodePos::Node(nr));
            }
        }
        None
    }
}
