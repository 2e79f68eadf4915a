//! ancestor:: and ancestor-or-self::
//!
//! Repeated parent hops. `include_self` only changes where the walk starts.

use std::sync::Arc;

use super::cursor::Stepper;
use super::parent_node;
use super::test::NodeTest;
use crate::tree::{NodePos, TreeStore};

#[derive(Debug, Clone)]
pub struct AncestorStep {
    next: Option<NodePos>,
}

impl AncestorStep {
    pub fn new(tree: &TreeStore, start: NodePos, include_self: bool) -> Self {
        let next = if include_self {
            Some(start)
        } else {
            parent_node(tree, start).map(NodePos::Node)
        };
        Self { next }
    }
}

impl Stepper for AncestorStep {
    fn step(&mut self, tree: &Arc<TreeStore>, test: &NodeTest) -> Option<NodePos> {
        while let Some(pos) = self.next {
            self.next = parent_node(tree, pos).map(NodePos::Node);
            if test.matches(tree, pos) {
                return Some(pos);
            }
        }
        None
    }
}
