//! self:: and parent:: - at most one node

use std::sync::Arc;

use super::cursor::Stepper;
use super::parent_node;
use super::test::NodeTest;
use crate::tree::{NodePos, TreeStore};

#[derive(Debug, Clone)]
pub struct SingleStep {
    pending: Option<NodePos>,
}

impl SingleStep {
    pub fn self_axis(start: NodePos) -> Self {
        Self {
            pending: Some(start),
        }
    }

    pub fn parent_axis(tree: &TreeStore, start: NodePos) -> Self {
        Self {
            pending: parent_node(tree, start).map(NodePos::Node),
        }
    }
}

impl Stepper for SingleStep {
    fn step(&mut self, tree: &Arc<TreeStore>, test: &NodeTest) -> Option<NodePos> {
        self.pending.take().filter(|&pos| test.matches(tree, pos))
    }
}
