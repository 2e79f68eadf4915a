//! attribute::
//!
//! An element's attributes are contiguous in the attribute columns. A
//! single-name test can match at most one of them, so the walk ends at the
//! first match.

use std::ops::Range;
use std::sync::Arc;

use super::cursor::Stepper;
use super::test::NodeTest;
use crate::tree::{NodePos, TreeStore};

#[derive(Debug, Clone)]
pub struct AttributeStep {
    range: Range<u32>,
}

impl AttributeStep {
    pub fn new(tree: &TreeStore, start: NodePos) -> Self {
        let range = match start {
            NodePos::Node(nr) => tree.attribute_range(nr),
            _ => 0..0,
        };
        Self { range }
    }
}

impl Stepper for AttributeStep {
    fn step(&mut self, tree: &Arc<TreeStore>, test: &NodeTest) -> Option<NodePos> {
        while let Some(idx) = self.range.next() {
            let pos = NodePos::Attribute(idx);
            if test.matches(tree, pos) {
                if test.is_single_name() {
                    self.range.start = self.range.end;
                }
                return Some(pos);
            }
        }
        None
    }
}
