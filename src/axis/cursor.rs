//! Cursor - the iterator shell shared by every axis
//!
//! A cursor keeps the stepping state it started from, so `another()` is a
//! clone of that state and `has_next()` is one step taken on a scratch copy.

use std::iter::FusedIterator;
use std::sync::Arc;

use super::test::NodeTest;
use super::AxisIter;
use crate::tree::{NodeHandle, NodePos, TreeStore};

/// One axis's stepping algorithm
pub trait Stepper: Clone {
    /// Advance to the next position that passes `test`, or `None` at the end
    fn step(&mut self, tree: &Arc<TreeStore>, test: &NodeTest) -> Option<NodePos>;
}

/// Axis iterator over a [`Stepper`]
#[derive(Debug, Clone)]
pub struct Cursor<S: Stepper> {
    tree: Arc<TreeStore>,
    test: NodeTest,
    initial: S,
    state: S,
    current: Option<NodeHandle>,
    position: usize,
    done: bool,
}

impl<S: Stepper> Cursor<S> {
    pub(crate) fn new(tree: Arc<TreeStore>, test: NodeTest, initial: S) -> Self {
        Self {
            tree,
            test,
            state: initial.clone(),
            initial,
            current: None,
            position: 0,
            done: false,
        }
    }

    #[inline]
    pub fn test(&self) -> &NodeTest {
        &self.test
    }
}

impl<S: Stepper> Iterator for Cursor<S> {
    type Item = NodeHandle;

    fn next(&mut self) -> Option<NodeHandle> {
        if self.done {
            return None;
        }
        match self.state.step(&self.tree, &self.test) {
            Some(pos) => {
                self.position += 1;
                let node = NodeHandle::new(Arc::clone(&self.tree), pos);
                self.current = Some(node.clone());
                Some(node)
            }
            None => {
                self.done = true;
                self.current = None;
                None
            }
        }
    }
}

impl<S: Stepper> FusedIterator for Cursor<S> {}

impl<S: Stepper> AxisIter for Cursor<S> {
    fn position(&self) -> Option<usize> {
        (!self.done).then_some(self.position)
    }

    fn current(&self) -> Option<&NodeHandle> {
        self.current.as_ref()
    }

    fn another(&self) -> Self {
        Self::new(
            Arc::clone(&self.tree),
            self.test.clone(),
            self.initial.clone(),
        )
    }

    fn has_next(&self) -> bool {
        !self.done && self.state.clone().step(&self.tree, &self.test).is_some()
    }
}
