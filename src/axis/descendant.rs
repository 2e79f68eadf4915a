//! descendant:: and descendant-or-self::
//!
//! Two strategies yield the same nodes:
//! - [`DescendantStep`] walks the subtree with `TreeStore::next_in_subtree`,
//!   needing no stack. Used for general tests.
//! - [`ElementScan`] runs down the node columns between the start node and
//!   the end of its subtree, comparing codes in place. Used when the test
//!   selects elements by fingerprint or by namespace.

use std::sync::Arc;

use super::cursor::Stepper;
use super::test::NodeTest;
use crate::name::{NameCode, UriCode};
use crate::tree::kind::kind_codes;
use crate::tree::{NodeKind, NodePos, TreeStore};

/// Generic "following node within the subtree" stepping
#[derive(Debug, Clone)]
pub struct DescendantStep {
    anchor: u32,
    last: Option<u32>,
    self_pending: Option<NodePos>,
    exhausted: bool,
}

impl DescendantStep {
    pub fn new(start: NodePos, include_self: bool) -> Self {
        let self_pending = include_self.then_some(start);
        match start {
            NodePos::Node(nr) => Self {
                anchor: nr,
                last: None,
                self_pending,
                exhausted: false,
            },
            _ => Self {
                anchor: 0,
                last: None,
                self_pending,
                exhausted: true,
            },
        }
    }
}

impl Stepper for DescendantStep {
    fn step(&mut self, tree: &Arc<TreeStore>, test: &NodeTest) -> Option<NodePos> {
        if let Some(pos) = self.self_pending.take() {
            if test.matches(tree, pos) {
                return Some(pos);
            }
        }
        if self.exhausted {
            return None;
        }
        loop {
            let from = self.last.unwrap_or(self.anchor);
            match tree.next_in_subtree(self.anchor, from) {
                Some(nr) => {
                    self.last = Some(nr);
                    if test.matches(tree, NodePos::Node(nr)) {
                        return Some(NodePos::Node(nr));
                    }
                }
                None => {
                    self.exhausted = true;
                    return None;
                }
            }
        }
    }
}

/// What an [`ElementScan`] compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanFilter {
    Fingerprint(NameCode),
    Namespace(UriCode),
}

impl ScanFilter {
    /// The scan filter equivalent to `test`, if there is one
    pub fn for_test(test: &NodeTest) -> Option<ScanFilter> {
        match test {
            NodeTest::Name {
                kind: NodeKind::Element,
                fingerprint,
            } => Some(ScanFilter::Fingerprint(*fingerprint)),
            NodeTest::Namespace {
                kind: NodeKind::Element,
                uri,
            } => Some(ScanFilter::Namespace(*uri)),
            _ => None,
        }
    }
}

/// Array scan over a subtree for elements with one name or namespace
#[derive(Debug, Clone)]
pub struct ElementScan {
    filter: ScanFilter,
    next: u32,
    end: u32,
    self_pending: Option<NodePos>,
}

impl ElementScan {
    pub fn new(tree: &TreeStore, start: NodePos, include_self: bool, filter: ScanFilter) -> Self {
        let self_pending = include_self.then_some(start);
        let (next, end) = match start {
            NodePos::Node(nr) => (nr + 1, tree.subtree_end(nr)),
            _ => (0, 0),
        };
        Self {
            filter,
            next,
            end,
            self_pending,
        }
    }

    #[inline]
    fn accepts(&self, tree: &TreeStore, nr: u32) -> bool {
        if tree.kind_code(nr) != kind_codes::ELEMENT {
            return false;
        }
        let code = tree.name_code(nr);
        match self.filter {
            ScanFilter::Fingerprint(fingerprint) => code == fingerprint && !code.is_none(),
            ScanFilter::Namespace(uri) => tree.name_pool().uri_code(code) == Some(uri),
        }
    }
}

impl Stepper for ElementScan {
    fn step(&mut self, tree: &Arc<TreeStore>, test: &NodeTest) -> Option<NodePos> {
        if let Some(pos) = self.self_pending.take() {
            if test.matches(tree, pos) {
                return Some(pos);
            }
        }
        while self.next < self.end {
            let nr = self.next;
            self.next += 1;
            if self.accepts(tree, nr) {
                return Some(NodePos::Node(nr));
            }
        }
        None
    }
}
