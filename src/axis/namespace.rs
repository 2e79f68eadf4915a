//! Namespace Scope Resolver and namespace::
//!
//! In-scope namespaces are never stored. They are found by walking the
//! declarations of the element, then its parent, and so on outwards,
//! remembering which prefixes have been decided:
//! - a prefix already decided by a closer element is skipped
//! - an empty URI decides the prefix as unbound and is not reported
//! - anything else is reported and decides the prefix
//!
//! The implicit `xml` binding is not part of the walk. The namespace axis
//! appends it after the walk ends.

use std::sync::Arc;

use smallvec::SmallVec;

use super::cursor::Stepper;
use super::test::NodeTest;
use crate::name::{NamespaceBinding, PrefixCode};
use crate::tree::{NodePos, TreeStore, XML_NAMESPACE_INDEX};

/// Resumable position of an outward scope walk
#[derive(Debug, Clone)]
pub struct ScopeWalk {
    /// Element whose declarations are being read
    element: Option<u32>,
    /// Next namespace index to read on that element
    index: u32,
    decided: SmallVec<[PrefixCode; 8]>,
}

impl ScopeWalk {
    pub fn new(tree: &TreeStore, element: u32) -> Self {
        let element = tree.is_element(element).then_some(element);
        let index = element.map_or(0, |e| tree.namespace_range(e).start);
        Self {
            element,
            index,
            decided: SmallVec::new(),
        }
    }

    /// Namespace index of the next in-scope binding
    pub fn step(&mut self, tree: &TreeStore) -> Option<u32> {
        while let Some(element) = self.element {
            let range = tree.namespace_range(element);
            while self.index < range.end {
                let idx = self.index;
                self.index += 1;
                let binding = tree.namespace_binding(idx);
                if self.decided.contains(&binding.prefix) {
                    continue;
                }
                self.decided.push(binding.prefix);
                if !binding.is_undeclaration() {
                    return Some(idx);
                }
            }
            self.element = tree
                .parent_of(element)
                .filter(|&parent| tree.is_element(parent));
            self.index = self.element.map_or(0, |e| tree.namespace_range(e).start);
        }
        None
    }
}

/// In-scope namespace bindings of one element, closest declaration first
#[derive(Debug, Clone)]
pub struct InScopeNamespaces<'a> {
    tree: &'a TreeStore,
    walk: ScopeWalk,
}

impl<'a> InScopeNamespaces<'a> {
    pub fn new(tree: &'a TreeStore, element: u32) -> Self {
        Self {
            tree,
            walk: ScopeWalk::new(tree, element),
        }
    }
}

impl Iterator for InScopeNamespaces<'_> {
    type Item = NamespaceBinding;

    fn next(&mut self) -> Option<NamespaceBinding> {
        self.walk
            .step(self.tree)
            .map(|idx| self.tree.namespace_binding(idx))
    }
}

impl std::iter::FusedIterator for InScopeNamespaces<'_> {}

/// namespace:: stepping - the scope walk, then `xml`
#[derive(Debug, Clone)]
pub struct NamespaceStep {
    element: u32,
    walk: Option<ScopeWalk>,
    xml_pending: bool,
}

impl NamespaceStep {
    pub fn new(tree: &TreeStore, start: NodePos) -> Self {
        match start {
            NodePos::Node(nr) if tree.is_element(nr) => Self {
                element: nr,
                walk: Some(ScopeWalk::new(tree, nr)),
                xml_pending: true,
            },
            _ => Self {
                element: 0,
                walk: None,
                xml_pending: false,
            },
        }
    }
}

impl Stepper for NamespaceStep {
    fn step(&mut self, tree: &Arc<TreeStore>, test: &NodeTest) -> Option<NodePos> {
        if let Some(walk) = self.walk.as_mut() {
            while let Some(index) = walk.step(tree) {
                let pos = NodePos::Namespace {
                    parent: self.element,
                    index,
                };
                if test.matches(tree, pos) {
                    return Some(pos);
                }
            }
            self.walk = None;
        }
        if std::mem::take(&mut self.xml_pending) {
            let pos = NodePos::Namespace {
                parent: self.element,
                index: XML_NAMESPACE_INDEX,
            };
            if test.matches(tree, pos) {
                return Some(pos);
            }
        }
        None
    }
}
