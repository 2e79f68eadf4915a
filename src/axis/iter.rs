//! Axis dispatch
//!
//! [`iterate_axis`] picks the stepping algorithm for an axis and test and
//! wraps it in [`AxisIterator`], one concrete type for every axis.

use std::iter::FusedIterator;
use std::sync::Arc;

use super::ancestor::AncestorStep;
use super::attribute::AttributeStep;
use super::cursor::Cursor;
use super::descendant::{DescendantStep, ElementScan, ScanFilter};
use super::following::{FollowingStep, PrecedingStep};
use super::namespace::NamespaceStep;
use super::sibling::{PrecedingSiblingStep, SiblingStep};
use super::single::SingleStep;
use super::test::NodeTest;
use super::{Axis, AxisIter};
use crate::tree::NodeHandle;

/// Iterator over any axis
#[derive(Debug, Clone)]
pub enum AxisIterator {
    Single(Cursor<SingleStep>),
    Ancestor(Cursor<AncestorStep>),
    Sibling(Cursor<SiblingStep>),
    PrecedingSibling(Cursor<PrecedingSiblingStep>),
    Descendant(Cursor<DescendantStep>),
    ElementScan(Cursor<ElementScan>),
    Attribute(Cursor<AttributeStep>),
    Following(Cursor<FollowingStep>),
    Preceding(Cursor<PrecedingStep>),
    Namespace(Cursor<NamespaceStep>),
}

macro_rules! dispatch {
    ($self:expr, $it:ident => $body:expr) => {
        match $self {
            AxisIterator::Single($it) => $body,
            AxisIterator::Ancestor($it) => $body,
            AxisIterator::Sibling($it) => $body,
            AxisIterator::PrecedingSibling($it) => $body,
            AxisIterator::Descendant($it) => $body,
            AxisIterator::ElementScan($it) => $body,
            AxisIterator::Attribute($it) => $body,
            AxisIterator::Following($it) => $body,
            AxisIterator::Preceding($it) => $body,
            AxisIterator::Namespace($it) => $body,
        }
    };
}

macro_rules! rewrap {
    ($self:expr, $it:ident => $body:expr) => {
        match $self {
            AxisIterator::Single($it) => AxisIterator::Single($body),
            AxisIterator::Ancestor($it) => AxisIterator::Ancestor($body),
            AxisIterator::Sibling($it) => AxisIterator::Sibling($body),
            AxisIterator::PrecedingSibling($it) => AxisIterator::PrecedingSibling($body),
            AxisIterator::Descendant($it) => AxisIterator::Descendant($body),
            AxisIterator::ElementScan($it) => AxisIterator::ElementScan($body),
            AxisIterator::Attribute($it) => AxisIterator::Attribute($body),
            AxisIterator::Following($it) => AxisIterator::Following($body),
            AxisIterator::Preceding($it) => AxisIterator::Preceding($body),
            AxisIterator::Namespace($it) => AxisIterator::Namespace($body),
        }
    };
}

impl Iterator for AxisIterator {
    type Item = NodeHandle;

    #[inline]
    fn next(&mut self) -> Option<NodeHandle> {
        dispatch!(self, it => it.next())
    }
}

impl FusedIterator for AxisIterator {}

impl AxisIter for AxisIterator {
    fn position(&self) -> Option<usize> {
        dispatch!(self, it => it.position())
    }

    fn current(&self) -> Option<&NodeHandle> {
        dispatch!(self, it => it.current())
    }

    fn another(&self) -> Self {
        rewrap!(self, it => it.another())
    }

    fn has_next(&self) -> bool {
        dispatch!(self, it => it.has_next())
    }
}

/// Iterate `axis` from `node`, yielding nodes that pass `test`
pub fn iterate_axis(node: &NodeHandle, axis: Axis, test: NodeTest) -> AxisIterator {
    let tree = node.tree();
    let start = node.pos();
    let owned = Arc::clone(tree);
    match axis {
        Axis::Self_ => AxisIterator::Single(Cursor::new(owned, test, SingleStep::self_axis(start))),
        Axis::Parent => AxisIterator::Single(Cursor::new(
            owned,
            test,
            SingleStep::parent_axis(tree, start),
        )),
        Axis::Ancestor | Axis::AncestorOrSelf => AxisIterator::Ancestor(Cursor::new(
            owned,
            test,
            AncestorStep::new(tree, start, axis == Axis::AncestorOrSelf),
        )),
        Axis::Child => AxisIterator::Sibling(Cursor::new(
            owned,
            test,
            SiblingStep::children(tree, start),
        )),
        Axis::FollowingSibling => AxisIterator::Sibling(Cursor::new(
            owned,
            test,
            SiblingStep::following(tree, start),
        )),
        Axis::PrecedingSibling => AxisIterator::PrecedingSibling(Cursor::new(
            owned,
            test,
            PrecedingSiblingStep::new(tree, start),
        )),
        Axis::Descendant | Axis::DescendantOrSelf => {
            let include_self = axis == Axis::DescendantOrSelf;
            match ScanFilter::for_test(&test) {
                Some(filter) => AxisIterator::ElementScan(Cursor::new(
                    owned,
                    test,
                    ElementScan::new(tree, start, include_self, filter),
                )),
                None => AxisIterator::Descendant(Cursor::new(
                    owned,
                    test,
                    DescendantStep::new(start, include_self),
                )),
            }
        }
        Axis::Attribute => AxisIterator::Attribute(Cursor::new(
            owned,
            test,
            AttributeStep::new(tree, start),
        )),
        Axis::Following => AxisIterator::Following(Cursor::new(
            owned,
            test,
            FollowingStep::new(tree, start),
        )),
        Axis::Preceding => AxisIterator::Preceding(Cursor::new(
            owned,
            test,
            PrecedingStep::new(tree, start),
        )),
        Axis::Namespace => AxisIterator::Namespace(Cursor::new(
            owned,
            test,
            NamespaceStep::new(tree, start),
        )),
    }
}
