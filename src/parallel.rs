//! Parallel Axis Evaluation
//!
//! Uses Rayon to run independent axis iterations against shared trees.
//! Trees are immutable, so every worker reads the same store without
//! coordination; each worker owns its own iterator.

use rayon::prelude::*;

use crate::axis::{Axis, NodeTest};
use crate::tree::NodeHandle;

/// Collect `axis` from every start node in parallel, one result per start
pub fn par_axis(starts: &[NodeHandle], axis: Axis, test: &NodeTest) -> Vec<Vec<NodeHandle>> {
    starts
        .par_iter()
        .map(|start| start.iterate_axis(axis, test.clone()).collect())
        .collect()
}

/// Count matches of `axis` from every start node in parallel
pub fn par_count(starts: &[NodeHandle], axis: Axis, test: &NodeTest) -> Vec<usize> {
    starts
        .par_iter()
        .map(|start| start.iterate_axis(axis, test.clone()).count())
        .collect()
}

/// Iterate `axis` from one node and map the results in parallel
pub fn par_map<F, T>(start: &NodeHandle, axis: Axis, test: NodeTest, mapper: F) -> Vec<T>
where
    F: Fn(&NodeHandle) -> T + Sync + Send,
    T: Send,
{
    let nodes: Vec<NodeHandle> = start.iterate_axis(axis, test).collect();
    nodes.par_iter().map(mapper).collect()
}
