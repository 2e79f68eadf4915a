//! Compact tree
//!
//! - [`TreeStore`]: columnar node storage for one document
//! - [`TreeBuilder`]: event-driven construction of a store
//! - [`NodeHandle`]: shared, cheap view of one node

pub mod builder;
pub mod handle;
pub mod kind;
pub mod span;
pub mod store;

pub use builder::{BuilderConfig, TreeBuilder, MAX_DEPTH};
pub use handle::{NodeHandle, NodePos};
pub use kind::NodeKind;
pub use span::Span;
pub use store::{TreeStore, NO_NODE, XML_NAMESPACE_INDEX};
