//! TinyTree - compact immutable XML trees with XPath axis navigation
//!
//! Layers:
//! - `name`: process-wide interning of names, prefixes and namespace URIs
//! - `tree`: columnar node storage, the event-driven builder, node handles
//! - `axis`: the 13 XPath axes as restartable, lookahead-capable iterators
//! - `parallel`: fan-out of axis queries over a shared tree with Rayon
//!
//! ```
//! use tinytree::{Axis, AxisIter, NodeTest, QName, TreeBuilder};
//!
//! let mut b = TreeBuilder::new();
//! b.start_element(QName::local("r")).unwrap();
//! b.start_element(QName::local("a")).unwrap();
//! b.end_element().unwrap();
//! b.end_element().unwrap();
//! let tree = b.finish().unwrap();
//!
//! let children = tree.root().iterate_axis(Axis::Child, NodeTest::AnyNode);
//! assert!(children.has_next());
//! assert_eq!(children.count(), 1);
//! ```

pub mod axis;
pub mod error;
pub mod name;
pub mod parallel;
pub mod tree;

pub use axis::{iterate_axis, Axis, AxisIter, AxisIterator, NodeTest};
pub use error::{BuildError, Result, TreeError};
pub use name::{NameCode, NamePool, NamespaceBinding, PrefixCode, QName, UriCode};
pub use tree::{BuilderConfig, NodeHandle, NodeKind, NodePos, TreeBuilder, TreeStore};
