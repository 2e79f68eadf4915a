//! Names and namespaces
//!
//! - [`NamePool`]: process-wide interning of (URI, local name) pairs
//! - [`NamespaceBinding`]: one prefix/URI declaration on an element
//! - [`QName`]: borrowed name triple handed to the builder

pub mod namespace;
pub mod pool;
pub mod qname;

pub use namespace::{ns, NamespaceBinding};
pub use pool::{NameCode, NamePool, PrefixCode, UriCode};
pub use qname::{is_ncname, QName};
