//! Namespace bindings
//!
//! A binding is one `xmlns`/`xmlns:p` attribute as it physically appears on
//! an element. A binding whose URI is empty is an undeclaration: from that
//! element down, the prefix is no longer bound. This is distinct from the
//! element carrying no binding for the prefix at all.

use super::pool::{NamePool, PrefixCode, UriCode};

/// Well-known namespace URIs
pub mod ns {
    pub const XML: &str = "http://www.w3.org/XML/1998/namespace";
    pub const XMLNS: &str = "http://www.w3.org/2000/xmlns/";
}

/// A (prefix, URI) pair declared on one element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NamespaceBinding {
    pub prefix: PrefixCode,
    pub uri: UriCode,
}

impl NamespaceBinding {
    /// The `xml` prefix, bound everywhere and never stored in a tree
    pub const XML: NamespaceBinding = NamespaceBinding {
        prefix: PrefixCode::XML,
        uri: UriCode::XML,
    };

    #[inline]
    pub const fn new(prefix: PrefixCode, uri: UriCode) -> Self {
        Self { prefix, uri }
    }

    /// Intern both parts in `pool`
    pub fn intern(pool: &NamePool, prefix: &str, uri: &str) -> Self {
        Self {
            prefix: pool.allocate_prefix(prefix),
            uri: pool.allocate_uri(uri),
        }
    }

    /// `xmlns:p=""` (or `xmlns=""` for the default namespace)
    #[inline]
    pub const fn is_undeclaration(&self) -> bool {
        self.uri.is_empty()
    }

    #[inline]
    pub const fn is_default(&self) -> bool {
        self.prefix.is_empty()
    }

    /// Resolve both codes to strings
    pub fn resolve(&self, pool: &NamePool) -> Option<(String, String)> {
        let prefix = pool.prefix(self.prefix)?;
        let uri = pool.uri_str(self.uri)?;
        Some((prefix.to_string(), uri.to_string()))
    }
}
