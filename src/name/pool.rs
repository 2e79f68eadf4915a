//! Name Pool - process-wide name interning
//!
//! Maps (namespace URI, local name) pairs to small integer codes so that
//! name comparison during navigation is a single integer compare. Prefixes
//! are interned in a separate table: they take no part in name identity and
//! are only kept so display names can be rebuilt.
//!
//! Tables are append-only. Lookups of known names take a shared read lock;
//! the write lock is only taken on first sight of a name.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::namespace::ns;
use super::qname::parse_clark;
use crate::error::{Result, TreeError};

/// Interned (URI, local name) pair - a "fingerprint"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameCode(u32);

impl NameCode {
    /// Marker for nodes that have no name (text, comment, document)
    pub const NONE: NameCode = NameCode(u32::MAX);

    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

/// Interned namespace URI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UriCode(u32);

impl UriCode {
    /// The empty URI: "no namespace", or an undeclaration when bound to a prefix
    pub const EMPTY: UriCode = UriCode(0);
    /// `http://www.w3.org/XML/1998/namespace`
    pub const XML: UriCode = UriCode(1);

    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Interned namespace prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrefixCode(u32);

impl PrefixCode {
    /// The empty (default namespace) prefix
    pub const EMPTY: PrefixCode = PrefixCode(0);
    /// The reserved `xml` prefix
    pub const XML: PrefixCode = PrefixCode(1);

    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

#[derive(Debug)]
struct PoolTables {
    /// Indexed by NameCode
    names: Vec<(UriCode, Arc<str>)>,
    /// URI code -> local name -> NameCode
    name_index: HashMap<UriCode, HashMap<Arc<str>, NameCode>>,
    /// Indexed by UriCode
    uris: Vec<Arc<str>>,
    uri_index: HashMap<Arc<str>, UriCode>,
    /// Indexed by PrefixCode
    prefixes: Vec<Arc<str>>,
    prefix_index: HashMap<Arc<str>, PrefixCode>,
}

impl PoolTables {
    fn seeded() -> Self {
        let mut tables = PoolTables {
            names: Vec::with_capacity(256),
            name_index: HashMap::new(),
            uris: Vec::with_capacity(16),
            uri_index: HashMap::new(),
            prefixes: Vec::with_capacity(16),
            prefix_index: HashMap::new(),
        };
        // Order fixes UriCode::EMPTY/XML and PrefixCode::EMPTY/XML
        tables.insert_uri("");
        tables.insert_uri(ns::XML);
        tables.insert_prefix("");
        tables.insert_prefix("xml");
        tables
    }

    fn insert_uri(&mut self, uri: &str) -> UriCode {
        let code = UriCode(self.uris.len() as u32);
        let key: Arc<str> = Arc::from(uri);
        self.uris.push(key.clone());
        self.uri_index.insert(key, code);
        code
    }

    fn insert_prefix(&mut self, prefix: &str) -> PrefixCode {
        let code = PrefixCode(self.prefixes.len() as u32);
        let key: Arc<str> = Arc::from(prefix);
        self.prefixes.push(key.clone());
        self.prefix_index.insert(key, code);
        code
    }

    fn lookup(&self, uri: UriCode, local: &str) -> Option<NameCode> {
        self.name_index.get(&uri)?.get(local).copied()
    }
}

/// Shared name interning table
///
/// One pool is normally used for the whole process (see [`NamePool::global`])
/// so that names compare equal across trees built at different times.
#[derive(Debug)]
pub struct NamePool {
    tables: RwLock<PoolTables>,
}

static GLOBAL_POOL: LazyLock<Arc<NamePool>> = LazyLock::new(|| Arc::new(NamePool::new()));

impl Default for NamePool {
    fn default() -> Self {
        Self::new()
    }
}

impl NamePool {
    /// Create an isolated pool
    pub fn new() -> Self {
        NamePool {
            tables: RwLock::new(PoolTables::seeded()),
        }
    }

    /// The process-wide pool
    pub fn global() -> Arc<NamePool> {
        Arc::clone(&GLOBAL_POOL)
    }

    // Tables are append-only, so a panic in another thread cannot leave
    // them half-updated in a way readers could observe.
    fn read(&self) -> RwLockReadGuard<'_, PoolTables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, PoolTables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Allocate (or find) the code for a name.
    ///
    /// The prefix is interned too, but does not affect the returned code:
    /// `p:a` and `q:a` in the same namespace get the same code.
    pub fn allocate(&self, prefix: &str, uri: &str, local: &str) -> NameCode {
        if !prefix.is_empty() {
            self.allocate_prefix(prefix);
        }
        let uri_code = self.allocate_uri(uri);
        if let Some(code) = self.read().lookup(uri_code, local) {
            return code;
        }

        let mut tables = self.write();
        // Another writer may have got there between the two locks
        if let Some(code) = tables.lookup(uri_code, local) {
            return code;
        }
        let code = NameCode(tables.names.len() as u32);
        let key: Arc<str> = Arc::from(local);
        tables.names.push((uri_code, key.clone()));
        tables
            .name_index
            .entry(uri_code)
            .or_default()
            .insert(key, code);
        tracing::trace!(code = code.0, uri, local, "allocated name code");
        code
    }

    /// Allocate a name given in Clark notation: `{uri}local` or `local`
    pub fn allocate_clark(&self, expanded: &str) -> Result<NameCode> {
        let (uri, local) = parse_clark(expanded)
            .ok_or_else(|| TreeError::invalid(format!("malformed Clark name: {expanded}")))?;
        Ok(self.allocate("", uri, local))
    }

    /// Read-only lookup: the code for a name if it has ever been allocated
    pub fn fingerprint(&self, uri: &str, local: &str) -> Option<NameCode> {
        let tables = self.read();
        let uri_code = *tables.uri_index.get(uri)?;
        tables.lookup(uri_code, local)
    }

    /// Allocate (or find) the code for a namespace URI
    pub fn allocate_uri(&self, uri: &str) -> UriCode {
        if uri.is_empty() {
            return UriCode::EMPTY;
        }
        if let Some(code) = self.read().uri_index.get(uri) {
            return *code;
        }
        let mut tables = self.write();
        match tables.uri_index.get(uri) {
            Some(code) => *code,
            None => tables.insert_uri(uri),
        }
    }

    /// Read-only lookup of a URI code
    pub fn uri_code_of(&self, uri: &str) -> Option<UriCode> {
        self.read().uri_index.get(uri).copied()
    }

    /// Allocate (or find) the code for a prefix
    pub fn allocate_prefix(&self, prefix: &str) -> PrefixCode {
        if prefix.is_empty() {
            return PrefixCode::EMPTY;
        }
        if let Some(code) = self.read().prefix_index.get(prefix) {
            return *code;
        }
        let mut tables = self.write();
        match tables.prefix_index.get(prefix) {
            Some(code) => *code,
            None => tables.insert_prefix(prefix),
        }
    }

    /// Read-only lookup of a prefix code
    pub fn prefix_code_of(&self, prefix: &str) -> Option<PrefixCode> {
        self.read().prefix_index.get(prefix).copied()
    }

    /// Namespace URI of a name
    pub fn uri(&self, code: NameCode) -> Option<Arc<str>> {
        let tables = self.read();
        let (uri, _) = tables.names.get(code.0 as usize)?;
        tables.uris.get(uri.0 as usize).cloned()
    }

    /// URI code of a name, for fast namespace comparison
    #[inline]
    pub fn uri_code(&self, code: NameCode) -> Option<UriCode> {
        self.read().names.get(code.0 as usize).map(|(uri, _)| *uri)
    }

    /// Local part of a name
    pub fn local_name(&self, code: NameCode) -> Option<Arc<str>> {
        self.read()
            .names
            .get(code.0 as usize)
            .map(|(_, local)| local.clone())
    }

    /// String for a URI code
    pub fn uri_str(&self, code: UriCode) -> Option<Arc<str>> {
        self.read().uris.get(code.0 as usize).cloned()
    }

    /// String for a prefix code
    pub fn prefix(&self, code: PrefixCode) -> Option<Arc<str>> {
        self.read().prefixes.get(code.0 as usize).cloned()
    }

    /// `prefix:local`, or just `local` for the empty prefix
    pub fn display_name(&self, prefix: PrefixCode, code: NameCode) -> Option<String> {
        let tables = self.read();
        let (_, local) = tables.names.get(code.0 as usize)?;
        if prefix.is_empty() {
            return Some(local.to_string());
        }
        let prefix = tables.prefixes.get(prefix.0 as usize)?;
        Some(format!("{prefix}:{local}"))
    }

    /// `{uri}local`, or just `local` when not in a namespace
    pub fn clark_name(&self, code: NameCode) -> Option<String> {
        let tables = self.read();
        let (uri, local) = tables.names.get(code.0 as usize)?;
        if uri.is_empty() {
            return Some(local.to_string());
        }
        let uri = tables.uris.get(uri.0 as usize)?;
        Some(format!("{{{uri}}}{local}"))
    }

    /// Number of distinct names allocated so far
    pub fn len(&self) -> usize {
        self.read().names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_is_not_identity() {
        let pool = NamePool::new();
        let a = pool.allocate("p", "http://example.com/a", "item");
        let b = pool.allocate("q", "http://example.com/a", "item");
        let c = pool.allocate("", "http://example.com/a", "item");
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_distinct_names_distinct_codes() {
        let pool = NamePool::new();
        let a = pool.allocate("", "http://example.com/a", "item");
        let b = pool.allocate("", "http://example.com/b", "item");
        let c = pool.allocate("", "http://example.com/a", "other");
        let d = pool.allocate("", "", "item");
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert_ne!(b, d);
        assert_eq!(pool.len(), 4);
    }

    #[test]
    fn test_reverse_lookup() {
        let pool = NamePool::new();
        let code = pool.allocate("svg", "http://www.w3.org/2000/svg", "rect");
        assert_eq!(pool.uri(code).as_deref(), Some("http://www.w3.org/2000/svg"));
        assert_eq!(pool.local_name(code).as_deref(), Some("rect"));
        assert_eq!(
            pool.clark_name(code).as_deref(),
            Some("{http://www.w3.org/2000/svg}rect")
        );
        let svg = pool.prefix_code_of("svg").unwrap();
        assert_eq!(pool.display_name(svg, code).as_deref(), Some("svg:rect"));
        assert_eq!(
            pool.display_name(PrefixCode::EMPTY, code).as_deref(),
            Some("rect")
        );
    }

    #[test]
    fn test_uri_codes() {
        let pool = NamePool::new();
        assert_eq!(pool.allocate_uri(""), UriCode::EMPTY);
        assert_eq!(pool.allocate_uri(ns::XML), UriCode::XML);
        let a = pool.allocate_uri("urn:a");
        assert_eq!(pool.allocate_uri("urn:a"), a);
        let code = pool.allocate("", "urn:a", "x");
        assert_eq!(pool.uri_code(code), Some(a));
        assert_eq!(pool.uri_str(a).as_deref(), Some("urn:a"));
    }

    #[test]
    fn test_fingerprint_does_not_allocate() {
        let pool = NamePool::new();
        assert_eq!(pool.fingerprint("urn:x", "missing"), None);
        assert_eq!(pool.len(), 0);
        let code = pool.allocate("", "urn:x", "present");
        assert_eq!(pool.fingerprint("urn:x", "present"), Some(code));
    }

    #[test]
    fn test_clark_names() {
        let pool = NamePool::new();
        let a = pool.allocate_clark("{urn:a}x").unwrap();
        assert_eq!(a, pool.allocate("z", "urn:a", "x"));
        let b = pool.allocate_clark("plain").unwrap();
        assert_eq!(pool.uri_code(b), Some(UriCode::EMPTY));
        assert!(pool.allocate_clark("{urn:a").is_err());
    }

    #[test]
    fn test_unknown_codes() {
        let pool = NamePool::new();
        assert_eq!(pool.local_name(NameCode::NONE), None);
        assert_eq!(pool.uri(NameCode(42)), None);
    }

    #[test]
    fn test_concurrent_allocation_agrees() {
        let pool = Arc::new(NamePool::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pool = Arc::clone(&pool);
                std::thread::spawn(move || {
                    (0..100)
                        .map(|i| pool.allocate("", "urn:t", &format!("n{i}")))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for r in &results[1..] {
            assert_eq!(r, &results[0]);
        }
        assert_eq!(pool.len(), 100);
    }
}
