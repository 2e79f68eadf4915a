//! Tree Store - columnar encoding of one document
//!
//! Every node other than attributes and namespaces gets a dense node number
//! in document order, and each property lives in its own column indexed by
//! that number. Attributes and namespace declarations have their own columns
//! with a back-pointer to the owning element; the entries of one element are
//! contiguous.
//!
//! ```text
//! TreeStore
//! ├── kind / depth / next / alpha / beta / name_code / prefix   (per node)
//! ├── att_parent / att_code / att_prefix / att_value             (per attribute)
//! ├── ns_parent / ns_binding                                     (per declaration)
//! ├── text / attr_text / comment_text                            (character buffers)
//! └── ids / locations / system_ids                               (optional extras)
//! ```
//!
//! `next[i]` is the node number of i's next sibling. For the last child it
//! points backwards to the parent instead, so any `next[i] < i` is an owner
//! link rather than a sibling link. The builder may thread parent-pointer
//! placeholders into long sibling chains; they have their own kind code,
//! hold the parent in `alpha`, and are skipped by every navigation method.
//!
//! A finished store is immutable and shared behind an `Arc`.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use super::handle::{NodeHandle, NodePos};
use super::kind::{kind_codes, NodeKind};
use super::span::Span;
use crate::axis::namespace::InScopeNamespaces;
use crate::error::{Result, TreeError};
use crate::name::{NameCode, NamePool, NamespaceBinding, PrefixCode, UriCode};

/// Sentinel for "no node" in the `next`, `alpha` and `beta` columns
pub const NO_NODE: u32 = u32::MAX;

/// Namespace index standing for the implicit `xml` binding
pub const XML_NAMESPACE_INDEX: u32 = u32::MAX;

static NEXT_DOCUMENT_NUMBER: AtomicU64 = AtomicU64::new(0);

/// Compact, immutable tree of one document (or one parentless fragment)
#[derive(Debug)]
pub struct TreeStore {
    pub(crate) kind: Vec<u8>,
    pub(crate) depth: Vec<u16>,
    pub(crate) next: Vec<u32>,
    /// Element: first attribute index. Text/comment/PI: buffer offset.
    /// Parent pointer: the parent node.
    pub(crate) alpha: Vec<u32>,
    /// Element: first namespace index. Text/comment/PI: length.
    pub(crate) beta: Vec<u32>,
    pub(crate) name_code: Vec<NameCode>,
    pub(crate) prefix: Vec<PrefixCode>,

    pub(crate) att_parent: Vec<u32>,
    pub(crate) att_code: Vec<NameCode>,
    pub(crate) att_prefix: Vec<PrefixCode>,
    pub(crate) att_value: Vec<Span>,

    pub(crate) ns_parent: Vec<u32>,
    pub(crate) ns_binding: Vec<NamespaceBinding>,

    pub(crate) text: String,
    pub(crate) attr_text: String,
    pub(crate) comment_text: String,

    /// ID value to owning element; the first element to claim a value keeps it
    ids: HashMap<Box<str>, u32>,
    /// Attribute indices that registered an ID, ascending
    id_attributes: Vec<u32>,
    /// (line, column) per node when line numbering is on; 0 means unknown
    locations: Option<Vec<(u32, u32)>>,
    /// (first node, system ID) runs, ascending by node
    system_ids: Vec<(u32, Arc<str>)>,

    /// Preceding-sibling links, built on first use
    prior: OnceLock<Vec<u32>>,
    document_number: u64,
    pool: Arc<NamePool>,
}

impl TreeStore {
    pub(crate) fn empty(pool: Arc<NamePool>) -> Self {
        Self {
            kind: Vec::with_capacity(256),
            depth: Vec::with_capacity(256),
            next: Vec::with_capacity(256),
            alpha: Vec::with_capacity(256),
            beta: Vec::with_capacity(256),
            name_code: Vec::with_capacity(256),
            prefix: Vec::with_capacity(256),
            att_parent: Vec::with_capacity(64),
            att_code: Vec::with_capacity(64),
            att_prefix: Vec::with_capacity(64),
            att_value: Vec::with_capacity(64),
            ns_parent: Vec::new(),
            ns_binding: Vec::new(),
            text: String::with_capacity(1024),
            attr_text: String::new(),
            comment_text: String::new(),
            ids: HashMap::new(),
            id_attributes: Vec::new(),
            locations: None,
            system_ids: Vec::new(),
            prior: OnceLock::new(),
            document_number: NEXT_DOCUMENT_NUMBER.fetch_add(1, Ordering::Relaxed),
            pool,
        }
    }

    // === Builder methods (used by TreeBuilder) ===

    pub(crate) fn push_node(
        &mut self,
        kind: u8,
        depth: u16,
        alpha: u32,
        beta: u32,
        name: NameCode,
        prefix: PrefixCode,
    ) -> u32 {
        let nr = self.kind.len() as u32;
        self.kind.push(kind);
        self.depth.push(depth);
        self.next.push(NO_NODE);
        self.alpha.push(alpha);
        self.beta.push(beta);
        self.name_code.push(name);
        self.prefix.push(prefix);
        if let Some(locations) = self.locations.as_mut() {
            locations.push((0, 0));
        }
        nr
    }

    pub(crate) fn push_attribute(
        &mut self,
        parent: u32,
        name: NameCode,
        prefix: PrefixCode,
        value: &str,
    ) -> u32 {
        let idx = self.att_parent.len() as u32;
        let span = Span::append(&mut self.attr_text, value);
        self.att_parent.push(parent);
        self.att_code.push(name);
        self.att_prefix.push(prefix);
        self.att_value.push(span);
        if self.alpha[parent as usize] == NO_NODE {
            self.alpha[parent as usize] = idx;
        }
        idx
    }

    pub(crate) fn push_namespace(&mut self, parent: u32, binding: NamespaceBinding) -> u32 {
        let idx = self.ns_parent.len() as u32;
        self.ns_parent.push(parent);
        self.ns_binding.push(binding);
        if self.beta[parent as usize] == NO_NODE {
            self.beta[parent as usize] = idx;
        }
        idx
    }

    /// Start recording node locations; nodes already added stay unknown
    pub(crate) fn enable_line_numbering(&mut self) {
        if self.locations.is_none() {
            self.locations = Some(vec![(0, 0); self.len()]);
        }
    }

    pub(crate) fn set_location(&mut self, nr: u32, line: u32, column: u32) {
        if let Some(slot) = self
            .locations
            .as_mut()
            .and_then(|locations| locations.get_mut(nr as usize))
        {
            *slot = (line, column);
        }
    }

    /// Nodes from `from` onwards came from the entity at `uri`
    pub(crate) fn set_system_id(&mut self, from: u32, uri: &str) {
        if let Some((start, last)) = self.system_ids.last_mut() {
            if **last == *uri {
                return;
            }
            if *start == from {
                *last = Arc::from(uri);
                return;
            }
        }
        self.system_ids.push((from, Arc::from(uri)));
    }

    /// Register `id` for `element`, found on attribute `attr`. Returns false
    /// when another element already holds the value.
    pub(crate) fn register_id(&mut self, id: &str, element: u32, attr: u32) -> bool {
        self.id_attributes.push(attr);
        if self.ids.contains_key(id) {
            return false;
        }
        self.ids.insert(Box::from(id), element);
        true
    }

    /// Release capacity over-allocated while building
    pub(crate) fn shrink_to_fit(&mut self) {
        self.kind.shrink_to_fit();
        self.depth.shrink_to_fit();
        self.next.shrink_to_fit();
        self.alpha.shrink_to_fit();
        self.beta.shrink_to_fit();
        self.name_code.shrink_to_fit();
        self.prefix.shrink_to_fit();
        self.att_parent.shrink_to_fit();
        self.att_code.shrink_to_fit();
        self.att_prefix.shrink_to_fit();
        self.att_value.shrink_to_fit();
        self.ns_parent.shrink_to_fit();
        self.ns_binding.shrink_to_fit();
        self.text.shrink_to_fit();
        self.attr_text.shrink_to_fit();
        self.comment_text.shrink_to_fit();
        self.ids.shrink_to_fit();
        self.id_attributes.shrink_to_fit();
        if let Some(locations) = self.locations.as_mut() {
            locations.shrink_to_fit();
        }
    }

    // === Whole-tree properties ===

    /// Number of slots in the main node sequence (placeholders included)
    #[inline]
    pub fn len(&self) -> usize {
        self.kind.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    #[inline]
    pub fn attribute_count(&self) -> usize {
        self.att_parent.len()
    }

    #[inline]
    pub fn namespace_count(&self) -> usize {
        self.ns_parent.len()
    }

    /// Unique number of this tree within the process
    #[inline]
    pub fn document_number(&self) -> u64 {
        self.document_number
    }

    #[inline]
    pub fn name_pool(&self) -> &Arc<NamePool> {
        &self.pool
    }

    /// Handle for the root (node 0)
    pub fn root(self: &Arc<Self>) -> NodeHandle {
        NodeHandle::new(Arc::clone(self), NodePos::Node(0))
    }

    /// Handle for node `nr`; `None` if out of range or a placeholder
    pub fn node(self: &Arc<Self>, nr: u32) -> Option<NodeHandle> {
        self.node_kind(nr)?;
        Some(NodeHandle::new(Arc::clone(self), NodePos::Node(nr)))
    }

    /// Handle for attribute `idx`
    pub fn attribute(self: &Arc<Self>, idx: u32) -> Option<NodeHandle> {
        ((idx as usize) < self.att_parent.len())
            .then(|| NodeHandle::new(Arc::clone(self), NodePos::Attribute(idx)))
    }

    // === Per-node columns ===

    #[inline]
    pub(crate) fn kind_code(&self, nr: u32) -> u8 {
        self.kind[nr as usize]
    }

    #[inline]
    pub(crate) fn is_placeholder(&self, nr: u32) -> bool {
        self.kind[nr as usize] == kind_codes::PARENT_POINTER
    }

    /// Kind of node `nr`; `None` for placeholders and out-of-range numbers
    #[inline]
    pub fn node_kind(&self, nr: u32) -> Option<NodeKind> {
        NodeKind::from_code(*self.kind.get(nr as usize)?)
    }

    #[inline]
    pub fn is_element(&self, nr: u32) -> bool {
        self.kind.get(nr as usize) == Some(&kind_codes::ELEMENT)
    }

    #[inline]
    pub(crate) fn depth(&self, nr: u32) -> u16 {
        self.depth[nr as usize]
    }

    #[inline]
    pub(crate) fn name_code(&self, nr: u32) -> NameCode {
        self.name_code[nr as usize]
    }

    #[inline]
    pub(crate) fn prefix_code(&self, nr: u32) -> PrefixCode {
        self.prefix[nr as usize]
    }

    // === Navigation ===

    /// Parent of node `nr`
    pub fn parent_of(&self, nr: u32) -> Option<u32> {
        if *self.depth.get(nr as usize)? == 0 {
            return None;
        }
        let mut p = self.next[nr as usize];
        while p > nr {
            if p == NO_NODE {
                return None;
            }
            if self.is_placeholder(p) {
                return Some(self.alpha[p as usize]);
            }
            p = self.next[p as usize];
        }
        Some(p)
    }

    /// First child of node `nr`
    #[inline]
    pub fn first_child_of(&self, nr: u32) -> Option<u32> {
        let depth = *self.depth.get(nr as usize)?;
        let child = nr.checked_add(1)?;
        (*self.depth.get(child as usize)? > depth).then_some(child)
    }

    /// Next sibling of node `nr`, following forward links through placeholders
    pub fn next_sibling_of(&self, nr: u32) -> Option<u32> {
        let mut from = nr;
        loop {
            let n = *self.next.get(from as usize)?;
            if n == NO_NODE || n < from {
                return None;
            }
            if !self.is_placeholder(n) {
                return Some(n);
            }
            from = n;
        }
    }

    /// Previous sibling of node `nr`
    pub fn previous_sibling_of(&self, nr: u32) -> Option<u32> {
        let prior = self.prior_index();
        let mut p = *prior.get(nr as usize)?;
        while p != NO_NODE && self.is_placeholder(p) {
            p = prior[p as usize];
        }
        (p != NO_NODE).then_some(p)
    }

    fn prior_index(&self) -> &[u32] {
        self.prior.get_or_init(|| {
            let mut prior = vec![NO_NODE; self.len()];
            for (i, &n) in self.next.iter().enumerate() {
                if n != NO_NODE && n as usize > i {
                    prior[n as usize] = i as u32;
                }
            }
            tracing::debug!(
                document = self.document_number,
                nodes = self.len(),
                "built preceding-sibling index"
            );
            prior
        })
    }

    /// First node number after the subtree rooted at `nr` (placeholders
    /// included), or `len()` when the subtree runs to the end.
    pub(crate) fn subtree_end(&self, nr: u32) -> u32 {
        let mut n = self.next[nr as usize];
        while n < nr {
            n = self.next[n as usize];
        }
        if n == NO_NODE {
            self.len() as u32
        } else {
            n
        }
    }

    /// The node after `current` in a depth-first walk of the subtree rooted
    /// at `anchor`: first child, else next sibling, else the next sibling of
    /// the nearest ancestor below `anchor`. Needs no stack.
    pub(crate) fn next_in_subtree(&self, anchor: u32, current: u32) -> Option<u32> {
        if let Some(child) = self.first_child_of(current) {
            return Some(child);
        }
        let mut node = current;
        loop {
            if node == anchor {
                return None;
            }
            if let Some(sibling) = self.next_sibling_of(node) {
                return Some(sibling);
            }
            node = self.parent_of(node)?;
        }
    }

    /// True if `ancestor` is a proper ancestor of node `nr`
    pub fn is_ancestor(&self, ancestor: u32, nr: u32) -> bool {
        match (self.depth.get(ancestor as usize), self.depth.get(nr as usize)) {
            (Some(a), Some(d)) if ancestor < nr && a < d => {}
            _ => return false,
        }
        nr < self.subtree_end(ancestor)
    }

    // === Attributes ===

    /// Attribute indices owned by element `nr` (empty for other kinds)
    pub fn attribute_range(&self, nr: u32) -> Range<u32> {
        if !self.is_element(nr) {
            return 0..0;
        }
        let start = self.alpha[nr as usize];
        if start == NO_NODE {
            return 0..0;
        }
        let mut end = start;
        while (end as usize) < self.att_parent.len() && self.att_parent[end as usize] == nr {
            end += 1;
        }
        start..end
    }

    #[inline]
    pub(crate) fn attribute_parent(&self, idx: u32) -> u32 {
        self.att_parent[idx as usize]
    }

    #[inline]
    pub(crate) fn attribute_name_code(&self, idx: u32) -> NameCode {
        self.att_code[idx as usize]
    }

    #[inline]
    pub(crate) fn attribute_prefix_code(&self, idx: u32) -> PrefixCode {
        self.att_prefix[idx as usize]
    }

    #[inline]
    pub(crate) fn attribute_value_at(&self, idx: u32) -> &str {
        self.att_value[idx as usize].slice(&self.attr_text)
    }

    /// Value of the attribute of element `nr` with the given fingerprint
    pub fn attribute_value(&self, nr: u32, name: NameCode) -> Option<&str> {
        self.attribute_range(nr)
            .find(|&a| self.att_code[a as usize] == name)
            .map(|a| self.attribute_value_at(a))
    }

    // === Namespaces ===

    /// Namespace declarations physically present on element `nr`
    pub fn declared_namespaces(&self, nr: u32) -> &[NamespaceBinding] {
        let range = self.namespace_range(nr);
        &self.ns_binding[range.start as usize..range.end as usize]
    }

    /// Copy the declarations of element `nr` into `buffer` (cleared first),
    /// returning how many were copied
    pub fn copy_declared_namespaces(&self, nr: u32, buffer: &mut Vec<NamespaceBinding>) -> usize {
        buffer.clear();
        buffer.extend_from_slice(self.declared_namespaces(nr));
        buffer.len()
    }

    pub(crate) fn namespace_range(&self, nr: u32) -> Range<u32> {
        if !self.is_element(nr) {
            return 0..0;
        }
        let start = self.beta[nr as usize];
        if start == NO_NODE {
            return 0..0;
        }
        let mut end = start;
        while (end as usize) < self.ns_parent.len() && self.ns_parent[end as usize] == nr {
            end += 1;
        }
        start..end
    }

    /// Binding stored at namespace index `idx`
    #[inline]
    pub(crate) fn namespace_binding(&self, idx: u32) -> NamespaceBinding {
        if idx == XML_NAMESPACE_INDEX {
            NamespaceBinding::XML
        } else {
            self.ns_binding[idx as usize]
        }
    }

    /// In-scope namespace bindings of element `nr`, closest first
    pub fn in_scope_namespaces(&self, nr: u32) -> InScopeNamespaces<'_> {
        InScopeNamespaces::new(self, nr)
    }

    /// Resolve `prefix` against the in-scope namespaces of element `nr`.
    /// An unbound default prefix resolves to the empty URI; any other
    /// unbound prefix gives `None`, as does a node that is not an element.
    pub fn uri_for_prefix(&self, nr: u32, prefix: PrefixCode) -> Option<UriCode> {
        if !self.is_element(nr) {
            return None;
        }
        if prefix == PrefixCode::XML {
            return Some(UriCode::XML);
        }
        match self.in_scope_namespaces(nr).find(|b| b.prefix == prefix) {
            Some(binding) => Some(binding.uri),
            None if prefix.is_empty() => Some(UriCode::EMPTY),
            None => None,
        }
    }

    // === IDs ===

    /// Element carrying the ID `id`, if any
    pub fn element_with_id(&self, id: &str) -> Option<u32> {
        self.ids.get(id).copied()
    }

    /// Handle for the element carrying the ID `id`
    pub fn select_id(self: &Arc<Self>, id: &str) -> Option<NodeHandle> {
        self.node(self.element_with_id(id)?)
    }

    /// True if attribute `idx` is an ID attribute (`xml:id` or declared as an ID)
    pub fn is_id_attribute(&self, idx: u32) -> bool {
        self.id_attributes.binary_search(&idx).is_ok()
    }

    #[inline]
    pub fn id_count(&self) -> usize {
        self.ids.len()
    }

    // === Locations ===

    /// True if the tree was built with line numbering on
    #[inline]
    pub fn has_line_numbers(&self) -> bool {
        self.locations.is_some()
    }

    /// (line, column) of node `nr`. A node without a recorded location
    /// takes the location of the nearest earlier node that has one.
    pub fn location(&self, nr: u32) -> Option<(u32, u32)> {
        let locations = self.locations.as_ref()?;
        let known = locations.get(..=nr as usize)?;
        known.iter().rev().find(|(line, _)| *line > 0).copied()
    }

    #[inline]
    pub fn line_number(&self, nr: u32) -> Option<u32> {
        self.location(nr).map(|(line, _)| line)
    }

    #[inline]
    pub fn column_number(&self, nr: u32) -> Option<u32> {
        self.location(nr).map(|(_, column)| column)
    }

    /// System ID of the external entity node `nr` came from
    pub fn system_id(&self, nr: u32) -> Option<&str> {
        if nr as usize >= self.len() {
            return None;
        }
        let run = self.system_ids.partition_point(|(start, _)| *start <= nr);
        let (_, uri) = self.system_ids.get(run.checked_sub(1)?)?;
        (!uri.is_empty()).then_some(&**uri)
    }

    // === Content ===

    /// Characters of a text, comment or PI node (PI: its data)
    pub(crate) fn content_of(&self, nr: u32) -> &str {
        let span = Span::new(self.alpha[nr as usize], self.beta[nr as usize]);
        match self.kind_code(nr) {
            kind_codes::TEXT => span.slice(&self.text),
            kind_codes::COMMENT | kind_codes::PROCESSING_INSTRUCTION => {
                span.slice(&self.comment_text)
            }
            _ => "",
        }
    }

    /// String value of node `nr`: concatenated descendant text for
    /// documents and elements, own content otherwise
    pub(crate) fn string_value(&self, nr: u32) -> Cow<'_, str> {
        match self.kind_code(nr) {
            kind_codes::DOCUMENT | kind_codes::ELEMENT => {
                let end = self.subtree_end(nr);
                let mut texts = (nr + 1..end).filter(|&i| self.kind_code(i) == kind_codes::TEXT);
                let Some(first) = texts.next() else {
                    return Cow::Borrowed("");
                };
                let first = self.content_of(first);
                match texts.next() {
                    None => Cow::Borrowed(first),
                    Some(second) => {
                        let mut value = String::with_capacity(first.len() * 2);
                        value.push_str(first);
                        value.push_str(self.content_of(second));
                        for i in texts {
                            value.push_str(self.content_of(i));
                        }
                        Cow::Owned(value)
                    }
                }
            }
            _ => Cow::Borrowed(self.content_of(nr)),
        }
    }

    // === Validation and diagnostics ===

    /// Check the structural invariants the navigation code relies on
    pub fn validate(&self) -> Result<()> {
        let len = self.len() as u32;
        let malformed = |node: u32, reason: &'static str| {
            tracing::warn!(
                document = self.document_number,
                node,
                reason,
                "tree failed validation"
            );
            Err(TreeError::MalformedTree { node, reason })
        };

        for nr in 0..len {
            let i = nr as usize;
            let depth = self.depth[i];
            let next = self.next[i];
            if NodeKind::from_code(self.kind[i]).is_none()
                && self.kind[i] != kind_codes::PARENT_POINTER
            {
                return malformed(nr, "unknown node kind");
            }
            if depth == 0 {
                if nr != 0 {
                    return malformed(nr, "more than one node at depth 0");
                }
                if next != NO_NODE {
                    return malformed(nr, "root has a next pointer");
                }
                continue;
            }
            if nr == 0 {
                return malformed(nr, "root is not at depth 0");
            }
            if next == NO_NODE || next >= len {
                return malformed(nr, "next pointer out of range");
            }
            if next > nr {
                if self.depth[next as usize] != depth {
                    return malformed(nr, "forward link to a node at another depth");
                }
            } else if u32::from(self.depth[next as usize]) + 1 != u32::from(depth)
                || !matches!(
                    self.kind[next as usize],
                    kind_codes::ELEMENT | kind_codes::DOCUMENT
                )
            {
                return malformed(nr, "owner link does not point to a parent");
            }
            if self.kind[i] == kind_codes::PARENT_POINTER {
                let parent = self.alpha[i];
                if parent >= nr
                    || u32::from(self.depth[parent as usize]) + 1 != u32::from(depth)
                {
                    return malformed(nr, "placeholder parent pointer is wrong");
                }
            }
            if u32::from(depth) > u32::from(self.depth[i - 1]) + 1 {
                return malformed(nr, "depth increases by more than one");
            }
        }

        let mut last = 0;
        for (a, &parent) in self.att_parent.iter().enumerate() {
            if parent < last || !self.is_element(parent) {
                return malformed(a as u32, "attribute not grouped under an element");
            }
            last = parent;
        }
        let mut last = 0;
        for (n, &parent) in self.ns_parent.iter().enumerate() {
            if parent < last || !self.is_element(parent) {
                return malformed(n as u32, "namespace not grouped under an element");
            }
            last = parent;
        }
        Ok(())
    }

    /// Tabular dump of every column, for debugging
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:>8}{:>8}{:>8}{:>11}{:>11}{:>11}{:>11}  name",
            "node", "kind", "depth", "next", "alpha", "beta", "code"
        );
        for i in 0..self.len() {
            let code = self.name_code[i];
            let name = if code.is_none() {
                String::new()
            } else {
                self.pool
                    .display_name(self.prefix[i], code)
                    .unwrap_or_default()
            };
            let _ = writeln!(
                out,
                "{:>8}{:>8}{:>8}{:>11}{:>11}{:>11}{:>11}  {}",
                i,
                self.kind[i],
                self.depth[i],
                signed(self.next[i]),
                signed(self.alpha[i]),
                signed(self.beta[i]),
                signed(code.as_u32()),
                name
            );
        }
        let _ = writeln!(out, "{:>8}{:>8}{:>8}  value", "attr", "parent", "code");
        for a in 0..self.attribute_count() {
            let _ = writeln!(
                out,
                "{:>8}{:>8}{:>8}  {}",
                a,
                self.att_parent[a],
                self.att_code[a].as_u32(),
                self.attribute_value_at(a as u32)
            );
        }
        let _ = writeln!(out, "{:>8}{:>8}  prefix=uri", "ns", "parent");
        for n in 0..self.namespace_count() {
            let (prefix, uri) = self.ns_binding[n].resolve(&self.pool).unwrap_or_default();
            let _ = writeln!(out, "{:>8}{:>8}  {}={}", n, self.ns_parent[n], prefix, uri);
        }
        out
    }
}

/// Column value for display, with `NO_NODE` shown as -1
fn signed(value: u32) -> i64 {
    if value == NO_NODE {
        -1
    } else {
        i64::from(value)
    }
}
