//! Tree Builder
//!
//! Builds a [`TreeStore`] from a stream of document events. Node numbers are
//! handed out in arrival order, which is document order.
//!
//! Sibling links are made as nodes arrive: each new node gets an owner link
//! to its parent, and the previous node at the same depth has its `next`
//! overwritten with a forward link to the new node. When an element closes,
//! its last child therefore still points back at it.

use std::sync::Arc;

use super::kind::kind_codes;
use super::span::Span;
use super::store::{TreeStore, NO_NODE};
use crate::error::{BuildError, Result};
use crate::name::{is_ncname, ns, NameCode, NamePool, NamespaceBinding, PrefixCode, QName};

/// Deepest node depth the builder accepts. Attributes and namespaces sit
/// one level below their element, so they still fit in a `u16`.
pub const MAX_DEPTH: usize = u16::MAX as usize - 1;

/// Options for [`TreeBuilder`]
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Siblings between parent-pointer placeholders; 0 disables them
    pub parent_pointer_interval: usize,
    /// Merge consecutive character events into one text node
    pub merge_adjacent_text: bool,
    /// Run [`TreeStore::validate`] in [`TreeBuilder::finish`]
    pub validate: bool,
    /// Record the line and column given to [`TreeBuilder::set_location`]
    pub line_numbering: bool,
    /// Pool used to intern element, attribute and PI names
    pub name_pool: Arc<NamePool>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            parent_pointer_interval: 10,
            merge_adjacent_text: true,
            validate: true,
            line_numbering: false,
            name_pool: NamePool::global(),
        }
    }
}

impl BuilderConfig {
    pub fn with_parent_pointer_interval(mut self, interval: usize) -> Self {
        self.parent_pointer_interval = interval;
        self
    }

    pub fn with_merge_adjacent_text(mut self, merge: bool) -> Self {
        self.merge_adjacent_text = merge;
        self
    }

    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    pub fn with_line_numbering(mut self, on: bool) -> Self {
        self.line_numbering = on;
        self
    }

    pub fn with_name_pool(mut self, pool: Arc<NamePool>) -> Self {
        self.name_pool = pool;
        self
    }
}

/// Event-driven builder for one tree
///
/// The tree may be rooted at a document node (`start_document` first) or at
/// a single parentless element, text, comment or PI node.
pub struct TreeBuilder {
    store: TreeStore,
    config: BuilderConfig,
    /// Open document/element nodes, outermost first
    open: Vec<u32>,
    /// Last node added at each depth below the currently open containers
    prev_at_depth: Vec<u32>,
    /// Siblings added at each depth since the last placeholder
    siblings_at_depth: Vec<usize>,
    /// Element still accepting attribute and namespace events
    start_tag: Option<u32>,
    /// Location for the next node, from `set_location`
    location: Option<(u32, u32)>,
    document_closed: bool,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    /// Builder using the default config and the process-wide name pool
    pub fn new() -> Self {
        Self::with_config(BuilderConfig::default())
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        let mut store = TreeStore::empty(Arc::clone(&config.name_pool));
        if config.line_numbering {
            store.enable_line_numbering();
        }
        Self {
            store,
            config,
            open: Vec::with_capacity(32),
            prev_at_depth: Vec::with_capacity(32),
            siblings_at_depth: Vec::with_capacity(32),
            start_tag: None,
            location: None,
            document_closed: false,
        }
    }

    #[inline]
    pub fn name_pool(&self) -> &Arc<NamePool> {
        &self.config.name_pool
    }

    /// Number of open containers
    #[inline]
    pub fn current_depth(&self) -> usize {
        self.open.len()
    }

    /// Nodes added so far, placeholders included
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Fail if a node could not be added at the current depth
    fn check_room(&self) -> Result<()> {
        if self.document_closed {
            return Err(BuildError::DocumentClosed.into());
        }
        if self.open.is_empty() && !self.store.is_empty() {
            return Err(BuildError::MultipleRoots.into());
        }
        // Leave room for a placeholder as well as the node itself
        if self.store.len() >= (NO_NODE - 2) as usize {
            return Err(BuildError::TooManyNodes.into());
        }
        if self.open.len() > MAX_DEPTH {
            return Err(BuildError::TooDeep(MAX_DEPTH).into());
        }
        Ok(())
    }

    /// Append a node at the current depth and link it into its sibling chain
    fn add_node(
        &mut self,
        kind: u8,
        alpha: u32,
        beta: u32,
        name: NameCode,
        prefix: PrefixCode,
    ) -> Result<u32> {
        self.check_room()?;
        let depth = self.open.len();
        self.start_tag = None;

        if self.prev_at_depth.len() <= depth {
            self.prev_at_depth.resize(depth + 1, NO_NODE);
            self.siblings_at_depth.resize(depth + 1, 0);
        }

        let parent = self.open.last().copied();
        let interval = self.config.parent_pointer_interval;
        if let Some(parent) = parent {
            if interval > 0
                && self.siblings_at_depth[depth] >= interval
                && self.prev_at_depth[depth] != NO_NODE
            {
                let placeholder = self.store.push_node(
                    kind_codes::PARENT_POINTER,
                    depth as u16,
                    parent,
                    NO_NODE,
                    NameCode::NONE,
                    PrefixCode::EMPTY,
                );
                self.link(depth, placeholder, parent);
                self.siblings_at_depth[depth] = 0;
            }
        }

        let nr = self
            .store
            .push_node(kind, depth as u16, alpha, beta, name, prefix);
        if let Some(parent) = parent {
            self.link(depth, nr, parent);
        }
        if let Some((line, column)) = self.location.take() {
            self.store.set_location(nr, line, column);
        }
        self.prev_at_depth[depth] = nr;
        self.siblings_at_depth[depth] += 1;
        Ok(nr)
    }

    /// Make `nr` the forward successor of the previous node at `depth`, and
    /// give it an owner link until a later sibling replaces it
    fn link(&mut self, depth: usize, nr: u32, parent: u32) {
        let prev = self.prev_at_depth[depth];
        if prev != NO_NODE {
            self.store.next[prev as usize] = nr;
        }
        self.store.next[nr as usize] = parent;
        self.prev_at_depth[depth] = nr;
    }

    /// Reset the per-depth state for the children of a closing container
    fn close_level(&mut self, child_depth: usize) {
        if let Some(prev) = self.prev_at_depth.get_mut(child_depth) {
            *prev = NO_NODE;
            self.siblings_at_depth[child_depth] = 0;
        }
    }

    pub fn start_document(&mut self) -> Result<()> {
        if !self.store.is_empty() {
            return Err(BuildError::LateDocumentStart.into());
        }
        let nr = self.add_node(
            kind_codes::DOCUMENT,
            NO_NODE,
            NO_NODE,
            NameCode::NONE,
            PrefixCode::EMPTY,
        )?;
        self.open.push(nr);
        Ok(())
    }

    pub fn end_document(&mut self) -> Result<()> {
        match self.open.as_slice() {
            &[doc] if self.store.kind_code(doc) == kind_codes::DOCUMENT => {
                self.open.pop();
                self.close_level(1);
                self.document_closed = true;
                Ok(())
            }
            [] => Err(BuildError::UnbalancedEnd.into()),
            _ => Err(BuildError::UnclosedElements(self.open_elements()).into()),
        }
    }

    fn open_elements(&self) -> usize {
        self.open
            .iter()
            .filter(|&&nr| self.store.kind_code(nr) == kind_codes::ELEMENT)
            .count()
    }

    /// Open an element; returns its node number
    pub fn start_element(&mut self, name: QName<'_>) -> Result<u32> {
        let pool = &self.config.name_pool;
        let code = pool.allocate(name.prefix, name.uri, name.local);
        let prefix = pool.allocate_prefix(name.prefix);
        let nr = self.add_node(kind_codes::ELEMENT, NO_NODE, NO_NODE, code, prefix)?;
        self.open.push(nr);
        self.start_tag = Some(nr);
        Ok(nr)
    }

    /// Record a namespace declaration on the element just started. An empty
    /// `uri` undeclares the prefix, or the default namespace when `prefix`
    /// is empty. Declarations of the `xml` prefix are implicit and dropped.
    pub fn namespace(&mut self, prefix: &str, uri: &str) -> Result<()> {
        let element = self.start_tag.ok_or(BuildError::NotInStartTag)?;
        if prefix == "xml" {
            return Ok(());
        }
        let binding = NamespaceBinding::intern(&self.config.name_pool, prefix, uri);
        self.store.push_namespace(element, binding);
        Ok(())
    }

    /// Add an attribute to the element just started. `xml:id` attributes
    /// are treated as IDs.
    pub fn attribute(&mut self, name: QName<'_>, value: &str) -> Result<()> {
        let is_id = name.uri == ns::XML && name.local == "id";
        self.add_attribute(name, value, is_id)
    }

    /// Add an attribute the parser knows to be of type ID
    pub fn id_attribute(&mut self, name: QName<'_>, value: &str) -> Result<()> {
        self.add_attribute(name, value, true)
    }

    fn add_attribute(&mut self, name: QName<'_>, value: &str, is_id: bool) -> Result<()> {
        let element = self.start_tag.ok_or(BuildError::NotInStartTag)?;
        let pool = &self.config.name_pool;
        let code = pool.allocate(name.prefix, name.uri, name.local);
        let prefix = pool.allocate_prefix(name.prefix);
        if !is_id {
            self.store.push_attribute(element, code, prefix, value);
            return Ok(());
        }
        // ID values are stored whitespace-trimmed
        let id = value.trim_matches(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));
        let idx = self.store.push_attribute(element, code, prefix, id);
        let in_document = self.store.kind_code(0) == kind_codes::DOCUMENT;
        if in_document && is_ncname(id) && !self.store.register_id(id, element, idx) {
            tracing::debug!(id, element, "duplicate ID ignored");
        }
        Ok(())
    }

    /// Line and column of the next node added
    pub fn set_location(&mut self, line: u32, column: u32) {
        if self.config.line_numbering {
            self.location = Some((line, column));
        }
    }

    /// System ID of the entity the following nodes come from
    pub fn set_system_id(&mut self, uri: &str) {
        let from = self.store.len() as u32;
        self.store.set_system_id(from, uri);
    }

    /// Add character data. Empty strings add nothing.
    pub fn characters(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        if self.config.merge_adjacent_text {
            if let Some(last) = self.mergeable_text() {
                // Text is only ever appended at the end of the buffer
                self.store.text.push_str(text);
                self.store.beta[last as usize] += text.len() as u32;
                return Ok(());
            }
        }
        self.check_room()?;
        let span = Span::append(&mut self.store.text, text);
        self.add_node(
            kind_codes::TEXT,
            span.offset,
            span.len,
            NameCode::NONE,
            PrefixCode::EMPTY,
        )?;
        Ok(())
    }

    /// The last node, if it is a text node at the current depth
    fn mergeable_text(&self) -> Option<u32> {
        if self.document_closed || (self.open.is_empty() && !self.store.is_empty()) {
            // Let add_node report the error
            return None;
        }
        let last = self.store.len().checked_sub(1)? as u32;
        (self.store.kind_code(last) == kind_codes::TEXT
            && self.store.depth(last) as usize == self.open.len())
        .then_some(last)
    }

    pub fn comment(&mut self, text: &str) -> Result<()> {
        self.check_room()?;
        let span = Span::append(&mut self.store.comment_text, text);
        self.add_node(
            kind_codes::COMMENT,
            span.offset,
            span.len,
            NameCode::NONE,
            PrefixCode::EMPTY,
        )?;
        Ok(())
    }

    pub fn processing_instruction(&mut self, target: &str, data: &str) -> Result<()> {
        self.check_room()?;
        let code = self.config.name_pool.allocate("", "", target);
        let span = Span::append(&mut self.store.comment_text, data);
        self.add_node(
            kind_codes::PROCESSING_INSTRUCTION,
            span.offset,
            span.len,
            code,
            PrefixCode::EMPTY,
        )?;
        Ok(())
    }

    pub fn end_element(&mut self) -> Result<()> {
        match self.open.last() {
            Some(&nr) if self.store.kind_code(nr) == kind_codes::ELEMENT => {
                self.open.pop();
                self.start_tag = None;
                self.close_level(self.open.len() + 1);
                Ok(())
            }
            _ => Err(BuildError::UnbalancedEnd.into()),
        }
    }

    /// Finish building. A document node left open is closed implicitly;
    /// open elements are an error.
    pub fn finish(mut self) -> Result<Arc<TreeStore>> {
        if self.store.is_empty() {
            return Err(BuildError::Empty.into());
        }
        match self.open.as_slice() {
            [] => {}
            &[doc] if self.store.kind_code(doc) == kind_codes::DOCUMENT => {
                self.open.pop();
            }
            _ => return Err(BuildError::UnclosedElements(self.open_elements()).into()),
        }

        self.store.shrink_to_fit();
        if self.config.validate {
            self.store.validate()?;
        }
        tracing::debug!(
            document = self.store.document_number(),
            nodes = self.store.len(),
            attributes = self.store.attribute_count(),
            namespaces = self.store.namespace_count(),
            "finished tree"
        );
        Ok(Arc::new(self.store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TreeError;
    use crate::tree::kind::NodeKind;

    fn isolated() -> TreeBuilder {
        TreeBuilder::with_config(BuilderConfig::default().with_name_pool(Arc::new(NamePool::new())))
    }

    fn build_err(result: Result<impl Sized>) -> BuildError {
        match result {
            Err(TreeError::Build(e)) => e,
            Err(other) => panic!("expected a build error, got {other}"),
            Ok(_) => panic!("expected a build error"),
        }
    }

    #[test]
    fn test_document_with_mixed_content() {
        let mut b = isolated();
        b.start_document().unwrap();
        b.comment(" prolog ").unwrap();
        b.start_element(QName::local("doc")).unwrap();
        b.characters("a").unwrap();
        b.processing_instruction("pi", "data").unwrap();
        b.characters("b").unwrap();
        b.end_element().unwrap();
        b.end_document().unwrap();
        let tree = b.finish().unwrap();

        let kinds: Vec<_> = (0..tree.len() as u32)
            .map(|i| tree.node_kind(i).unwrap())
            .collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Document,
                NodeKind::Comment,
                NodeKind::Element,
                NodeKind::Text,
                NodeKind::ProcessingInstruction,
                NodeKind::Text,
            ]
        );
        assert_eq!(tree.content_of(1), " prolog ");
        assert_eq!(tree.content_of(4), "data");
        assert_eq!(tree.string_value(2), "ab");
        assert_eq!(tree.string_value(0), "ab");
    }

    #[test]
    fn test_adjacent_text_merges() {
        let mut b = isolated();
        b.start_element(QName::local("p")).unwrap();
        b.characters("one ").unwrap();
        b.characters("two").unwrap();
        b.end_element().unwrap();
        let tree = b.finish().unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.content_of(1), "one two");
    }

    #[test]
    fn test_merge_can_be_disabled() {
        let config = BuilderConfig::default()
            .with_name_pool(Arc::new(NamePool::new()))
            .with_merge_adjacent_text(false);
        let mut b = TreeBuilder::with_config(config);
        b.start_element(QName::local("p")).unwrap();
        b.characters("one ").unwrap();
        b.characters("two").unwrap();
        b.end_element().unwrap();
        let tree = b.finish().unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.string_value(0), "one two");
    }

    #[test]
    fn test_text_after_child_is_not_merged_into_child() {
        let mut b = isolated();
        b.start_element(QName::local("p")).unwrap();
        b.start_element(QName::local("b")).unwrap();
        b.characters("inner").unwrap();
        b.end_element().unwrap();
        b.characters("outer").unwrap();
        b.end_element().unwrap();
        let tree = b.finish().unwrap();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.depth(2), 2);
        assert_eq!(tree.depth(3), 1);
        assert_eq!(tree.next_sibling_of(1), Some(3));
    }

    #[test]
    fn test_namespaces_and_attributes_grouped() {
        let mut b = isolated();
        let outer = b.start_element(QName::new("a", "urn:a", "outer")).unwrap();
        b.namespace("a", "urn:a").unwrap();
        b.namespace("xml", "http://www.w3.org/XML/1998/namespace")
            .unwrap();
        b.attribute(QName::local("x"), "1").unwrap();
        let inner = b.start_element(QName::local("inner")).unwrap();
        b.namespace("a", "").unwrap();
        b.attribute(QName::local("y"), "2").unwrap();
        b.attribute(QName::local("z"), "3").unwrap();
        b.end_element().unwrap();
        b.end_element().unwrap();
        let tree = b.finish().unwrap();

        assert_eq!(tree.declared_namespaces(outer).len(), 1);
        assert!(tree.declared_namespaces(inner)[0].is_undeclaration());
        assert_eq!(tree.attribute_range(outer), 0..1);
        assert_eq!(tree.attribute_range(inner), 1..3);
        assert_eq!(tree.attribute_parent(2), inner);
    }

    #[test]
    fn test_attribute_outside_start_tag() {
        let mut b = isolated();
        b.start_element(QName::local("a")).unwrap();
        b.characters("text").unwrap();
        assert_eq!(
            build_err(b.attribute(QName::local("late"), "v")),
            BuildError::NotInStartTag
        );
        assert_eq!(
            build_err(b.namespace("p", "urn:p")),
            BuildError::NotInStartTag
        );
    }

    #[test]
    fn test_unbalanced_events() {
        let mut b = isolated();
        assert_eq!(build_err(b.end_element()), BuildError::UnbalancedEnd);

        let mut b = isolated();
        b.start_document().unwrap();
        b.start_element(QName::local("a")).unwrap();
        assert_eq!(
            build_err(b.end_document()),
            BuildError::UnclosedElements(1)
        );
        assert_eq!(build_err(b.finish()), BuildError::UnclosedElements(1));
    }

    #[test]
    fn test_root_constraints() {
        let mut b = isolated();
        b.start_element(QName::local("a")).unwrap();
        b.end_element().unwrap();
        assert_eq!(
            build_err(b.start_element(QName::local("b"))),
            BuildError::MultipleRoots
        );
        assert_eq!(build_err(b.characters("x")), BuildError::MultipleRoots);

        let mut b = isolated();
        b.start_document().unwrap();
        b.end_document().unwrap();
        assert_eq!(build_err(b.comment("late")), BuildError::DocumentClosed);

        let mut b = isolated();
        b.comment("first").unwrap();
        assert_eq!(build_err(b.start_document()), BuildError::LateDocumentStart);

        assert_eq!(build_err(isolated().finish()), BuildError::Empty);
    }

    #[test]
    fn test_unclosed_document_is_closed_implicitly() {
        let mut b = isolated();
        b.start_document().unwrap();
        b.start_element(QName::local("a")).unwrap();
        b.end_element().unwrap();
        let tree = b.finish().unwrap();
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_placeholder_interval() {
        let config = BuilderConfig::default()
            .with_name_pool(Arc::new(NamePool::new()))
            .with_parent_pointer_interval(3);
        let mut b = TreeBuilder::with_config(config);
        b.start_element(QName::local("list")).unwrap();
        for _ in 0..7 {
            b.start_element(QName::local("item")).unwrap();
            b.end_element().unwrap();
        }
        b.end_element().unwrap();
        let tree = b.finish().unwrap();
        // root, 7 items, placeholders before the 4th and 7th item
        assert_eq!(tree.len(), 10);
        assert!(tree.is_placeholder(4));
        assert!(tree.is_placeholder(8));
        assert_eq!(tree.alpha[4], 0);
        assert_eq!(tree.parent_of(9), Some(0));
    }

    #[test]
    fn test_same_names_share_codes_across_trees() {
        let pool = Arc::new(NamePool::new());
        let build = || {
            let config = BuilderConfig::default().with_name_pool(Arc::clone(&pool));
            let mut b = TreeBuilder::with_config(config);
            b.start_element(QName::new("p", "urn:x", "e")).unwrap();
            b.end_element().unwrap();
            b.finish().unwrap()
        };
        let (a, b) = (build(), build());
        assert_eq!(a.name_code(0), b.name_code(0));
    }

    #[test]
    fn test_depth_limit() {
        let mut b = isolated();
        b.start_document().unwrap();
        let mut deepest = 0;
        for _ in 0..MAX_DEPTH {
            deepest = b.start_element(QName::local("e")).unwrap();
        }
        b.attribute(QName::local("k"), "v").unwrap();
        assert_eq!(
            build_err(b.start_element(QName::local("e"))),
            BuildError::TooDeep(MAX_DEPTH)
        );
        assert_eq!(build_err(b.characters("t")), BuildError::TooDeep(MAX_DEPTH));
        for _ in 0..MAX_DEPTH {
            b.end_element().unwrap();
        }
        b.characters("tail").unwrap();
        b.end_document().unwrap();
        let tree = b.finish().unwrap();

        let element = tree.node(deepest).unwrap();
        assert_eq!(element.depth() as usize, MAX_DEPTH);
        let attr = element.attributes().next().unwrap();
        assert_eq!(attr.depth(), u16::MAX);
    }

    #[test]
    fn test_rejected_events_leave_buffers_untouched() {
        let mut b = isolated();
        b.start_document().unwrap();
        b.start_element(QName::local("a")).unwrap();
        b.characters("kept").unwrap();
        b.comment("kept").unwrap();
        b.end_element().unwrap();
        b.end_document().unwrap();
        assert_eq!(build_err(b.characters("lost")), BuildError::DocumentClosed);
        assert_eq!(build_err(b.comment("lost")), BuildError::DocumentClosed);
        assert_eq!(
            build_err(b.processing_instruction("pi", "lost")),
            BuildError::DocumentClosed
        );
        let tree = b.finish().unwrap();
        assert_eq!(tree.text, "kept");
        assert_eq!(tree.comment_text, "kept");

        let mut b = isolated();
        b.comment("root").unwrap();
        assert_eq!(build_err(b.comment("second")), BuildError::MultipleRoots);
        assert_eq!(b.finish().unwrap().comment_text, "root");
    }

    #[test]
    fn test_xml_id_registration() {
        let mut b = isolated();
        let xml_id = QName::new("xml", ns::XML, "id");
        b.start_document().unwrap();
        b.start_element(QName::local("r")).unwrap();
        let first = b.start_element(QName::local("a")).unwrap();
        b.attribute(xml_id, "  one\n").unwrap();
        b.end_element().unwrap();
        b.start_element(QName::local("b")).unwrap();
        b.attribute(xml_id, "one").unwrap();
        b.end_element().unwrap();
        b.start_element(QName::local("c")).unwrap();
        b.attribute(xml_id, "not an id").unwrap();
        b.end_element().unwrap();
        let declared = b.start_element(QName::local("d")).unwrap();
        b.attribute(QName::local("plain"), "two").unwrap();
        b.id_attribute(QName::local("key"), "two").unwrap();
        b.end_element().unwrap();
        b.end_element().unwrap();
        b.end_document().unwrap();
        let tree = b.finish().unwrap();

        assert_eq!(tree.element_with_id("one"), Some(first));
        assert_eq!(tree.element_with_id("two"), Some(declared));
        assert_eq!(tree.element_with_id("not an id"), None);
        assert_eq!(tree.id_count(), 2);
        assert_eq!(tree.attribute_value_at(0), "one");
        assert!(tree.is_id_attribute(0));
        assert!(tree.is_id_attribute(1));
        assert!(!tree.is_id_attribute(2));
        assert!(!tree.is_id_attribute(3));
        assert!(tree.is_id_attribute(4));
        assert_eq!(tree.select_id("one").unwrap().local_name().as_deref(), Some("a"));
    }

    #[test]
    fn test_ids_need_a_document_root() {
        let mut b = isolated();
        b.start_element(QName::local("a")).unwrap();
        b.attribute(QName::new("xml", ns::XML, "id"), "x").unwrap();
        b.end_element().unwrap();
        let tree = b.finish().unwrap();
        assert_eq!(tree.element_with_id("x"), None);
        assert!(!tree.is_id_attribute(0));
    }

    #[test]
    fn test_line_numbers() {
        let config = BuilderConfig::default()
            .with_name_pool(Arc::new(NamePool::new()))
            .with_parent_pointer_interval(1)
            .with_line_numbering(true);
        let mut b = TreeBuilder::with_config(config);
        b.set_location(1, 1);
        b.start_element(QName::local("r")).unwrap();
        b.set_location(2, 3);
        b.start_element(QName::local("a")).unwrap();
        b.end_element().unwrap();
        b.characters("text").unwrap();
        b.set_location(4, 3);
        b.start_element(QName::local("b")).unwrap();
        b.end_element().unwrap();
        b.end_element().unwrap();
        let tree = b.finish().unwrap();

        assert!(tree.has_line_numbers());
        let r = tree.root();
        let lines: Vec<_> = std::iter::once(r.clone())
            .chain(r.iterate_axis(crate::Axis::Child, crate::NodeTest::AnyNode))
            .map(|n| (n.line_number(), n.column_number()))
            .collect();
        // The text node has no location of its own
        assert_eq!(
            lines,
            vec![
                (Some(1), Some(1)),
                (Some(2), Some(3)),
                (Some(2), Some(3)),
                (Some(4), Some(3)),
            ]
        );
        assert_eq!(tree.line_number(99), None);
    }

    #[test]
    fn test_line_numbering_off() {
        let mut b = isolated();
        b.set_location(7, 1);
        b.start_element(QName::local("r")).unwrap();
        b.end_element().unwrap();
        let tree = b.finish().unwrap();
        assert!(!tree.has_line_numbers());
        assert_eq!(tree.root().line_number(), None);
    }

    #[test]
    fn test_system_ids() {
        let mut b = isolated();
        b.set_system_id("file:///main.xml");
        b.start_document().unwrap();
        b.start_element(QName::local("r")).unwrap();
        b.set_system_id("file:///part.xml");
        let part = b.start_element(QName::local("part")).unwrap();
        b.attribute(QName::local("k"), "v").unwrap();
        b.end_element().unwrap();
        b.set_system_id("file:///main.xml");
        let after = b.start_element(QName::local("after")).unwrap();
        b.end_element().unwrap();
        b.end_element().unwrap();
        b.end_document().unwrap();
        let tree = b.finish().unwrap();

        assert_eq!(tree.system_id(0), Some("file:///main.xml"));
        assert_eq!(tree.system_id(1), Some("file:///main.xml"));
        assert_eq!(tree.system_id(part), Some("file:///part.xml"));
        assert_eq!(tree.system_id(after), Some("file:///main.xml"));
        let attr = tree.node(part).unwrap().attributes().next().unwrap();
        assert_eq!(attr.system_id(), Some("file:///part.xml"));
        assert_eq!(tree.system_id(99), None);
    }
}
