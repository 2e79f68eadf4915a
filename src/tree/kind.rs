//! Node kinds
//!
//! The tree stores kinds as one byte per node. Codes follow the W3C DOM
//! numbering. One extra code marks the internal parent-pointer placeholder
//! that the builder threads into long sibling chains; it is never surfaced
//! as a node.

/// Raw kind codes as stored in the `kind` column
pub mod kind_codes {
    pub const ELEMENT: u8 = 1;
    pub const ATTRIBUTE: u8 = 2;
    pub const TEXT: u8 = 3;
    pub const PROCESSING_INSTRUCTION: u8 = 7;
    pub const COMMENT: u8 = 8;
    pub const DOCUMENT: u8 = 9;
    /// Sibling-chain placeholder holding a parent pointer in `alpha`
    pub const PARENT_POINTER: u8 = 12;
    pub const NAMESPACE: u8 = 13;
}

/// Kind of a node in the data model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Element,
    Attribute,
    Text,
    Comment,
    ProcessingInstruction,
    Namespace,
}

impl NodeKind {
    /// Kind for a stored code; `None` for the parent-pointer placeholder
    #[inline]
    pub const fn from_code(code: u8) -> Option<NodeKind> {
        match code {
            kind_codes::ELEMENT => Some(NodeKind::Element),
            kind_codes::ATTRIBUTE => Some(NodeKind::Attribute),
            kind_codes::TEXT => Some(NodeKind::Text),
            kind_codes::PROCESSING_INSTRUCTION => Some(NodeKind::ProcessingInstruction),
            kind_codes::COMMENT => Some(NodeKind::Comment),
            kind_codes::DOCUMENT => Some(NodeKind::Document),
            kind_codes::NAMESPACE => Some(NodeKind::Namespace),
            _ => None,
        }
    }

    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            NodeKind::Element => kind_codes::ELEMENT,
            NodeKind::Attribute => kind_codes::ATTRIBUTE,
            NodeKind::Text => kind_codes::TEXT,
            NodeKind::ProcessingInstruction => kind_codes::PROCESSING_INSTRUCTION,
            NodeKind::Comment => kind_codes::COMMENT,
            NodeKind::Document => kind_codes::DOCUMENT,
            NodeKind::Namespace => kind_codes::NAMESPACE,
        }
    }

    /// Kinds that may have children
    #[inline]
    pub const fn is_container(self) -> bool {
        matches!(self, NodeKind::Document | NodeKind::Element)
    }

    /// Kinds that carry a name
    #[inline]
    pub const fn is_named(self) -> bool {
        matches!(
            self,
            NodeKind::Element
                | NodeKind::Attribute
                | NodeKind::ProcessingInstruction
                | NodeKind::Namespace
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Element => "element",
            NodeKind::Attribute => "attribute",
            NodeKind::Text => "text",
            NodeKind::Comment => "comment",
            NodeKind::ProcessingInstruction => "processing-instruction",
            NodeKind::Namespace => "namespace",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
