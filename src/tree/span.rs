//! Span - offset and length into one of the tree's character buffers
//!
//! Text, comment, PI and attribute contents are appended to shared buffers
//! instead of being allocated per node.

/// A span referencing a portion of a character buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Byte offset into the buffer
    pub offset: u32,
    /// Length in bytes
    pub len: u32,
}

impl Span {
    #[inline]
    pub const fn new(offset: u32, len: u32) -> Self {
        Self { offset, len }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// End offset (exclusive)
    #[inline]
    pub const fn end(&self) -> u32 {
        self.offset.saturating_add(self.len)
    }

    /// Extract the text from `buffer`; empty if the span does not fit
    #[inline]
    pub fn slice<'a>(&self, buffer: &'a str) -> &'a str {
        buffer
            .get(self.offset as usize..self.end() as usize)
            .unwrap_or("")
    }

    /// Append `text` to `buffer` and return its span
    pub(crate) fn append(buffer: &mut String, text: &str) -> Self {
        let offset = buffer.len() as u32;
        buffer.push_str(text);
        Self::new(offset, text.len() as u32)
    }
}
