//! Qualified names as handed to the builder

/// A (prefix, namespace URI, local name) triple borrowed from the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QName<'a> {
    pub prefix: &'a str,
    pub uri: &'a str,
    pub local: &'a str,
}

impl<'a> QName<'a> {
    pub const fn new(prefix: &'a str, uri: &'a str, local: &'a str) -> Self {
        Self { prefix, uri, local }
    }

    /// A name in no namespace
    pub const fn local(local: &'a str) -> Self {
        Self {
            prefix: "",
            uri: "",
            local,
        }
    }

    /// Build from a lexical `prefix:local` name and an already-resolved URI
    pub fn from_lexical(lexical: &'a str, uri: &'a str) -> Self {
        let (prefix, local) = split_lexical(lexical);
        Self {
            prefix: prefix.unwrap_or(""),
            uri,
            local,
        }
    }
}

/// Split a lexical name into prefix and local part at the first colon
pub fn split_lexical(name: &str) -> (Option<&str>, &str) {
    match memchr::memchr(b':', name.as_bytes()) {
        // ':' is ASCII so both halves stay on char boundaries
        Some(pos) => (Some(&name[..pos]), &name[pos + 1..]),
        None => (None, name),
    }
}

/// Split a Clark name `{uri}local` into (uri, local).
/// A name without braces is in no namespace. Returns `None` when the closing
/// brace or the local part is missing.
pub fn parse_clark(expanded: &str) -> Option<(&str, &str)> {
    let Some(rest) = expanded.strip_prefix('{') else {
        return if expanded.is_empty() {
            None
        } else {
            Some(("", expanded))
        };
    };
    let close = memchr::memchr(b'}', rest.as_bytes())?;
    let local = &rest[close + 1..];
    if local.is_empty() {
        return None;
    }
    Some((&rest[..close], local))
}

/// True if `name` is a non-colonized XML name. Bytes at or above 0x80 are
/// accepted as name characters without further classification.
pub fn is_ncname(name: &str) -> bool {
    let mut bytes = name.bytes();
    match bytes.next() {
        Some(first) if is_ncname_start(first) => bytes.all(is_ncname_char),
        _ => false,
    }
}

#[inline]
fn is_ncname_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

#[inline]
fn is_ncname_char(b: u8) -> bool {
    is_ncname_start(b) || b.is_ascii_digit() || b == b'-' || b == b'.'
}
