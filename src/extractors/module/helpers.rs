//! Helper utilities and regex patterns for the module scanner.

use regex::Regex;
use std::sync::LazyLock;

/// Regex for a declared return type: `: Type` and nothing else
pub(super) static RETURN_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:\s*([A-Za-z_]\w*)$").unwrap());

/// Regex for whitespace runs collapsed in signatures
pub(super) static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Characters after which a declaration keyword may start (besides whitespace)
pub(super) const BOUNDARY_CHARS: &[u8] = b"([{)]}=&@";

pub(super) fn is_boundary(b: u8) -> bool {
    b.is_ascii_whitespace() || BOUNDARY_CHARS.contains(&b)
}

pub(super) fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

/// True for `[A-Za-z_\x80-\xff][A-Za-z0-9_\x80-\xff]*`
pub(super) fn is_identifier(text: &str) -> bool {
    let mut bytes = text.bytes();
    match bytes.next() {
        Some(first) if is_ident_byte(first) && !first.is_ascii_digit() => {
            bytes.all(is_ident_byte)
        }
        _ => false,
    }
}

/// First occurrence of `needle` at or after `from`
pub(super) fn find_byte(bytes: &[u8], needle: u8, from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|i| i + from)
}

/// First occurrence of `needle` at or after `from`
pub(super) fn find_bytes(bytes: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| i + from)
}

/// Trim and collapse every whitespace run into a single space
pub(super) fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}

/// Extract the type from a `: Type` tail, if the tail is exactly that
pub(super) fn return_type_of(tail: &str) -> Option<String> {
    RETURN_TYPE_RE
        .captures(tail.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Offset of a `new` token directly before `at`, whitespace allowed in between
pub(super) fn preceding_new(bytes: &[u8], at: usize) -> Option<usize> {
    let mut end = at;
    while end > 0 && bytes[end - 1].is_ascii_whitespace() {
        end -= 1;
    }
    if end < 3 || !bytes[end - 3..end].eq_ignore_ascii_case(b"new") {
        return None;
    }
    let start = end - 3;
    if start > 0 && is_ident_byte(bytes[start - 1]) {
        return None;
    }
    Some(start)
}
