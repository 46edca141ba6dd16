// BaseExtractor implementation for declscan
//
// Owns the scanned text and the helpers every extraction step needs:
// lossy slicing, line lookup, id generation and doc comment discovery.

use crate::utils::line_index::LineIndex;

use super::types::DeclarationKind;

/// Shared state for extracting declarations from one source text
pub struct BaseExtractor<'a> {
    pub content: &'a str,
    pub line_index: LineIndex,
}

impl<'a> BaseExtractor<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            line_index: LineIndex::new(content),
        }
    }

    /// Get the text in `[begin, end)`
    ///
    /// Uses a byte slice so offsets that land inside a multi-byte character
    /// degrade to replacement characters instead of panicking.
    pub fn get_text(&self, begin: usize, end: usize) -> String {
        let content_bytes = self.content.as_bytes();
        let end = end.min(content_bytes.len());
        if begin < end {
            String::from_utf8_lossy(&content_bytes[begin..end]).to_string()
        } else {
            String::new()
        }
    }

    /// Find the `/** ... */` block that directly precedes `begin`
    ///
    /// Only whitespace may separate the comment from the declaration. Plain
    /// `/* */` blocks and line comments are not documentation.
    pub fn find_doc_comment(&self, begin: usize) -> Option<String> {
        let head = self.content.get(..begin)?;
        let trimmed = head.trim_end();
        if !trimmed.ends_with("*/") {
            return None;
        }

        let comment_start = trimmed[..trimmed.len() - 2].rfind("/*")?;
        let comment = &trimmed[comment_start..];
        if comment.starts_with("/**") && comment.len() >= 5 {
            Some(comment.to_string())
        } else {
            None
        }
    }

    /// Generate ID for a declaration (MD5 hash of kind, name and offset)
    pub fn generate_id(&self, kind: DeclarationKind, name: &str, begin: usize) -> String {
        let input = format!("{}:{}:{}", kind, name, begin);
        let digest = md5::compute(input.as_bytes());
        format!("{:x}", digest)
    }
}
