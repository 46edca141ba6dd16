// Module scanner - Declaration keyword recognition
//
// A keyword only counts when it starts right after whitespace or a boundary
// character and ends at whitespace, a boundary character or end of input.

use super::helpers::{is_boundary, is_ident_byte};
use crate::extractors::base::ParserConfig;

/// Word recognized at a token boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Keyword {
    Function,
    Class,
    Interface,
    Trait,
    Modifier(String),
}

/// True when a token may start at `at`
pub(super) fn at_token_start(bytes: &[u8], at: usize) -> bool {
    at == 0 || is_boundary(bytes[at - 1])
}

/// Length of the identifier-like word starting at `at`
pub(super) fn word_len(bytes: &[u8], at: usize) -> usize {
    bytes[at..].iter().take_while(|&&b| is_ident_byte(b)).count()
}

/// Classify the word `bytes[at..at + len]`
///
/// Returns `None` for words that are not keywords or that run straight into
/// a non-boundary character (`class::`, `public$x`).
pub(super) fn classify(bytes: &[u8], at: usize, len: usize, config: &ParserConfig) -> Option<Keyword> {
    if len == 0 {
        return None;
    }
    if let Some(&after) = bytes.get(at + len) {
        if !is_boundary(after) {
            return None;
        }
    }

    let word = String::from_utf8_lossy(&bytes[at..at + len]).to_ascii_lowercase();
    match word.as_str() {
        "function" => Some(Keyword::Function),
        "class" => Some(Keyword::Class),
        "interface" => Some(Keyword::Interface),
        "trait" => Some(Keyword::Trait),
        _ => config
            .modifiers
            .iter()
            .find(|m| m.eq_ignore_ascii_case(&word))
            .map(|_| Keyword::Modifier(word)),
    }
}

/// Modifier keywords seen since the last declaration or unrelated token
#[derive(Debug, Default)]
pub(super) struct KeywordRun {
    keywords: Vec<String>,
    begin: usize,
}

impl KeywordRun {
    pub(super) fn push(&mut self, keyword: String, at: usize) {
        if self.keywords.is_empty() {
            self.begin = at;
        }
        self.keywords.push(keyword);
    }

    pub(super) fn clear(&mut self) {
        self.keywords.clear();
    }

    /// Start offset of the run, if it holds anything
    pub(super) fn begin(&self) -> Option<usize> {
        (!self.keywords.is_empty()).then_some(self.begin)
    }

    /// Hand the run over to a declaration and reset it
    pub(super) fn take(&mut self) -> (Vec<String>, Option<usize>) {
        let begin = self.begin();
        (std::mem::take(&mut self.keywords), begin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_str(src: &str) -> Option<Keyword> {
        let bytes = src.as_bytes();
        classify(bytes, 0, word_len(bytes, 0), &ParserConfig::default())
    }

    #[test]
    fn test_declaration_keywords_case_insensitive() {
        assert_eq!(classify_str("function foo"), Some(Keyword::Function));
        assert_eq!(classify_str("FUNCTION("), Some(Keyword::Function));
        assert_eq!(classify_str("Class A"), Some(Keyword::Class));
        assert_eq!(classify_str("interface"), Some(Keyword::Interface));
        assert_eq!(classify_str("trait{"), Some(Keyword::Trait));
    }

    #[test]
    fn test_modifiers_lowercased() {
        assert_eq!(
            classify_str("PUBLIC function"),
            Some(Keyword::Modifier("public".to_string()))
        );
    }

    #[test]
    fn test_word_must_end_at_boundary() {
        assert_eq!(classify_str("functionX()"), None);
        assert_eq!(classify_str("function_exists()"), None);
        assert_eq!(classify_str("class::"), None);
        assert_eq!(classify_str("public$x"), None);
        assert_eq!(classify_str("$x"), None);
    }

    #[test]
    fn test_token_start() {
        let src = b"a(function =function";
        assert!(at_token_start(src, 0));
        assert!(at_token_start(src, 2));
        assert!(!at_token_start(src, 3));
        assert!(at_token_start(src, 12));
    }

    #[test]
    fn test_keyword_run() {
        let mut run = KeywordRun::default();
        assert_eq!(run.begin(), None);
        run.push("public".to_string(), 4);
        run.push("static".to_string(), 11);
        assert_eq!(run.begin(), Some(4));
        let (keywords, begin) = run.take();
        assert_eq!(keywords, vec!["public", "static"]);
        assert_eq!(begin, Some(4));
        assert_eq!(run.begin(), None);
    }
}
