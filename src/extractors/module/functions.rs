// Module scanner - Function and lambda parsing
//
// Triggered by the `function` keyword. Reads the name, the parameter list and
// an optional `use (...)` clause, detects a `: Type` return annotation, and
// either opens a declaration or, for `function name(...);`, closes it on the
// spot.

use super::helpers::{collapse_whitespace, find_byte, is_identifier, return_type_of};
use super::lexical::{is_escaped, is_quote};
use super::{ModuleScanner, OpenDeclaration, Step};
use crate::extractors::base::{DeclarationKind, DeclarationOptions};

const KEYWORD_LEN: usize = "function".len();

/// Parameters of a function header
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ParameterList {
    /// Trimmed parameter texts
    pub(super) items: Vec<String>,
    /// Offset of the closing `)`
    pub(super) close: usize,
}

impl ParameterList {
    /// `($a, $b = 1)` with each parameter whitespace-collapsed
    pub(super) fn display(&self) -> String {
        let items: Vec<String> = self.items.iter().map(|p| collapse_whitespace(p)).collect();
        format!("({})", items.join(", "))
    }
}

/// Scan the parameter list whose `(` is at `open`
///
/// String literals (with escape parity) and nested `()` / `[]` are tracked so
/// that `')'` or `array(1, 2)` inside a default value neither ends the list nor
/// splits it. Returns `None` when the list never closes.
pub(super) fn scan_parameters(bytes: &[u8], open: usize) -> Option<ParameterList> {
    let mut items = Vec::new();
    let mut item_start = open + 1;
    let mut quote: Option<u8> = None;
    let mut depth = 0usize;
    let text = |a: usize, b: usize| String::from_utf8_lossy(&bytes[a..b]).trim().to_string();

    for at in open + 1..bytes.len() {
        let c = bytes[at];

        if let Some(q) = quote {
            if c == q && !is_escaped(bytes, at) {
                quote = None;
            }
            continue;
        }

        match c {
            _ if is_quote(c) && !is_escaped(bytes, at) => quote = Some(c),
            b'(' | b'[' => depth += 1,
            b')' if depth == 0 => {
                items.push(text(item_start, at));
                if items.last().is_some_and(|p| p.is_empty()) {
                    items.pop();
                }
                return Some(ParameterList { items, close: at });
            }
            b')' | b']' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                items.push(text(item_start, at));
                item_start = at + 1;
            }
            _ => {}
        }
    }

    None
}

/// `use (...)` clause directly after the parameter list closing at `close`
///
/// Returns the clause text as written (`($a, &$b)`) and the offset of its `)`.
pub(super) fn scan_use_clause(bytes: &[u8], close: usize) -> Option<(String, usize)> {
    let mut at = close + 1;
    while at < bytes.len() && bytes[at].is_ascii_whitespace() {
        at += 1;
    }

    let keyword = bytes.get(at..at + 3)?;
    if !keyword.eq_ignore_ascii_case(b"use") {
        return None;
    }
    match bytes.get(at + 3) {
        Some(&b) if b == b'(' || b.is_ascii_whitespace() => {}
        _ => return None,
    }

    let open = find_byte(bytes, b'(', at + 3)?;
    if !bytes[at + 3..open].iter().all(|b| b.is_ascii_whitespace()) {
        return None;
    }
    let clause = scan_parameters(bytes, open)?;
    let raw = String::from_utf8_lossy(&bytes[open..=clause.close]).into_owned();
    Some((raw, clause.close))
}

/// Parse a function or lambda whose `function` keyword starts at `at`
pub(super) fn parse_function(scanner: &mut ModuleScanner<'_>, at: usize) -> Step {
    let bytes = scanner.bytes;
    let after_keyword = at + KEYWORD_LEN;

    let Some(open_paren) = find_byte(bytes, b'(', after_keyword) else {
        scanner.keyword_run.clear();
        scanner.pos = after_keyword;
        return Step::Continue;
    };

    let raw_name = scanner.text(after_keyword, open_paren);
    let raw_name = raw_name.trim();
    let by_ref = raw_name.starts_with('&');
    let name = raw_name.trim_start_matches('&').trim_start().to_string();

    // `use function Foo\bar;` and friends: whatever sits before the next `(`
    // is not a function name, so this keyword does not start a declaration
    if !name.is_empty() && !is_identifier(&name) {
        scanner.keyword_run.clear();
        scanner.pos = after_keyword;
        return Step::Continue;
    }

    let Some(params) = scan_parameters(bytes, open_paren) else {
        return Step::Stop;
    };

    let mut header = params.display();
    let mut header_end = params.close;
    if let Some((clause, clause_close)) = scan_use_clause(bytes, params.close) {
        header.push_str(" use ");
        header.push_str(&clause);
        header_end = clause_close;
    }

    let (modifiers, run_begin) = scanner.keyword_run.take();
    let span_begin = run_begin.unwrap_or(at);
    let reference = if by_ref { "&" } else { "" };
    let mut signature = modifiers.join(" ");

    if name.is_empty() {
        signature.push_str(&format!(" function {}{}", reference, header));
    } else {
        signature.push_str(&format!(" function {}{}{}", reference, name, header));
    }

    let mut options = DeclarationOptions {
        modifiers,
        parameters: params.items,
        ..Default::default()
    };

    if !name.is_empty() {
        // Bodiless form: nothing but an optional return type before the next `;`
        if let Some(semicolon) = find_byte(bytes, b';', header_end + 1) {
            let tail = scanner.text(header_end + 1, semicolon);
            let tail = tail.trim();
            let return_type = return_type_of(tail);
            if tail.is_empty() || return_type.is_some() {
                if let Some(rt) = &return_type {
                    signature.push_str(&format!(": {}", rt));
                }
                options.signature = collapse_whitespace(&signature);
                options.return_type = return_type;
                scanner.close_bodiless(
                    DeclarationKind::Function,
                    name,
                    span_begin,
                    semicolon,
                    options,
                );
                scanner.pos = semicolon + 1;
                return Step::Continue;
            }
        }
    }

    options.return_type = find_byte(bytes, b'{', header_end + 1)
        .and_then(|brace| return_type_of(&scanner.text(header_end + 1, brace)));
    if let Some(rt) = &options.return_type {
        signature.push_str(&format!(": {}", rt));
    }
    options.signature = collapse_whitespace(&signature);

    let frame = if !name.is_empty() {
        OpenDeclaration::new(DeclarationKind::Function, name, span_begin, options)
    } else if scanner.config.collect_anonymous_functions {
        let placeholder = format!("anonymous function at offset {}", span_begin);
        OpenDeclaration::new(
            DeclarationKind::LambdaFunction,
            placeholder,
            span_begin,
            options,
        )
    } else {
        OpenDeclaration::suppressed(DeclarationKind::LambdaFunction, span_begin)
    };
    scanner.push_open(frame);

    scanner.pos = header_end + 1;
    Step::Continue
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_parameters_with_string_paren() {
        let src = br#"($a, $b = ')') {"#;
        let params = scan_parameters(src, 0).unwrap();
        assert_eq!(params.items, vec!["$a", "$b = ')'"]);
        assert_eq!(src[params.close], b')');
        assert_eq!(params.close, 13);
    }

    #[test]
    fn test_scan_parameters_nested_default() {
        let src = b"($a = array(1, 2), $b = [3, 4], $c = foo())";
        let params = scan_parameters(src, 0).unwrap();
        assert_eq!(
            params.items,
            vec!["$a = array(1, 2)", "$b = [3, 4]", "$c = foo()"]
        );
        assert_eq!(params.close, src.len() - 1);
    }

    #[test]
    fn test_scan_parameters_escaped_quote() {
        let src = br#"($a = 'it\'s, fine', $b = "\\")"#;
        let params = scan_parameters(src, 0).unwrap();
        assert_eq!(params.items, vec![r#"$a = 'it\'s, fine'"#, r#"$b = "\\""#]);
    }

    #[test]
    fn test_scan_parameters_trailing_comma_and_empty() {
        assert!(scan_parameters(b"()", 0).unwrap().items.is_empty());
        assert_eq!(
            scan_parameters(b"(\n    $a,\n    $b,\n)", 0).unwrap().items,
            vec!["$a", "$b"]
        );
    }

    #[test]
    fn test_scan_parameters_unterminated() {
        assert_eq!(scan_parameters(b"($a, $b", 0), None);
    }

    #[test]
    fn test_display_collapses_newlines() {
        let params = scan_parameters(b"(\n    int $a,\n    string\n    $b\n)", 0).unwrap();
        assert_eq!(params.display(), "(int $a, string $b)");
    }

    #[test]
    fn test_use_clause() {
        let src = b"function ($x) use ($y, &$z) {";
        let close = 12;
        assert_eq!(src[close], b')');
        let (clause, end) = scan_use_clause(src, close).unwrap();
        assert_eq!(clause, "($y, &$z)");
        assert_eq!(src[end], b')');
    }

    #[test]
    fn test_use_clause_requires_keyword() {
        assert_eq!(scan_use_clause(b"() useless()", 1), None);
        assert_eq!(scan_use_clause(b"() {}", 1), None);
        assert_eq!(scan_use_clause(b"() ; use ($a)", 1), None);
    }
}
