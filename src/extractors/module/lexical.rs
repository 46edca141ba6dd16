// Module scanner - Strings, comments, heredoc/nowdoc
//
// Everything here answers one question for the main loop: does the text at
// this position belong to code, or must it be stepped over?

use super::helpers::{find_byte, find_bytes};

/// Outcome of testing a position for a comment or heredoc
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Skip {
    /// Plain code, nothing to skip
    Nothing,
    /// Resume scanning at this offset
    Resume(usize),
    /// The construct never ends; scanning has to stop
    Unterminated,
}

/// True when the quote at `at` is escaped by an odd run of backslashes
pub(super) fn is_escaped(bytes: &[u8], at: usize) -> bool {
    let backslashes = bytes[..at]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count();
    backslashes % 2 == 1
}

pub(super) fn is_quote(b: u8) -> bool {
    b == b'\'' || b == b'"'
}

/// Test `at` for a line comment, block comment or heredoc, in that order
pub(super) fn skip_non_code(bytes: &[u8], at: usize) -> Skip {
    let next = bytes.get(at + 1).copied();
    match bytes[at] {
        b'#' => skip_line_comment(bytes, at + 1),
        b'/' if next == Some(b'/') => skip_line_comment(bytes, at + 2),
        b'/' if next == Some(b'*') => match find_bytes(bytes, b"*/", at + 2) {
            Some(close) => Skip::Resume(close + 2),
            None => Skip::Unterminated,
        },
        b'<' if bytes[at..].starts_with(b"<<<") => skip_heredoc(bytes, at),
        _ => Skip::Nothing,
    }
}

/// A line comment runs to the newline (left for the scanner) or end of input
fn skip_line_comment(bytes: &[u8], from: usize) -> Skip {
    Skip::Resume(find_byte(bytes, b'\n', from).unwrap_or(bytes.len()))
}

/// `<<<TOKEN`, `<<<"TOKEN"` or `<<<'TOKEN'` up to a `\nTOKEN;` line
fn skip_heredoc(bytes: &[u8], at: usize) -> Skip {
    let token_start = at + 3;
    let Some(line_end) = find_byte(bytes, b'\n', token_start) else {
        return Skip::Unterminated;
    };

    let raw = String::from_utf8_lossy(&bytes[token_start..line_end]);
    let token = raw.trim().trim_matches(|c| c == '\'' || c == '"');
    if token.is_empty() {
        return Skip::Nothing;
    }

    let terminator = format!("\n{};", token);
    match find_bytes(bytes, terminator.as_bytes(), line_end) {
        Some(found) => Skip::Resume(found + terminator.len()),
        None => Skip::Unterminated,
    }
}
