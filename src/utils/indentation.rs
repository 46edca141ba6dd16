//! Indentation normalization for captured declaration text
//!
//! A method captured from inside a class carries the class's indentation on
//! every line but the first (the first line starts at the declaration keyword).
//! Normalizing removes the smallest indentation found on the remaining
//! non-blank lines so the text reads as if it were written at column zero.

/// Columns of leading whitespace on `line` (space = 1, tab = `tab_width`)
pub fn leading_columns(line: &str, tab_width: usize) -> usize {
    let mut columns = 0;
    for b in line.bytes() {
        match b {
            b' ' => columns += 1,
            b'\t' => columns += tab_width,
            _ => break,
        }
    }
    columns
}

/// Smallest indentation over every non-blank line after the first
///
/// Returns `None` when there is no such line.
pub fn common_indent(text: &str, tab_width: usize) -> Option<usize> {
    text.split('\n')
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| leading_columns(line, tab_width))
        .min()
}

/// Remove up to `columns` columns of indentation from the start of `line`
///
/// When a tab straddles the cut, the columns it covered past the cut come back
/// as spaces so relative alignment survives.
pub fn strip_columns(line: &str, columns: usize, tab_width: usize) -> String {
    let bytes = line.as_bytes();
    let mut remaining = columns as isize;
    let mut i = 0;

    while i < bytes.len() && remaining > 0 {
        match bytes[i] {
            b' ' => remaining -= 1,
            b'\t' => remaining -= tab_width as isize,
            _ => break,
        }
        i += 1;
    }

    let mut stripped = String::with_capacity(line.len());
    if remaining < 0 {
        stripped.push_str(&" ".repeat((-remaining) as usize));
    }
    stripped.push_str(&line[i..]);
    stripped
}

/// Strip the common indentation from every line of `text`
///
/// Returns the normalized text and the number of columns removed.
pub fn normalize(text: &str, tab_width: usize) -> (String, usize) {
    match common_indent(text, tab_width) {
        Some(columns) if columns > 0 => {
            let normalized = text
                .split('\n')
                .map(|line| strip_columns(line, columns, tab_width))
                .collect::<Vec<_>>()
                .join("\n");
            (normalized, columns)
        }
        _ => (text.to_string(), 0),
    }
}

/// Re-apply `columns` spaces of indentation to every line after the first
///
/// Inverse of [`normalize`] for space-indented text whose blank lines carry at
/// least the common indentation.
pub fn reindent(text: &str, columns: usize) -> String {
    let pad = " ".repeat(columns);
    text.split('\n')
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.to_string()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
