// declscan Utilities Module
//
// Helpers shared by the scanner and the extractor manager.

use std::path::Path;

use crate::extractors::base::ExtractError;

/// File utilities
pub mod file_utils {
    use super::*;
    use std::fs;

    /// Extensions treated as PHP-style source when expanding directories
    pub const SOURCE_EXTENSIONS: [&str; 4] = ["php", "phtml", "inc", "module"];

    /// Check if a file has a supported source extension
    pub fn is_supported_file(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                SOURCE_EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }

    /// Read file content, replacing invalid UTF-8 instead of failing
    pub fn read_file_content(path: &Path) -> Result<String, ExtractError> {
        let bytes = fs::read(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }
}

/// Indentation normalization for captured text
pub mod indentation;

/// Byte offset to line number lookup
pub mod line_index;

/// Compute blake3 hash of content string
///
/// Returns the 64-character hex digest.
pub fn hash_content(content: &str) -> String {
    blake3::hash(content.as_bytes()).to_hex().to_string()
}
