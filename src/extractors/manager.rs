//! ExtractorManager - Public API for declaration extraction
//!
//! Wraps a [`ModuleParser`] with the file-facing operations: reading files,
//! hashing content, batch extraction over many paths and glob expansion.
//! The scanner itself stays pure; everything that can fail lives here.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::extractors::base::{ExtractError, ModuleOutline, ParserConfig};
use crate::extractors::module::ModuleParser;
use crate::utils::{file_utils, hash_content};

/// Manager for declaration extraction over source texts and files
#[derive(Debug, Clone, Default)]
pub struct ExtractorManager {
    parser: ModuleParser,
}

impl ExtractorManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a manager with a validated configuration
    pub fn with_config(config: ParserConfig) -> Result<Self, ExtractError> {
        Ok(Self {
            parser: ModuleParser::new(config)?,
        })
    }

    pub fn parser(&self) -> &ModuleParser {
        &self.parser
    }

    /// Extract declarations from in-memory source text
    pub fn extract_source(&self, source: &str) -> ModuleOutline {
        let declarations = self.parser.parse(source);
        debug!(
            "Extracted {} top-level declaration(s) from {} bytes of source",
            declarations.len(),
            source.len()
        );
        ModuleOutline {
            file_path: None,
            content_hash: hash_content(source),
            declarations,
        }
    }

    /// Read and extract a single file
    pub fn extract_file(&self, path: &Path) -> Result<ModuleOutline, ExtractError> {
        let content = file_utils::read_file_content(path)?;
        let mut outline = self.extract_source(&content);
        outline.file_path = Some(path.to_string_lossy().into_owned());
        debug!(
            "Extracted {} declaration(s) from file: {}",
            outline.declaration_count(),
            path.display()
        );
        Ok(outline)
    }

    /// Treat `input` as a path when it names an existing file, else as source
    pub fn extract_source_or_path(&self, input: &str) -> Result<ModuleOutline, ExtractError> {
        // Source text containing NUL or newlines can never be a usable path
        let looks_like_path = !input.contains(['\n', '\0']);
        if looks_like_path && Path::new(input).is_file() {
            return self.extract_file(Path::new(input));
        }
        Ok(self.extract_source(input))
    }

    /// Extract many files in parallel
    ///
    /// Results come back in the same order as `paths`. Failures are logged and
    /// returned in place; they do not abort the rest of the batch.
    pub fn extract_files_batch(&self, paths: &[PathBuf]) -> Vec<Result<ModuleOutline, ExtractError>> {
        paths
            .par_iter()
            .map(|path| {
                self.extract_file(path).inspect_err(|e| {
                    warn!("Failed to extract declarations from {}: {}", path.display(), e);
                })
            })
            .collect()
    }

    /// Extract every supported file matching a glob pattern
    ///
    /// Unreadable matches are skipped with a warning; an invalid pattern is an
    /// error.
    pub fn extract_glob(&self, pattern: &str) -> Result<Vec<ModuleOutline>, ExtractError> {
        let mut paths: Vec<PathBuf> = glob::glob(pattern)?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("Skipping unreadable glob match: {}", e);
                    None
                }
            })
            .filter(|path| path.is_file() && file_utils::is_supported_file(path))
            .collect();
        paths.sort();

        debug!("Glob '{}' matched {} source file(s)", pattern, paths.len());

        Ok(self
            .extract_files_batch(&paths)
            .into_iter()
            .filter_map(Result::ok)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::DeclarationKind;
    use std::fs;
    use tempfile::TempDir;

    const SOURCE: &str = "<?php\nclass Greeter\n{\n    public function hi()\n    {\n        return 'hi';\n    }\n}\n";

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_extract_source() {
        let manager = ExtractorManager::new();
        let outline = manager.extract_source(SOURCE);

        assert_eq!(outline.file_path, None);
        assert_eq!(outline.content_hash, hash_content(SOURCE));
        assert_eq!(outline.declarations.len(), 1);
        assert_eq!(outline.declaration_count(), 2, "class plus its method");
    }

    #[test]
    fn test_extract_file_records_path() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "greeter.php", SOURCE);

        let outline = ExtractorManager::new().extract_file(&path).unwrap();
        assert_eq!(outline.file_path.as_deref(), Some(path.to_string_lossy().as_ref()));
        assert_eq!(outline.declarations[0].name, "Greeter");
    }

    #[test]
    fn test_extract_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.php");

        let err = ExtractorManager::new().extract_file(&missing).unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }), "got {:?}", err);
        assert!(err.to_string().contains("missing.php"));
    }

    #[test]
    fn test_extract_source_or_path() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.php", "function fromFile() {}");
        let manager = ExtractorManager::new();

        let from_path = manager
            .extract_source_or_path(&path.to_string_lossy())
            .unwrap();
        assert_eq!(from_path.declarations[0].name, "fromFile");
        assert!(from_path.file_path.is_some());

        let from_source = manager
            .extract_source_or_path("function inline() {}")
            .unwrap();
        assert_eq!(from_source.declarations[0].name, "inline");
        assert_eq!(from_source.file_path, None);
    }

    #[test]
    fn test_batch_preserves_order_and_reports_failures() {
        let dir = TempDir::new().unwrap();
        let paths = vec![
            write(&dir, "one.php", "function one() {}"),
            dir.path().join("absent.php"),
            write(&dir, "two.php", "function two() {}"),
        ];

        let results = ExtractorManager::new().extract_files_batch(&paths);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().declarations[0].name, "one");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().declarations[0].name, "two");
    }

    #[test]
    fn test_extract_glob_filters_unsupported_files() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.php", "class B {}");
        write(&dir, "a.php", "interface A {}");
        write(&dir, "notes.txt", "class NotSource {}");

        let pattern = format!("{}/*", dir.path().display());
        let outlines = ExtractorManager::new().extract_glob(&pattern).unwrap();

        let kinds: Vec<_> = outlines
            .iter()
            .map(|o| o.declarations[0].kind)
            .collect();
        assert_eq!(kinds, vec![DeclarationKind::Interface, DeclarationKind::Class]);
    }

    #[test]
    fn test_extract_glob_invalid_pattern() {
        let err = ExtractorManager::new().extract_glob("[").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidGlob(_)));
    }

    #[test]
    fn test_with_config_applies_toggles() {
        let config = ParserConfig::default().with_anonymous_functions(false);
        let manager = ExtractorManager::with_config(config).unwrap();
        let outline = manager.extract_source("$f = function () {};");
        assert!(outline.declarations.is_empty());

        assert!(ExtractorManager::with_config(ParserConfig::default().with_tab_width(0)).is_err());
    }

    #[test]
    fn test_outline_json_export() {
        let outline = ExtractorManager::new().extract_source(SOURCE);
        let json = outline.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["declarations"][0]["kind"], "class");
        assert_eq!(value["declarations"][0]["children"][0]["name"], "hi");
    }
}
