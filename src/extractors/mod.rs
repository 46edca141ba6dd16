//! declscan Extractors Module
//!
//! Declaration extraction for brace-delimited PHP-style source.
//!
//! # Architecture
//!
//! - `base` - Declaration types, configuration, errors and the shared base extractor
//! - `module` - The single-pass module scanner (`ModuleParser`)
//! - `manager.rs` - ExtractorManager public API (files, batches, globs)

pub mod base;
pub mod manager;
pub mod module;

// Re-export the public API
pub use base::{
    Declaration, DeclarationKind, ExtractError, ModuleOutline, ParserConfig, Visibility,
};
pub use manager::ExtractorManager;
pub use module::ModuleParser;
