// Base Extractor Types and Helpers for declscan
//
// - types.rs: Declaration, DeclarationKind, Visibility, ModuleOutline
// - config.rs: ParserConfig
// - error.rs: ExtractError
// - extractor.rs: BaseExtractor (text slicing, ids, doc comments)
// - creation_methods.rs: Declaration construction from a closed span

pub mod config;
pub mod creation_methods;
pub mod error;
pub mod extractor;
pub mod types;

// Re-export key types for external use
pub use config::{ParserConfig, DEFAULT_MODIFIERS};
pub use creation_methods::DeclarationOptions;
pub use error::ExtractError;
pub use extractor::BaseExtractor;
pub use types::{Declaration, DeclarationKind, ModuleOutline, Visibility};
