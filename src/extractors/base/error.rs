// Error type for everything around the scanner
//
// The scanner itself never fails; these cover configuration and I/O.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid parser configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid glob pattern: {0}")]
    InvalidGlob(#[from] glob::PatternError),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
