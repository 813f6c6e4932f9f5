//! Loader error taxonomy

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::FrontMatterError;

/// Failure of an article store operation. Nothing is recovered locally;
/// each variant reaches the caller unchanged.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The content directory is missing or cannot be listed
    #[error("content store {} is unavailable: {source}", path.display())]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No file backs the requested slug
    #[error("no article `{slug}` (expected {})", path.display())]
    FileNotFound { slug: String, path: PathBuf },

    /// The file exists but its front-matter block is malformed
    #[error("malformed front-matter in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    /// Any other failure reading an existing article file
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The slug would name a file outside the content store
    #[error("invalid article slug `{0}`")]
    InvalidSlug(String),
}

impl LoadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::FileNotFound { .. } | LoadError::InvalidSlug(_))
    }
}
