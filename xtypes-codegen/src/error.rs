//! Error types for code generation.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema document could not be loaded.
    #[error("failed to load schema '{}': {source}", path.display())]
    Parse {
        /// Schema file.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: xtypes_schema::ParseError,
    },

    /// Schema resolution, validation or ordering error.
    #[error("schema error: {0}")]
    Schema(#[from] xtypes_schema::SchemaError),

    /// IO error on a specific path.
    #[error("IO error on '{}': {source}", path.display())]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: std::io::Error,
    },

    /// Requested target language is not supported.
    #[error(transparent)]
    UnsupportedLanguage(#[from] xtypes_schema::UnsupportedLanguage),

    /// A template could not render an artifact.
    #[error("cannot render {artifact}: {message}")]
    Template {
        /// Artifact kind.
        artifact: String,
        /// Error message.
        message: String,
    },

    /// Error while listing an input directory.
    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl CodegenError {
    /// Creates an IO error for the given path.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a template error.
    pub fn template(artifact: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Template {
            artifact: artifact.into(),
            message: message.into(),
        }
    }
}
