use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a validation run.
///
/// Policy violations are never errors; they are reported as
/// [`Issue`](crate::diagnostics::Issue) values instead.
#[derive(Error, Debug)]
pub enum KitError {
    /// A required directory (package root or package source dir) does not exist.
    #[error("not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Python source could not be parsed.
    #[error("{}:{line}:{column}: invalid syntax", path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    /// The manifest is not valid TOML or does not match the expected shape.
    #[error("{}: invalid manifest: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal error.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// The Python grammar could not be loaded into the parser.
    #[error("parser setup failed: {0}")]
    Language(#[from] tree_sitter::LanguageError),
}

/// Convenience alias for `Result<T, KitError>`.
pub type Result<T> = std::result::Result<T, KitError>;
