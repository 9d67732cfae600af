//! Validation issues produced by the compliance checkers.
//!
//! Every finding is an [`Issue`] carrying a stable code, the offending file,
//! and a human-readable message. There is no severity: any issue fails the
//! run.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// A single policy violation found by one of the checkers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Stable issue code (e.g., `"F001"`, `"M003"`).
    pub code: &'static str,
    /// File the issue was found in (source file or manifest).
    pub path: PathBuf,
    /// Human-readable message, without the path prefix.
    pub message: String,
    /// 1-based line of the offending statement, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Suggested fix (actionable text).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Issue {
    /// Create a new issue for `path` with the given code and message.
    #[must_use]
    pub fn new(code: &'static str, path: &Path, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.to_path_buf(),
            message: message.into(),
            line: None,
            suggestion: None,
        }
    }

    /// Set the line the issue points at.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Set a suggested fix for this issue.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Renders as `"<path>: <message>"`.
impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

// ── Issue code constants ────────────────────────────────────────────────

// Import policy (F001–F002)

/// Import of a forbidden external library.
pub const F001: &str = "F001";
/// Import reaching into restricted engine internals.
pub const F002: &str = "F002";

// Interface conformance (C001)

/// Strategy class does not define the required method.
pub const C001: &str = "C001";

// Manifest consistency (M001–M006)

/// Manifest file is missing.
pub const M001: &str = "M001";
/// Required dependency is not declared.
pub const M002: &str = "M002";
/// Entrypoint group is absent or empty.
pub const M003: &str = "M003";
/// Entrypoint target is not of the form `module.path:Symbol`.
pub const M004: &str = "M004";
/// Entrypoint module file does not exist.
pub const M005: &str = "M005";
/// Entrypoint module lives outside the expected package.
pub const M006: &str = "M006";
