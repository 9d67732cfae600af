use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::ValidatorConfig;
use crate::conformance::check_conformance;
use crate::diagnostics::Issue;
use crate::errors::{KitError, Result};
use crate::imports::check_imports;
use crate::manifest::check_manifest;
use crate::scanner::scan_sources;
use crate::source::SourceUnit;

/// Overall result of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationOutcome {
    Pass,
    Fail,
}

/// All issues found in one run: file checks in scan order, then manifest
/// checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Canonical pack root the run was performed against.
    pub root: PathBuf,
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    /// `Fail` iff any issue was found.
    #[must_use]
    pub fn outcome(&self) -> ValidationOutcome {
        if self.issues.is_empty() {
            ValidationOutcome::Pass
        } else {
            ValidationOutcome::Fail
        }
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcome() == ValidationOutcome::Pass
    }

    /// Issues rendered as `"<path>: <message>"` lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

/// Run every per-file check on one source file.
pub fn check_source(unit: &SourceUnit, config: &ValidatorConfig) -> Vec<Issue> {
    let mut issues = check_imports(unit, &config.import_policy);
    issues.extend(check_conformance(unit, &config.interface));
    issues
}

/// Validate the strategy pack rooted at `root`.
///
/// Sources are scanned under `root/<package>`; the manifest is read from
/// `root`. A missing root or package directory, unparsable source, or an
/// unparsable manifest aborts the run with an error.
pub fn validate_package(root: &Path, config: &ValidatorConfig) -> Result<ValidationReport> {
    let root = root.canonicalize().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => KitError::NotFound {
            path: root.to_path_buf(),
        },
        _ => KitError::Io(e),
    })?;

    let package_dir = root.join(&config.package);
    if !package_dir.is_dir() {
        return Err(KitError::NotFound { path: package_dir });
    }

    let mut issues = Vec::new();
    let mut files = 0usize;
    for path in scan_sources(&package_dir, &config.source_extension)? {
        let path = path?;
        let unit = SourceUnit::load(&path)?;
        let found = check_source(&unit, config);
        tracing::debug!(file = %path.display(), issues = found.len(), "checked source");
        issues.extend(found);
        files += 1;
    }

    issues.extend(check_manifest(&root, config)?);

    tracing::info!(
        root = %root.display(),
        files,
        issues = issues.len(),
        "validation finished"
    );
    Ok(ValidationReport { root, issues })
}
