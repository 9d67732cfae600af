//! Strategy pack manifest (`pyproject.toml`) model and consistency checks.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::config::ValidatorConfig;
use crate::diagnostics::{Issue, M001, M002, M003, M004, M005, M006};
use crate::errors::{KitError, Result};

/// Parsed manifest. Only the `[project]` table is modelled; other tables are
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestDocument {
    #[serde(default)]
    pub project: ProjectTable,
}

/// The `[project]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectTable {
    pub name: Option<String>,
    pub version: Option<String>,
    /// Dependency specifiers (e.g., `"trading-sdk>=0.1.0"`).
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Entrypoint group → registration name → `module.path:Symbol`, in
    /// document order.
    #[serde(default)]
    pub entry_points: IndexMap<String, IndexMap<String, String>>,
}

impl ManifestDocument {
    /// Parse manifest text. `path` is only used for error messages.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| KitError::Manifest {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// Read and parse the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(path, &content)
    }

    /// Registrations of `group`, if the group is declared.
    #[must_use]
    pub fn entrypoint_group(&self, group: &str) -> Option<&IndexMap<String, String>> {
        self.project.entry_points.get(group)
    }

    /// Returns `true` if any declared dependency starts with `prefix`.
    #[must_use]
    pub fn declares_dependency(&self, prefix: &str) -> bool {
        self.project
            .dependencies
            .iter()
            .any(|dep| dep.starts_with(prefix))
    }
}

/// A parsed `module.path:Symbol` entrypoint target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntrypointTarget<'a> {
    pub module: &'a str,
    pub symbol: &'a str,
}

impl<'a> EntrypointTarget<'a> {
    /// Split at the first `:`. Both sides must be non-empty.
    #[must_use]
    pub fn parse(target: &'a str) -> Option<Self> {
        let (module, symbol) = target.split_once(':')?;
        let (module, symbol) = (module.trim(), symbol.trim());
        if module.is_empty() || symbol.is_empty() {
            return None;
        }
        Some(Self { module, symbol })
    }

    /// Source file the module resolves to under `root`
    /// (`a.b.c` → `root/a/b/c.<extension>`).
    #[must_use]
    pub fn module_path(&self, root: &Path, extension: &str) -> PathBuf {
        let mut path = root.to_path_buf();
        let mut segments = self.module.split('.').peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_some() {
                path.push(segment);
            } else {
                path.push(format!("{segment}.{extension}"));
            }
        }
        path
    }

    /// Returns `true` if the module path starts with `package`.
    #[must_use]
    pub fn is_under_package(&self, package: &str) -> bool {
        self.module.starts_with(package)
    }
}

/// Check the manifest at `root` against the pack configuration.
///
/// A missing manifest yields a single issue and no further checks. An empty
/// or absent entrypoint group yields a single group issue and no
/// per-registration checks. Unparsable manifests are errors, not issues.
pub fn check_manifest(root: &Path, config: &ValidatorConfig) -> Result<Vec<Issue>> {
    let path = root.join(&config.manifest_file);
    if !path.is_file() {
        tracing::debug!(manifest = %path.display(), "manifest not found");
        return Ok(vec![Issue::new(M001, &path, "missing").with_suggestion(format!(
            "Create {} declaring the package and its entrypoints",
            config.manifest_file
        ))]);
    }

    let manifest = ManifestDocument::load(&path)?;
    tracing::debug!(
        manifest = %path.display(),
        dependencies = manifest.project.dependencies.len(),
        groups = manifest.project.entry_points.len(),
        "loaded manifest"
    );

    let mut issues = Vec::new();
    let dependency = &config.required_dependency;
    if !manifest.declares_dependency(dependency) {
        issues.push(
            Issue::new(M002, &path, format!("dependency '{dependency}' is required"))
                .with_suggestion(format!("Add \"{dependency}\" to project.dependencies")),
        );
    }

    let group_name = &config.entrypoint_group;
    let group = match manifest.entrypoint_group(group_name) {
        Some(group) if !group.is_empty() => group,
        _ => {
            issues.push(
                Issue::new(
                    M003,
                    &path,
                    format!("entrypoint group '{group_name}' has no registrations"),
                )
                .with_suggestion(format!(
                    "Register strategies under [project.entry-points.\"{group_name}\"]"
                )),
            );
            return Ok(issues);
        }
    };

    for (name, raw_target) in group {
        let Some(target) = EntrypointTarget::parse(raw_target) else {
            issues.push(
                Issue::new(M004, &path, format!("invalid entrypoint target for '{name}'"))
                    .with_suggestion("Use the form \"package.module:ClassName\""),
            );
            continue;
        };

        let module_path = target.module_path(root, &config.source_extension);
        if !module_path.is_file() {
            issues.push(Issue::new(
                M005,
                &path,
                format!("entrypoint module not found '{}'", module_path.display()),
            ));
        }

        if !target.is_under_package(&config.package) {
            issues.push(Issue::new(
                M006,
                &path,
                format!(
                    "entrypoint '{name}' should be under package '{}'",
                    config.package
                ),
            ));
        }
    }

    Ok(issues)
}
