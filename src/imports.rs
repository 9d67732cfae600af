//! Import policy checks: forbidden external libraries and engine internals.

use crate::ast::{walk, Stmt};
use crate::config::{ImportPolicy, PolicyKind};
use crate::diagnostics::{Issue, F001, F002};
use crate::source::SourceUnit;

/// Which import syntax produced a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportForm {
    /// `import X`
    Plain,
    /// `from X import Y`
    From,
}

/// Resolved target of a single import, as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReference {
    pub name: String,
    pub form: ImportForm,
    pub line: usize,
}

/// Collect every import target in the unit, including nested ones.
///
/// `import a, b` yields one reference per name. `from X import ...` yields
/// `X`; relative forms resolve to the module name without leading dots, and
/// `from . import x` yields nothing.
#[must_use]
pub fn import_references(unit: &SourceUnit) -> Vec<ImportReference> {
    let mut refs = Vec::new();
    walk(&unit.module.body, &mut |stmt| match stmt {
        Stmt::Import { names, line } => {
            refs.extend(names.iter().map(|alias| ImportReference {
                name: alias.name.clone(),
                form: ImportForm::Plain,
                line: *line,
            }));
        }
        Stmt::ImportFrom {
            module: Some(module),
            line,
            ..
        } => refs.push(ImportReference {
            name: module.clone(),
            form: ImportForm::From,
            line: *line,
        }),
        _ => {}
    });
    refs
}

/// Check all imports of `unit` against the policy table.
///
/// Each reference yields at most one issue per [`PolicyKind`]; a reference
/// matching both kinds yields two.
#[must_use]
pub fn check_imports(unit: &SourceUnit, policy: &ImportPolicy) -> Vec<Issue> {
    let mut issues = Vec::new();
    for reference in import_references(unit) {
        for kind in PolicyKind::ALL {
            if policy.violates(&reference.name, kind) {
                issues.push(violation(unit, &reference, kind));
            }
        }
    }
    issues
}

fn violation(unit: &SourceUnit, reference: &ImportReference, kind: PolicyKind) -> Issue {
    let from = match reference.form {
        ImportForm::Plain => "",
        ImportForm::From => " from",
    };
    let name = &reference.name;
    let issue = match kind {
        PolicyKind::Forbidden => Issue::new(
            F001,
            &unit.path,
            format!("forbidden import{from} '{name}'"),
        )
        .with_suggestion("Use the trading SDK adapter instead of the exchange library"),
        PolicyKind::EngineDependency => Issue::new(
            F002,
            &unit.path,
            format!("engine dependency import{from} '{name}'"),
        )
        .with_suggestion("Depend on the trading SDK, not on engine internals"),
    };
    issue.with_line(reference.line)
}
