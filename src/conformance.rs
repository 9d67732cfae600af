//! Interface conformance: every strategy class defines the required method.

use std::collections::BTreeSet;

use crate::ast::{Expr, Stmt};
use crate::config::InterfaceRequirement;
use crate::diagnostics::{Issue, C001};
use crate::source::SourceUnit;

/// A top-level class as declared in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDeclaration {
    pub name: String,
    /// Simple names of declared bases (`sdk.BaseStrategy` → `BaseStrategy`).
    pub bases: BTreeSet<String>,
    /// Functions defined directly in the class body.
    pub methods: BTreeSet<String>,
    pub line: usize,
}

/// Top-level classes of the unit. Nested classes are not included.
#[must_use]
pub fn class_declarations(unit: &SourceUnit) -> Vec<ClassDeclaration> {
    unit.module
        .body
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::ClassDef {
                name,
                bases,
                body,
                line,
            } => Some(ClassDeclaration {
                name: name.clone(),
                bases: bases
                    .iter()
                    .filter_map(Expr::simple_name)
                    .map(str::to_string)
                    .collect(),
                methods: body
                    .iter()
                    .filter_map(|item| match item {
                        Stmt::FunctionDef { name, .. } => Some(name.clone()),
                        _ => None,
                    })
                    .collect(),
                line: *line,
            }),
            _ => None,
        })
        .collect()
}

/// Flag strategy classes that do not define the required method themselves.
///
/// Inherited methods are not considered.
#[must_use]
pub fn check_conformance(unit: &SourceUnit, requirement: &InterfaceRequirement) -> Vec<Issue> {
    class_declarations(unit)
        .into_iter()
        .filter(|class| class.bases.contains(&requirement.base))
        .filter(|class| !class.methods.contains(&requirement.method))
        .map(|class| {
            Issue::new(
                C001,
                &unit.path,
                format!("{} must define {}", class.name, requirement.method),
            )
            .with_line(class.line)
            .with_suggestion(format!(
                "Add `def {}(self, market_data, account_data)` to {}",
                requirement.method, class.name
            ))
        })
        .collect()
}
