//! Static compliance validation for pluggable trading strategy packs.
//!
//! A strategy pack is a Python package plus a `pyproject.toml` that registers
//! strategy classes under an entrypoint group. [`validate_package`] checks
//! that the pack stays inside its architectural boundaries without executing
//! any of its code.

pub mod ast;
pub mod config;
pub mod conformance;
pub mod diagnostics;
pub mod errors;
pub mod imports;
pub mod manifest;
pub mod parser;
pub mod scanner;
pub mod source;
pub mod validator;

// Re-export key types at crate root for convenience.
pub use config::{ImportPolicy, InterfaceRequirement, PolicyKind, ValidatorConfig};
pub use conformance::{check_conformance, class_declarations, ClassDeclaration};
pub use diagnostics::Issue;
pub use errors::{KitError, Result};
pub use imports::{check_imports, import_references, ImportForm, ImportReference};
pub use manifest::{check_manifest, EntrypointTarget, ManifestDocument};
pub use parser::parse_module;
pub use scanner::{scan_sources, SourceFiles};
pub use source::SourceUnit;
pub use validator::{check_source, validate_package, ValidationOutcome, ValidationReport};
