//! Validator configuration: package identity, interface requirement, and the
//! import policy table.

/// Default Python package name of a strategy pack.
pub const DEFAULT_PACKAGE: &str = "strategy_pack";
/// Entrypoint group the host engine loads strategies from.
pub const DEFAULT_ENTRYPOINT_GROUP: &str = "trading_system.strategies";
/// Dependency every strategy pack must declare.
pub const REQUIRED_DEPENDENCY: &str = "trading-sdk";
/// Base class that marks a class as a strategy implementation.
pub const REQUIRED_BASE: &str = "BaseStrategy";
/// Method every strategy implementation must define.
pub const REQUIRED_METHOD: &str = "next_signal";
/// External exchange library strategies must not talk to directly.
pub const FORBIDDEN_LIBRARY: &str = "ccxt";
/// Engine namespace strategies must not reach into.
pub const ENGINE_NAMESPACE: &str = "core";
/// Python source file extension.
pub const SOURCE_EXTENSION: &str = "py";
/// Manifest file name at the pack root.
pub const MANIFEST_FILE: &str = "pyproject.toml";

/// Which policy an import rule enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PolicyKind {
    /// Third-party library strategies must reach through the SDK instead.
    Forbidden,
    /// Engine-internal namespace strategies must not depend on.
    EngineDependency,
}

impl PolicyKind {
    /// All kinds, in the order their issues are reported.
    pub const ALL: [PolicyKind; 2] = [PolicyKind::Forbidden, PolicyKind::EngineDependency];
}

/// One row of the import policy table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRule {
    /// Dotted namespace the rule covers (e.g., `"ccxt"`).
    pub namespace: String,
    pub kind: PolicyKind,
}

/// Table of `{namespace → policy kind}` consulted for every import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPolicy {
    rules: Vec<ImportRule>,
}

impl ImportPolicy {
    /// A policy with no rules.
    #[must_use]
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a rule to the table.
    #[must_use]
    pub fn with_rule(mut self, namespace: impl Into<String>, kind: PolicyKind) -> Self {
        self.rules.push(ImportRule {
            namespace: namespace.into(),
            kind,
        });
        self
    }

    /// Rules in insertion order.
    #[must_use]
    pub fn rules(&self) -> &[ImportRule] {
        &self.rules
    }

    /// Returns `true` if any rule of `kind` covers the dotted `name`.
    #[must_use]
    pub fn violates(&self, name: &str, kind: PolicyKind) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.kind == kind && within_namespace(name, &rule.namespace))
    }
}

impl Default for ImportPolicy {
    fn default() -> Self {
        Self::empty()
            .with_rule(FORBIDDEN_LIBRARY, PolicyKind::Forbidden)
            .with_rule(ENGINE_NAMESPACE, PolicyKind::EngineDependency)
    }
}

/// Returns `true` if `name` equals `namespace` or is a dotted sub-path of it.
#[must_use]
pub fn within_namespace(name: &str, namespace: &str) -> bool {
    match name.strip_prefix(namespace) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

/// Base class + method pair every strategy class must satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRequirement {
    pub base: String,
    pub method: String,
}

impl Default for InterfaceRequirement {
    fn default() -> Self {
        Self {
            base: REQUIRED_BASE.to_string(),
            method: REQUIRED_METHOD.to_string(),
        }
    }
}

/// Everything the checkers need to know about the pack being validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Python package the strategies live in (directory under the root).
    pub package: String,
    /// Manifest entrypoint group holding strategy registrations.
    pub entrypoint_group: String,
    /// Prefix a declared dependency must start with.
    pub required_dependency: String,
    pub interface: InterfaceRequirement,
    pub import_policy: ImportPolicy,
    /// Extension of scanned source files, without the dot.
    pub source_extension: String,
    /// Manifest file name at the root.
    pub manifest_file: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            entrypoint_group: DEFAULT_ENTRYPOINT_GROUP.to_string(),
            required_dependency: REQUIRED_DEPENDENCY.to_string(),
            interface: InterfaceRequirement::default(),
            import_policy: ImportPolicy::default(),
            source_extension: SOURCE_EXTENSION.to_string(),
            manifest_file: MANIFEST_FILE.to_string(),
        }
    }
}

impl ValidatorConfig {
    #[must_use]
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    #[must_use]
    pub fn with_entrypoint_group(mut self, group: impl Into<String>) -> Self {
        self.entrypoint_group = group.into();
        self
    }

    /// Add a forbidden external namespace to the import policy.
    #[must_use]
    pub fn forbid(mut self, namespace: impl Into<String>) -> Self {
        self.import_policy = self.import_policy.with_rule(namespace, PolicyKind::Forbidden);
        self
    }

    /// Add a restricted engine namespace to the import policy.
    #[must_use]
    pub fn restrict(mut self, namespace: impl Into<String>) -> Self {
        self.import_policy = self
            .import_policy
            .with_rule(namespace, PolicyKind::EngineDependency);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_matches_exact_name() {
        assert!(within_namespace("ccxt", "ccxt"));
    }

    #[test]
    fn namespace_matches_dotted_subpath() {
        assert!(within_namespace("ccxt.pro", "ccxt"));
        assert!(within_namespace("core.engine.orders", "core"));
    }

    #[test]
    fn namespace_requires_separator_boundary() {
        assert!(!within_namespace("ccxtx", "ccxt"));
        assert!(!within_namespace("corelib", "core"));
        assert!(!within_namespace("cor", "core"));
    }

    #[test]
    fn default_policy_has_both_kinds() {
        let policy = ImportPolicy::default();
        assert!(policy.violates("ccxt", PolicyKind::Forbidden));
        assert!(!policy.violates("ccxt", PolicyKind::EngineDependency));
        assert!(policy.violates("core.x", PolicyKind::EngineDependency));
        assert!(!policy.violates("core.x", PolicyKind::Forbidden));
    }

    #[test]
    fn forbid_and_restrict_extend_the_table() {
        let config = ValidatorConfig::default().forbid("requests").restrict("engine");
        let policy = &config.import_policy;
        assert_eq!(policy.rules().len(), 4);
        assert!(policy.violates("requests.adapters", PolicyKind::Forbidden));
        assert!(policy.violates("engine", PolicyKind::EngineDependency));
    }

    #[test]
    fn same_namespace_can_carry_both_kinds() {
        let policy = ImportPolicy::empty()
            .with_rule("shared", PolicyKind::Forbidden)
            .with_rule("shared", PolicyKind::EngineDependency);
        for kind in PolicyKind::ALL {
            assert!(policy.violates("shared.x", kind));
        }
    }

    #[test]
    fn default_config_uses_fixed_identifiers() {
        let config = ValidatorConfig::default();
        assert_eq!(config.package, "strategy_pack");
        assert_eq!(config.entrypoint_group, "trading_system.strategies");
        assert_eq!(config.required_dependency, "trading-sdk");
        assert_eq!(config.interface.base, "BaseStrategy");
        assert_eq!(config.interface.method, "next_signal");
        assert_eq!(config.manifest_file, "pyproject.toml");
    }

    #[test]
    fn with_package_overrides_default() {
        let config = ValidatorConfig::default()
            .with_package("alpha_pack")
            .with_entrypoint_group("custom.group");
        assert_eq!(config.package, "alpha_pack");
        assert_eq!(config.entrypoint_group, "custom.group");
    }
}
