use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

/// Return a `Command` for the `strategy-kit` binary built by Cargo.
fn kit() -> Command {
    cargo_bin_cmd!("strategy-kit")
}

/// Write a strategy pack with one strategy module and a manifest.
fn make_pack(root: &Path, strategy: &str, manifest: Option<&str>) {
    let strategies = root.join("strategy_pack/strategies");
    fs::create_dir_all(&strategies).unwrap();
    fs::write(root.join("strategy_pack/__init__.py"), "").unwrap();
    fs::write(strategies.join("__init__.py"), "").unwrap();
    fs::write(strategies.join("ok.py"), strategy).unwrap();
    if let Some(manifest) = manifest {
        fs::write(root.join("pyproject.toml"), manifest).unwrap();
    }
}

const MANIFEST: &str = "[project]\n\
name='strategy-pack'\n\
version='0.1.0'\n\
dependencies=['trading-sdk>=0.1.0']\n\
[project.entry-points.\"trading_system.strategies\"]\n\
ok='strategy_pack.strategies.ok:OkStrategy'\n";

const STRATEGY: &str = "from trading_sdk.base_strategy import BaseStrategy\n\
class OkStrategy(BaseStrategy):\n\
\x20   def next_signal(self, market_data, account_data):\n\
\x20       return None\n";

// ── Global flags ────────────────────────────────────────────────────

#[test]
fn help_flag() {
    kit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Strategy pack development toolkit"));
}

#[test]
fn version_flag() {
    kit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_args_shows_usage() {
    kit()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// ── validate ────────────────────────────────────────────────────────

#[test]
fn validate_passes_for_valid_pack() {
    let dir = tempdir().unwrap();
    make_pack(dir.path(), STRATEGY, Some(MANIFEST));
    kit()
        .args(["validate", "--path", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("validation passed"));
}

#[test]
fn validate_rejects_forbidden_imports() {
    let dir = tempdir().unwrap();
    make_pack(dir.path(), &format!("import ccxt\n{STRATEGY}"), Some(MANIFEST));
    kit()
        .args(["validate", "--path", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("validation failed:"))
        .stdout(predicate::str::contains("- "))
        .stdout(predicate::str::contains("ok.py: forbidden import 'ccxt'"));
}

#[test]
fn validate_reports_missing_manifest() {
    let dir = tempdir().unwrap();
    make_pack(dir.path(), STRATEGY, None);
    kit()
        .args(["validate", "--path", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("pyproject.toml: missing"));
}

#[test]
fn validate_missing_package_dir_is_fatal() {
    let dir = tempdir().unwrap();
    kit()
        .args(["validate", "--path", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("strategy-kit validate: not found"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn validate_syntax_error_is_fatal() {
    let dir = tempdir().unwrap();
    make_pack(dir.path(), "class Broken(:\n", Some(MANIFEST));
    kit()
        .args(["validate", "--path", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid syntax"));
}

#[test]
fn validate_custom_package() {
    let dir = tempdir().unwrap();
    let pkg = dir.path().join("alpha_pack");
    fs::create_dir(&pkg).unwrap();
    fs::write(pkg.join("ok.py"), STRATEGY).unwrap();
    fs::write(
        dir.path().join("pyproject.toml"),
        MANIFEST.replace("strategy_pack.strategies.ok", "alpha_pack.ok"),
    )
    .unwrap();
    kit()
        .args([
            "validate",
            "--path",
            dir.path().to_str().unwrap(),
            "--package",
            "alpha_pack",
        ])
        .assert()
        .success();
}

#[test]
fn validate_forbid_flag_extends_policy() {
    let dir = tempdir().unwrap();
    make_pack(dir.path(), &format!("import requests\n{STRATEGY}"), Some(MANIFEST));
    let path = dir.path().to_str().unwrap();
    kit().args(["validate", "--path", path]).assert().success();
    kit()
        .args(["validate", "--path", path, "--forbid", "requests"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("forbidden import 'requests'"));
}

#[test]
fn validate_restrict_flag_extends_policy() {
    let dir = tempdir().unwrap();
    make_pack(
        dir.path(),
        &format!("from engine.risk import Limits\n{STRATEGY}"),
        Some(MANIFEST),
    );
    kit()
        .args([
            "validate",
            "--path",
            dir.path().to_str().unwrap(),
            "--restrict",
            "engine",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "engine dependency import from 'engine.risk'",
        ));
}

#[test]
fn validate_json_format() {
    let dir = tempdir().unwrap();
    make_pack(dir.path(), &format!("import core\n{STRATEGY}"), Some(MANIFEST));
    let output = kit()
        .args([
            "validate",
            "--path",
            dir.path().to_str().unwrap(),
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["passed"], false);
    assert_eq!(json["outcome"], "fail");
    let issues = json["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["code"], "F002");
    assert_eq!(issues[0]["message"], "engine dependency import 'core'");
    assert_eq!(issues[0]["line"], 1);
}

#[test]
fn validate_json_format_pass() {
    let dir = tempdir().unwrap();
    make_pack(dir.path(), STRATEGY, Some(MANIFEST));
    let output = kit()
        .args([
            "validate",
            "--path",
            dir.path().to_str().unwrap(),
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["passed"], true);
    assert!(json["issues"].as_array().unwrap().is_empty());
}

#[test]
fn verbose_logging_goes_to_stderr() {
    let dir = tempdir().unwrap();
    make_pack(dir.path(), STRATEGY, Some(MANIFEST));
    kit()
        .env_remove("RUST_LOG")
        .args(["-v", "validate", "--path", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("validation passed"))
        .stderr(predicate::str::contains("validation finished"));
}
