use std::path::PathBuf;

use strategy_kit::ValidatorConfig;

pub(crate) fn run(
    path: PathBuf,
    package: String,
    entrypoint_group: String,
    forbid: Vec<String>,
    restrict: Vec<String>,
    format: super::Format,
) {
    let mut config = ValidatorConfig::default()
        .with_package(package)
        .with_entrypoint_group(entrypoint_group);
    for namespace in forbid {
        config = config.forbid(namespace);
    }
    for namespace in restrict {
        config = config.restrict(namespace);
    }

    let report = match strategy_kit::validate_package(&path, &config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("strategy-kit validate: {e}");
            std::process::exit(1);
        }
    };

    match format {
        super::Format::Text => {
            if report.passed() {
                println!("validation passed");
            } else {
                println!("validation failed:");
                for line in report.lines() {
                    println!("- {line}");
                }
            }
        }
        super::Format::Json => {
            let value = serde_json::json!({
                "root": report.root.display().to_string(),
                "outcome": report.outcome(),
                "passed": report.passed(),
                "issues": report.issues,
            });
            match serde_json::to_string_pretty(&value) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("strategy-kit validate: cannot encode report: {e}");
                    std::process::exit(1);
                }
            }
        }
    }

    if !report.passed() {
        std::process::exit(1);
    }
}
