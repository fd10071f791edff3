//! Gatekeeper commands driven by an on-disk configuration document.
use clap::Parser;
use gatekeeper::{Cli, run};
use serde_json::Value;
use std::path::PathBuf;

const CONFIG: &str = r#"
defaultRole: clerk
resources: [payroll, reports]
roles:
  - name: clerk
    displayName: Payroll Clerk
    permissions:
      - resource: payroll
        actions:
          - { name: view, allowed: true }
          - { name: read, allowed: true }
          - { name: update, allowed: false }
  - name: analyst
    displayName: Analyst
    permissions:
      - resource: reports
        actions:
          - { name: view, allowed: true }
          - { name: export, allowed: true }
routePermissions:
  - path: /payroll/*
    requiredPermissions:
      - { resource: payroll, action: view }
  - path: /reports/*
    requiredRole: [analyst]
menu:
  - { path: /payroll, resource: payroll, label: Payroll, icon: payments }
  - { path: /reports, resource: reports, label: Reports, icon: bar_chart }
unregisteredRoutes: deny
"#;

struct TempConfig(PathBuf);

impl TempConfig {
    fn write(name: &str) -> Self {
        let path =
            std::env::temp_dir().join(format!("gatekeeper-it-{}-{name}", std::process::id()));
        std::fs::write(&path, CONFIG).expect("write config");
        Self(path)
    }

    fn path(&self) -> &str {
        self.0.to_str().expect("utf8 path")
    }
}

impl Drop for TempConfig {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn run_json(config: &TempConfig, args: &[&str]) -> Value {
    let mut argv = vec!["gatekeeper", "--config", config.path()];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).expect("parse");
    let output = run(&cli).expect("run");
    serde_json::from_str(&output).expect("json")
}

#[test]
fn validate_summarizes_document() {
    let config = TempConfig::write("validate.yaml");
    let report = run_json(&config, &["validate"]);
    assert_eq!(report["default_role"], "clerk");
    assert_eq!(report["roles"], 2);
    assert_eq!(report["routes"], 2);
    assert_eq!(report["menu_items"], 2);
    assert_eq!(report["unregistered_routes"], "deny");
}

#[test]
fn validate_file_takes_precedence_over_config() {
    let config = TempConfig::write("validate-file.yaml");
    let cli = Cli::try_parse_from([
        "gatekeeper",
        "--config",
        "/nonexistent/gatekeeper.yaml",
        "validate",
        "--file",
        config.path(),
    ])
    .expect("parse");
    let report: Value = serde_json::from_str(&run(&cli).expect("run")).expect("json");
    assert_eq!(report["default_role"], "clerk");
    assert_eq!(report["unregistered_routes"], "deny");
}

#[test]
fn routes_and_menus_use_document_tables() {
    let config = TempConfig::write("routes.yaml");
    let clerk_payroll = run_json(&config, &["route", "--role", "clerk", "--path", "/payroll/run"]);
    assert_eq!(clerk_payroll["decision"]["outcome"], "allow");

    let clerk_reports = run_json(&config, &["route", "--role", "clerk", "--path", "/reports/q1"]);
    assert_eq!(clerk_reports["decision"]["outcome"], "deny");

    let unregistered = run_json(&config, &["route", "--role", "analyst", "--path", "/zzz"]);
    assert_eq!(unregistered["decision"]["outcome"], "deny");

    let menu = run_json(&config, &["menu", "--role", "analyst"]);
    let labels: Vec<&str> = menu["items"]
        .as_array()
        .expect("items")
        .iter()
        .filter_map(|item| item["label"].as_str())
        .collect();
    assert_eq!(labels, vec!["Reports"]);
}

#[test]
fn export_uses_document_matrix() {
    let config = TempConfig::write("export.yaml");
    let argv = vec!["gatekeeper", "--config", config.path(), "export-casbin"];
    let cli = Cli::try_parse_from(argv).expect("parse");
    let output = run(&cli).expect("run");
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "p, clerk, payroll, view",
            "p, clerk, payroll, read",
            "p, analyst, reports, view",
            "p, analyst, reports, export",
        ]
    );
}

#[test]
fn missing_config_file_is_reported() {
    let cli = Cli::try_parse_from([
        "gatekeeper",
        "--config",
        "/nonexistent/gatekeeper.yaml",
        "roles",
    ])
    .expect("parse");
    let err = run(&cli).expect_err("missing file");
    let text = format!("{err:#}");
    assert!(text.contains("/nonexistent/gatekeeper.yaml"));
}
