//! Command execution for the gatekeeper CLI.
//!
//! Every command loads the access configuration, builds an
//! [`AccessControl`], and renders its answer. Answers are JSON except for
//! `export-casbin`, which prints policy lines.
use crate::cli::{Cli, Command};
use anyhow::{Context, Result};
use hrgate_authz::{
    AccessControl, MenuItem, NavigationDecision, RbacConfig, SessionContext,
    UnregisteredRoutePolicy, casbin_policies,
};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    role: &'a str,
    permission: &'a str,
    allowed: bool,
}

#[derive(Debug, Serialize)]
struct RouteReport<'a> {
    path: &'a str,
    role: Option<&'a str>,
    logged_in: bool,
    rule: Option<&'a str>,
    decision: NavigationDecision,
}

#[derive(Debug, Serialize)]
struct MenuReport<'a> {
    role: &'a str,
    items: Vec<MenuItem>,
}

#[derive(Debug, Serialize)]
struct ResourcesReport<'a> {
    role: &'a str,
    resources: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct RoleSummary<'a> {
    name: &'a str,
    display_name: &'a str,
    default: bool,
}

#[derive(Debug, Serialize)]
struct ValidateReport<'a> {
    default_role: &'a str,
    roles: usize,
    resources: usize,
    routes: usize,
    menu_items: usize,
    unregistered_routes: UnregisteredRoutePolicy,
}

pub fn load_config(path: Option<&Path>) -> Result<RbacConfig> {
    match path {
        Some(path) => RbacConfig::from_path(path)
            .with_context(|| format!("load access config {}", path.display())),
        None => RbacConfig::from_env_or_file().context("load access config from environment"),
    }
}

/// Run a parsed command line and return what should be printed.
pub fn run(cli: &Cli) -> Result<String> {
    let path = match &cli.command {
        Command::Validate { file: Some(file) } => Some(file.as_path()),
        _ => cli.config.as_deref(),
    };
    let config = load_config(path)?;
    let control = AccessControl::from_config(config).context("build access control")?;
    let evaluator = control.evaluator();

    match &cli.command {
        Command::Check { role, permission } => render(
            &CheckReport {
                role,
                permission,
                allowed: evaluator.check_query(role, permission),
            },
            cli.pretty,
        ),
        Command::Route {
            role,
            path,
            anonymous,
        } => {
            let session = match (role.as_deref(), *anonymous) {
                (_, true) => SessionContext::anonymous(),
                (Some(role), false) => SessionContext::authenticated(role),
                (None, false) => SessionContext::without_role(),
            };
            let decision = control.navigate(path, &session);
            tracing::debug!(path = %path, allowed = decision.is_allowed(), "route evaluated");
            render(
                &RouteReport {
                    path,
                    role: session.role.as_deref(),
                    logged_in: session.logged_in,
                    rule: control.routes().find(path).map(|rule| rule.path.as_str()),
                    decision,
                },
                cli.pretty,
            )
        }
        Command::Menu { role } => render(
            &MenuReport {
                role,
                items: evaluator.accessible_menu_items(role),
            },
            cli.pretty,
        ),
        Command::Resources { role } => render(
            &ResourcesReport {
                role,
                resources: evaluator.accessible_resources(role),
            },
            cli.pretty,
        ),
        Command::Roles => {
            let matrix = evaluator.matrix();
            let roles: Vec<RoleSummary<'_>> = matrix
                .roles()
                .iter()
                .map(|role| RoleSummary {
                    name: &role.name,
                    display_name: &role.display_name,
                    default: role.name == matrix.default_role(),
                })
                .collect();
            render(&roles, cli.pretty)
        }
        Command::ExportCasbin => Ok(casbin_policies(evaluator.matrix())
            .iter()
            .map(|rule| format!("p, {}", rule.join(", ")))
            .collect::<Vec<_>>()
            .join("\n")),
        Command::Validate { .. } => {
            let matrix = evaluator.matrix();
            let report = ValidateReport {
                default_role: matrix.default_role(),
                roles: matrix.roles().len(),
                resources: matrix.resources().len(),
                routes: control.routes().rules().count(),
                menu_items: evaluator.menu().items().len(),
                unregistered_routes: control.routes().unregistered_policy(),
            };
            tracing::info!(
                default_role = report.default_role,
                roles = report.roles,
                routes = report.routes,
                "access configuration is valid"
            );
            render(&report, cli.pretty)
        }
    }
}

fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let output = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    output.context("serialize output")
}
