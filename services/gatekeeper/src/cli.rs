use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gatekeeper")]
#[command(about = "Answer HR console access questions from the permission matrix")]
pub struct Cli {
    /// Access configuration document (YAML, or JSON by extension), applied
    /// over the HRGATE_* variables in place of HRGATE_RBAC_CONFIG.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true, default_value = "false")]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Evaluate a `resource:action` permission for a role
    Check {
        #[arg(long)]
        role: String,
        #[arg(long)]
        permission: String,
    },
    /// Decide whether a session may navigate to a path
    Route {
        /// Role bound to the session; omitted means a session without a role
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        path: String,
        /// Evaluate as a logged-out visitor
        #[arg(long, conflicts_with = "role")]
        anonymous: bool,
    },
    /// Menu entries visible to a role
    Menu {
        #[arg(long)]
        role: String,
    },
    /// Resources on which a role has at least one allowed action
    Resources {
        #[arg(long)]
        role: String,
    },
    /// List configured roles
    Roles,
    /// Print the matrix as Casbin `p, role, resource, action` lines
    ExportCasbin,
    /// Load and validate the configuration, then summarize it
    Validate {
        /// Document to validate; takes precedence over --config
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_check_with_global_flags() {
        let cli = Cli::try_parse_from([
            "gatekeeper",
            "check",
            "--role",
            "manager",
            "--permission",
            "payroll:view",
            "--pretty",
        ])
        .expect("parse");
        assert!(cli.pretty);
        assert_eq!(
            cli.command,
            Command::Check {
                role: "manager".to_string(),
                permission: "payroll:view".to_string(),
            }
        );
    }

    #[test]
    fn parses_validate_file() {
        let cli = Cli::try_parse_from(["gatekeeper", "validate", "--file", "access.yaml"])
            .expect("parse");
        assert_eq!(
            cli.command,
            Command::Validate {
                file: Some(PathBuf::from("access.yaml")),
            }
        );
        let bare = Cli::try_parse_from(["gatekeeper", "validate"]).expect("parse");
        assert_eq!(bare.command, Command::Validate { file: None });
    }

    #[test]
    fn anonymous_conflicts_with_role() {
        let result = Cli::try_parse_from([
            "gatekeeper",
            "route",
            "--path",
            "/payroll",
            "--role",
            "admin",
            "--anonymous",
        ]);
        assert!(result.is_err());
    }
}
