//! CLI argument definitions for tfc-workspace-action.

use clap::{ArgAction, Parser, Subcommand};

use crate::tfc::DEFAULT_TOOL_PATH;

/// Long version string with build metadata.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("TFCW_GIT_COMMIT"),
    ", built ",
    env!("TFCW_BUILD_TIMESTAMP"),
    ")"
);

/// tfc-workspace-action - Apply Terraform Cloud workspace settings from CI inputs.
///
/// Settings are read from `INPUT_<NAME>` environment variables. Run
/// `tfc-workspace-action settings` to list them.
#[derive(Parser, Debug)]
#[command(name = "tfc-workspace-action")]
#[command(author, version, long_version = LONG_VERSION, about = "Apply Terraform Cloud workspace settings through tfc-cli", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Path to the tfc-cli binary.
    #[arg(long, global = true, env = "TFC_CLI_PATH", default_value = DEFAULT_TOOL_PATH)]
    pub tool_path: String,

    /// Increase log verbosity (-v for info, -vv for debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply the configured settings (the default when no command is given)
    Apply {
        /// Validate and print the commands without running tfc-cli
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the tfc-cli commands the current inputs would run
    Plan {
        /// Print the API token instead of masking it
        #[arg(long)]
        show_token: bool,
    },

    /// List every setting the action accepts
    Settings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults() {
        let cli = Cli::try_parse_from(["tfc-workspace-action", "--tool-path", "/tfc-cli"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.human_readable);
        assert_eq!(cli.tool_path, "/tfc-cli");
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_apply_dry_run() {
        let cli = Cli::try_parse_from(["tfc-workspace-action", "apply", "--dry-run", "-vv"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Apply { dry_run: true })));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_plan_show_token_with_global_flags() {
        let cli = Cli::try_parse_from([
            "tfc-workspace-action",
            "plan",
            "--show-token",
            "-H",
            "--tool-path",
            "/opt/tfc-cli",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::Plan { show_token: true })));
        assert!(cli.human_readable);
        assert_eq!(cli.tool_path, "/opt/tfc-cli");
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["tfc-workspace-action", "destroy"]).is_err());
    }
}
