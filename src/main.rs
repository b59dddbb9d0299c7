//! tfc-workspace-action CLI - Terraform Cloud workspace settings for CI pipelines.

use clap::Parser;
use std::process;
use tfc_workspace_action::cli::{Cli, Commands};
use tfc_workspace_action::commands::{self, CommandResult};
use tfc_workspace_action::config::EnvSource;
use tfc_workspace_action::tfc::ProcessRunner;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    let human = cli.human_readable;

    init_tracing(cli.verbose);

    let result = run_command(cli.command, &cli.tool_path, human);

    if let Err(e) = result {
        if human {
            eprintln!("Error: {}", e);
        } else {
            eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
        }
        process::exit(1);
    }
}

/// Log to stderr so stdout stays machine-readable.
///
/// `RUST_LOG` wins when set; otherwise `-v` flags pick the level.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run_command(
    command: Option<Commands>,
    tool_path: &str,
    human: bool,
) -> Result<(), tfc_workspace_action::Error> {
    match command.unwrap_or(Commands::Apply { dry_run: false }) {
        Commands::Apply { dry_run } => {
            let result = commands::apply(&EnvSource, tool_path, &mut ProcessRunner, dry_run)?;
            output(&result, human);
        }
        Commands::Plan { show_token } => {
            let result = commands::plan(&EnvSource, tool_path, show_token)?;
            output(&result, human);
        }
        Commands::Settings => {
            let result = commands::settings()?;
            output(&result, human);
        }
    }
    Ok(())
}

fn output<T: CommandResult>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}
