//! Common test utilities for tfc-workspace-action integration tests.
//!
//! Provides `TestEnv`, which installs a fake `tfc-cli` script in a temporary
//! directory. The script appends each argument vector it receives to a log
//! file (arguments joined with `|`, one invocation per line), prints
//! `fake tfc-cli: <subcommand>` on stdout, and exits with status 3 when its
//! subcommand matches `FAKE_TFC_FAIL_ON`.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
pub use tempfile::TempDir;

/// Inputs as the CI runner presents them when the workflow sets nothing.
pub const RUNNER_DEFAULTS: &[(&str, &str)] = &[
    ("INPUT_TFCTOKEN", "some-token"),
    ("INPUT_ORGNAME", "some-org"),
    ("INPUT_WORKSPACENAME", "some-workspace"),
    ("INPUT_SETDESCRIPTION", ""),
    ("INPUT_SETWORKINGDIRECTORY", ""),
    ("INPUT_SETVCSIDENTIFIER", ""),
    ("INPUT_SETVCSBRANCH", ""),
    ("INPUT_SETVCSOAUTHTOKENID", ""),
    ("INPUT_SETAPPLYMETHOD", ""),
    ("INPUT_UNSETDESCRIPTION", "false"),
    ("INPUT_UNSETWORKINGDIRECTORY", "false"),
    ("INPUT_UNSETVCSIDENTIFIER", "false"),
    ("INPUT_UNSETVCSBRANCH", "false"),
    ("INPUT_UNSETVCSOAUTHTOKENID", "false"),
];

/// A test environment with a fake `tfc-cli` that records its calls.
pub struct TestEnv {
    pub dir: TempDir,
    tool: PathBuf,
    log: PathBuf,
}

impl TestEnv {
    /// Create a new test environment with the fake tool installed.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let tool = dir.path().join("tfc-cli");
        let log = dir.path().join("calls.log");
        let script = format!(
            "#!/bin/sh\n\
             IFS='|'\n\
             echo \"$*\" >> '{}'\n\
             echo \"fake tfc-cli: $2\"\n\
             if [ -n \"$FAKE_TFC_FAIL_ON\" ] && [ \"$2\" = \"$FAKE_TFC_FAIL_ON\" ]; then\n\
             exit 3\n\
             fi\n\
             exit 0\n",
            log.display()
        );
        fs::write(&tool, script).unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();
        Self { dir, tool, log }
    }

    /// Get a Command for the binary with a clean environment, the fake tool,
    /// and the runner defaults, overridden by `inputs`.
    pub fn action(&self, inputs: &[(&str, &str)]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_tfc-workspace-action"));
        cmd.env_clear();
        cmd.current_dir(self.dir.path());
        cmd.env("TFC_CLI_PATH", &self.tool);
        for (key, value) in RUNNER_DEFAULTS {
            cmd.env(key, value);
        }
        for (key, value) in inputs {
            cmd.env(key, value);
        }
        cmd
    }

    /// Path to the fake tool.
    pub fn tool_path(&self) -> &Path {
        &self.tool
    }

    /// Recorded invocations, each as its argument list (program excluded).
    pub fn calls(&self) -> Vec<Vec<String>> {
        match fs::read_to_string(&self.log) {
            Ok(content) => content
                .lines()
                .map(|line| line.split('|').map(str::to_string).collect())
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Expected arguments for a call: shared inputs plus `rest`.
pub fn expected_call(subcommand: &str, rest: &[&str]) -> Vec<String> {
    let mut args: Vec<String> = [
        "workspaces",
        subcommand,
        "-token",
        "some-token",
        "-org",
        "some-org",
        "-workspace",
        "some-workspace",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    args.extend(rest.iter().map(|s| s.to_string()));
    args
}
