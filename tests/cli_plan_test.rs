//! Integration tests for `plan` and `settings`.

#![cfg(unix)]

mod common;

use common::TestEnv;
use predicates::prelude::*;

fn plan_json(env: &TestEnv, inputs: &[(&str, &str)], extra: &[&str]) -> serde_json::Value {
    let output = env
        .action(inputs)
        .arg("plan")
        .args(extra)
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_plan_never_calls_tool() {
    let env = TestEnv::new();
    let json = plan_json(&env, &[("INPUT_SETDESCRIPTION", "d")], &[]);
    assert_eq!(json["commands"].as_array().unwrap().len(), 1);
    assert!(env.calls().is_empty());
}

#[test]
fn test_plan_masks_token() {
    let env = TestEnv::new();
    let json = plan_json(&env, &[("INPUT_UNSETDESCRIPTION", "1")], &[]);
    let argv = &json["commands"][0]["argv"];
    assert_eq!(argv[0], env.tool_path().display().to_string());
    assert_eq!(argv[3], "-token");
    assert_eq!(argv[4], "some...");
}

#[test]
fn test_plan_show_token() {
    let env = TestEnv::new();
    let json = plan_json(&env, &[("INPUT_UNSETDESCRIPTION", "1")], &["--show-token"]);
    assert_eq!(json["commands"][0]["argv"][4], "some-token");
}

#[test]
fn test_plan_is_sorted_and_repeatable() {
    let env = TestEnv::new();
    let inputs = [
        ("INPUT_UNSETWORKINGDIRECTORY", "true"),
        ("INPUT_SETDESCRIPTION", "d"),
        ("INPUT_SETAPPLYMETHOD", "auto"),
    ];
    let first = plan_json(&env, &inputs, &["--show-token"]);
    let second = plan_json(&env, &inputs, &["--show-token"]);
    assert_eq!(first, second);

    let subcommands: Vec<&str> = first["commands"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["subcommand"].as_str().unwrap())
        .collect();
    assert_eq!(
        subcommands,
        vec!["set-auto-apply", "set-description", "unset-working-directory"]
    );
}

#[test]
fn test_plan_validation_error_is_json() {
    let env = TestEnv::new();
    env.action(&[("INPUT_SETVCSBRANCH", "main")])
        .arg("plan")
        .assert()
        .failure()
        .stderr(predicate::str::contains(r#"{"error":"#))
        .stderr(predicate::str::contains("setVCS* variables are mutually necessary"));
}

#[test]
fn test_plan_human_output() {
    let env = TestEnv::new();
    env.action(&[])
        .args(["plan", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No workspace settings to change."));
}

#[test]
fn test_settings_lists_every_input() {
    let env = TestEnv::new();
    let output = env.action(&[]).arg("settings").output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let settings = json["settings"].as_array().unwrap();
    assert_eq!(settings.len(), 14);

    let vcs = settings
        .iter()
        .find(|s| s["name"] == "setVCSOAuthTokenID")
        .unwrap();
    assert_eq!(vcs["env_var"], "INPUT_SETVCSOAUTHTOKENID");
    assert_eq!(vcs["subcommand"], "set-vcs-branch");
    assert_eq!(vcs["flag"], "-oauth-token-id");
    assert_eq!(vcs["requires"][0], "setVCSIdentifier");
}

#[test]
fn test_settings_needs_no_inputs() {
    let env = TestEnv::new();
    let mut cmd = env.action(&[]);
    cmd.env_clear();
    cmd.args(["settings", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unsetVCSBranch"));
}
