//! Stamps `--version` with where and when the action binary was built.
//!
//! Emits `TFCW_GIT_COMMIT` (from `git describe`, `unknown` outside a
//! checkout) and `TFCW_BUILD_TIMESTAMP` (UTC, RFC 3339). `SOURCE_DATE_EPOCH`
//! pins the timestamp for reproducible builds.

use std::env;
use std::process::Command;

use chrono::{DateTime, SecondsFormat, Utc};

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    println!("cargo:rustc-env=TFCW_GIT_COMMIT={}", describe_commit());
    println!("cargo:rustc-env=TFCW_BUILD_TIMESTAMP={}", build_time());
}

fn describe_commit() -> String {
    Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|rev| rev.trim().to_string())
        .filter(|rev| !rev.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn build_time() -> String {
    let pinned = env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|secs| secs.parse::<i64>().ok())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));
    pinned
        .unwrap_or_else(Utc::now)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}
