//! CLI integration tests for Terra
//!
//! These tests drive the compiled binary the way a launcher would: through
//! `internal-plugin` with an encoded plugin name, talking JSON over stdio.

use predicates::prelude::*;
use std::fs;
use std::process::Stdio;
use tempfile::TempDir;

use terra_host::plugin::{split_invocation, SEPARATOR};

/// Get a command instance for the terra binary
fn terra_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("terra"))
}

// =============================================================================
// internal-plugin: argument handling
// =============================================================================

#[test]
fn test_no_args_is_usage_error() {
    terra_cmd()
        .arg("internal-plugin")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Wrong number of args"));
}

#[test]
fn test_two_args_is_usage_error() {
    terra_cmd()
        .args(["internal-plugin", "terraform-provider-null", "extra"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Wrong number of args"));
}

#[test]
fn test_version_prints_and_exits_zero() {
    terra_cmd()
        .args(["internal-plugin", "version"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", env!("CARGO_PKG_VERSION"))))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_version_stays_plain_with_json_format() {
    terra_cmd()
        .args(["--format", "json", "internal-plugin", "version"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn test_malformed_name() {
    terra_cmd()
        .args(["internal-plugin", "not-a-plugin-name"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not-a-plugin-name"));
}

#[test]
fn test_empty_plugin_name_is_malformed() {
    terra_cmd()
        .args(["internal-plugin", "terraform-provider-"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error parsing plugin argument"));
}

#[test]
fn test_unknown_provider() {
    terra_cmd()
        .args(["internal-plugin", "terraform-provider-aws"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not load provider: aws"));
}

#[test]
fn test_provisioner_name_is_not_a_provider() {
    terra_cmd()
        .args(["internal-plugin", "terraform-provider-local-exec"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not load provider: local-exec"));
}

#[test]
fn test_unknown_provisioner_json_error() {
    terra_cmd()
        .args(["--format", "json", "internal-plugin", "terraform-provisioner-remote-exec"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(r#""success":false"#))
        .stderr(predicate::str::contains("Could not load provisioner: remote-exec"));
}

// =============================================================================
// internal-plugin: serving
// =============================================================================

#[test]
fn test_serves_provider_until_eof() {
    let output = terra_cmd()
        .args(["internal-plugin", "terraform-provider-null"])
        .write_stdin(
            "{\"operation\":\"describe\"}\n\
             {\"operation\":\"apply\",\"params\":{\"resource\":\"null_resource\",\"config\":{\"triggers\":{\"v\":\"1\"}}}}\n",
        )
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["data"]["name"], "null");
    assert_eq!(lines[0]["data"]["resources"][0], "null_resource");
    assert_eq!(lines[1]["success"], true);
    assert_eq!(lines[1]["data"]["triggers"]["v"], "1");
}

#[test]
fn test_serves_template_provider() {
    terra_cmd()
        .args(["internal-plugin", "terraform-provider-template"])
        .write_stdin(
            r#"{"operation":"apply","params":{"resource":"template_file","config":{"template":"hi ${who}","vars":{"who":"there"}}}}"#,
        )
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""rendered":"hi there""#));
}

#[cfg(unix)]
#[test]
fn test_serves_hyphenated_provisioner() {
    let dir = TempDir::new().unwrap();
    let marker = dir.path().join("provisioned");
    let request = serde_json::json!({
        "operation": "apply",
        "params": {"config": {"command": format!("touch '{}'", marker.display())}},
    });

    terra_cmd()
        .args(["internal-plugin", "terraform-provisioner-local-exec"])
        .write_stdin(format!("{}\n", request))
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""success":true"#));

    assert!(fs::metadata(&marker).is_ok());
}

#[test]
fn test_verbose_logs_start() {
    terra_cmd()
        .args(["--verbose", "internal-plugin", "terraform-provider-null"])
        .write_stdin("")
        .assert()
        .success()
        .stderr(predicate::str::contains("Starting provider plugin null"));
}

// =============================================================================
// plugin subcommands
// =============================================================================

#[test]
fn test_plugin_list() {
    terra_cmd()
        .args(["plugin", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("null"))
        .stdout(predicate::str::contains("template"))
        .stdout(predicate::str::contains("local-exec"));
}

#[test]
fn test_plugin_list_json() {
    let output = terra_cmd()
        .args(["plugin", "list", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["providers"], serde_json::json!(["null", "template"]));
    assert_eq!(json["provisioners"], serde_json::json!(["local-exec"]));
}

#[test]
fn test_plugin_command_points_at_binary() {
    let output = terra_cmd()
        .args(["plugin", "command", "provisioner", "local-exec"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let invocation = stdout.trim_end();
    assert_eq!(invocation.matches(SEPARATOR).count(), 2);

    let parsed = split_invocation(invocation).unwrap();
    assert_eq!(parsed.plugin(), "terraform-provisioner-local-exec");
    assert!(parsed.host_path().is_absolute());
}

#[test]
fn test_plugin_command_rejects_empty_name() {
    terra_cmd()
        .args(["plugin", "command", "provider", ""])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("terraform-provider-"));
}

#[test]
fn test_plugin_command_rejects_separator_in_name() {
    terra_cmd()
        .args(["plugin", "command", "provider", "a-TFSPACE-b"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_plugin_command_rejects_unknown_kind() {
    terra_cmd()
        .args(["plugin", "command", "resource", "aws"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("resource"));
}

#[test]
fn test_invocation_string_launches_plugin() {
    let output = terra_cmd()
        .args(["plugin", "command", "provider", "null"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let invocation = split_invocation(stdout.trim_end()).unwrap();

    let child = invocation
        .command()
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert!(child.status.success());
    assert!(child.stdout.is_empty());
}

#[test]
fn test_plugin_test_round_trip() {
    terra_cmd()
        .args(["plugin", "test", "provider", "template"])
        .assert()
        .success()
        .stdout(predicate::str::contains("template_file"))
        .stdout(predicate::str::contains("working correctly"));
}

#[test]
fn test_plugin_test_unknown_plugin() {
    terra_cmd()
        .args(["plugin", "test", "provisioner", "remote-exec"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not load provisioner: remote-exec"));
}
