//! The `local-exec` provisioner
//!
//! Runs `command` through the platform shell on the machine serving the
//! plugin. A non-zero exit status fails the provisioner.

use std::process::Command;

use anyhow::{Context, Result};
use serde_json::{json, Value};

use crate::plugin::protocol::ResourceProvisioner;

pub struct LocalExecProvisioner;

impl LocalExecProvisioner {
    fn shell(command: &str) -> Command {
        let (program, flag) = if cfg!(windows) {
            ("cmd", "/C")
        } else {
            ("/bin/sh", "-c")
        };
        let mut cmd = Command::new(program);
        cmd.arg(flag).arg(command);
        cmd
    }
}

impl ResourceProvisioner for LocalExecProvisioner {
    fn validate(&self, config: &Value) -> Vec<String> {
        match config.get("command") {
            Some(Value::String(c)) if !c.trim().is_empty() => Vec::new(),
            Some(Value::String(_)) => vec!["command: must not be empty".to_string()],
            Some(_) => vec!["command: must be a string".to_string()],
            None => vec!["command: required field is not set".to_string()],
        }
    }

    fn apply(&mut self, config: &Value) -> Result<Value> {
        if let Some(error) = self.validate(config).into_iter().next() {
            anyhow::bail!(error);
        }
        let command = config["command"].as_str().unwrap_or_default();

        let output = Self::shell(command)
            .output()
            .with_context(|| format!("Failed to run command: {}", command))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "Command {:?} failed with {}: {}",
                command,
                output.status,
                stderr.trim()
            );
        }

        Ok(json!({
            "status": output.status.code(),
            "stdout": stdout,
        }))
    }
}
