//! Plugin management commands

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Stdio};

use anyhow::{Context, Result};
use clap::Subcommand;

use super::output::Output;
use crate::domain::PluginKind;
use crate::plugin::{
    encode, split_invocation, CurrentExe, PluginRequest, PluginResponse, Registries,
};

#[derive(Subcommand)]
pub enum PluginCommands {
    /// List plugins compiled into this binary
    List,

    /// Print the invocation string that launches a plugin
    Command {
        /// Plugin kind (provider or provisioner)
        kind: PluginKind,

        /// Plugin name
        name: String,
    },

    /// Launch a plugin and check that it answers
    Test {
        /// Plugin kind (provider or provisioner)
        kind: PluginKind,

        /// Plugin name
        name: String,
    },
}

pub fn run(cmd: PluginCommands, output: &Output, registries: &Registries) -> Result<()> {
    match cmd {
        PluginCommands::List => list_plugins(output, registries),
        PluginCommands::Command { kind, name } => print_command(output, kind, &name),
        PluginCommands::Test { kind, name } => test_plugin(output, registries, kind, &name),
    }
}

fn list_plugins(output: &Output, registries: &Registries) -> Result<()> {
    if output.is_json() {
        let listing: serde_json::Map<String, serde_json::Value> = PluginKind::ALL
            .iter()
            .map(|kind| (format!("{}s", kind), serde_json::json!(registries.names(*kind))))
            .collect();
        output.data(&listing);
    } else {
        println!("{:<14} NAME", "KIND");
        println!("{}", "-".repeat(40));
        for kind in PluginKind::ALL {
            for name in registries.names(kind) {
                println!("{:<14} {}", kind, name);
            }
        }
    }

    Ok(())
}

fn print_command(output: &Output, kind: PluginKind, name: &str) -> Result<()> {
    let invocation = encode(kind, name, &CurrentExe)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "kind": kind,
            "name": name,
            "invocation": invocation,
        }));
    } else {
        println!("{}", invocation);
    }

    Ok(())
}

/// Re-launches this binary as the plugin and asks it to describe itself
fn describe(kind: PluginKind, name: &str) -> Result<PluginResponse> {
    let invocation = split_invocation(&encode(kind, name, &CurrentExe)?)?;

    let child = invocation
        .command()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to spawn plugin: {}", invocation.plugin()))?;

    exchange(child, &PluginRequest::new("describe", serde_json::json!({})))
}

/// Sends one request, hangs up, and reads the single response
///
/// The child must exit successfully; its stderr is folded into any error.
fn exchange(mut child: Child, request: &PluginRequest) -> Result<PluginResponse> {
    {
        let mut stdin = child.stdin.take().context("Failed to open plugin stdin")?;
        let request = serde_json::to_string(request).context("Failed to serialize request")?;
        writeln!(stdin, "{}", request).context("Failed to write to plugin")?;
        // Dropping stdin hangs up, which ends the plugin's serving loop
    }

    let stdout = child.stdout.take().context("Failed to open plugin stdout")?;
    let response_line = BufReader::new(stdout)
        .lines()
        .next()
        .transpose()
        .context("Failed to read plugin response")?;

    let finished = child.wait_with_output().context("Failed to wait for plugin")?;
    let stderr = String::from_utf8_lossy(&finished.stderr);
    let stderr = stderr.trim();

    if !finished.status.success() {
        anyhow::bail!("Plugin exited with {}: {}", finished.status, stderr);
    }
    let response_line =
        response_line.ok_or_else(|| anyhow::anyhow!("No response from plugin: {}", stderr))?;

    let response: PluginResponse =
        serde_json::from_str(&response_line).context("Failed to parse plugin response")?;

    Ok(response)
}

fn test_plugin(output: &Output, registries: &Registries, kind: PluginKind, name: &str) -> Result<()> {
    match kind {
        PluginKind::Provider => {
            registries.provider(name)?;
        }
        PluginKind::Provisioner => {
            registries.provisioner(name)?;
        }
    }

    output.verbose_ctx("plugin", &format!("Launching {} {}", kind, name));
    let result = describe(kind, name);

    if output.is_json() {
        output.data(&serde_json::json!({
            "kind": kind,
            "name": name,
            "test_success": result.as_ref().map(|r| r.success).unwrap_or(false),
            "describe": result.as_ref().ok().and_then(|r| r.data.clone()),
            "test_error": result.as_ref().err().map(|e| format!("{:#}", e)),
        }));
        return Ok(());
    }

    match result {
        Ok(response) if response.success => {
            if let Some(resources) = response
                .data
                .as_ref()
                .and_then(|d| d.get("resources"))
                .and_then(|r| r.as_array())
            {
                let names: Vec<_> = resources.iter().filter_map(|r| r.as_str()).collect();
                println!("Resources: {}", names.join(", "));
            }
            output.success(&format!("Plugin '{}' is working correctly", name));
        }
        Ok(response) => output.error(&format!(
            "Plugin '{}' returned an error: {}",
            name,
            response.error.unwrap_or_else(|| "Unknown error".to_string())
        )),
        Err(e) => output.error(&format!("Plugin '{}' test failed: {:#}", name, e)),
    }

    Ok(())
}
