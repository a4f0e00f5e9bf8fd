//! Serving loop
//!
//! Once the dispatcher has resolved a factory it hands the instantiated
//! plugin to a [`Server`], which blocks until the peer hangs up.
//!
//! ## Operations
//!
//! | Operation | Params | Data |
//! |-----------|--------|------|
//! | `version` | - | `{"version"}` |
//! | `describe` | - | `{"kind", "name", "resources"?}` |
//! | `validate` | `{"resource"?, "config"}` | `{"errors": [...]}` |
//! | `apply` | `{"resource"?, "config"}` | resource or provisioner state |
//!
//! `resource` is only used by providers.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use serde_json::{json, Value};

use super::protocol::{PluginRequest, PluginResponse, ResourceProvider, ResourceProvisioner};
use crate::domain::PluginKind;

/// An instantiated plugin bound to the name it was requested under
pub enum PluginHandler {
    Provider {
        name: String,
        provider: Box<dyn ResourceProvider>,
    },
    Provisioner {
        name: String,
        provisioner: Box<dyn ResourceProvisioner>,
    },
}

impl PluginHandler {
    pub fn kind(&self) -> PluginKind {
        match self {
            PluginHandler::Provider { .. } => PluginKind::Provider,
            PluginHandler::Provisioner { .. } => PluginKind::Provisioner,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            PluginHandler::Provider { name, .. } | PluginHandler::Provisioner { name, .. } => name,
        }
    }

    /// Answers a single request
    pub fn handle(&mut self, request: &PluginRequest) -> PluginResponse {
        match self.dispatch(request) {
            Ok(data) => PluginResponse::success(data),
            Err(e) => PluginResponse::error(format!("{:#}", e)),
        }
    }

    fn dispatch(&mut self, request: &PluginRequest) -> Result<Value> {
        let params = &request.params;
        let config = params.get("config").cloned().unwrap_or_else(|| json!({}));

        match (request.operation.as_str(), self) {
            ("version", _) => Ok(json!({ "version": crate::VERSION })),

            ("describe", PluginHandler::Provider { name, provider }) => Ok(json!({
                "kind": PluginKind::Provider,
                "name": name,
                "resources": provider.resources(),
            })),
            ("describe", PluginHandler::Provisioner { name, .. }) => Ok(json!({
                "kind": PluginKind::Provisioner,
                "name": name,
            })),

            ("validate", PluginHandler::Provider { provider, .. }) => {
                let resource = resource_param(params)?;
                Ok(json!({ "errors": provider.validate(resource, &config) }))
            }
            ("validate", PluginHandler::Provisioner { provisioner, .. }) => {
                Ok(json!({ "errors": provisioner.validate(&config) }))
            }

            ("apply", PluginHandler::Provider { provider, .. }) => {
                let resource = resource_param(params)?;
                provider.apply(resource, &config)
            }
            ("apply", PluginHandler::Provisioner { provisioner, .. }) => provisioner.apply(&config),

            (other, _) => anyhow::bail!("Unknown operation: {}", other),
        }
    }
}

fn resource_param(params: &Value) -> Result<&str> {
    params
        .get("resource")
        .and_then(Value::as_str)
        .context("Missing 'resource' parameter")
}

/// Runs a plugin until its peer disconnects
pub trait Server {
    fn serve(&self, handler: PluginHandler) -> Result<()>;
}

/// Serves JSON lines over the process's stdin and stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct StdioServer;

impl Server for StdioServer {
    fn serve(&self, handler: PluginHandler) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        serve_lines(handler, stdin.lock(), stdout.lock())
    }
}

/// Answers one request per line until the reader reaches EOF
pub fn serve_lines<R: BufRead, W: Write>(
    mut handler: PluginHandler,
    reader: R,
    mut writer: W,
) -> Result<()> {
    for line in reader.lines() {
        let line = line.context("Failed to read request")?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<PluginRequest>(&line) {
            Ok(request) => handler.handle(&request),
            Err(e) => PluginResponse::error(format!("Invalid request: {}", e)),
        };

        let json = serde_json::to_string(&response).context("Failed to serialize response")?;
        writeln!(writer, "{}", json).context("Failed to write response")?;
        writer.flush().context("Failed to flush response")?;
    }

    Ok(())
}
