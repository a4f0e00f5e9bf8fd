//! Plugin protocol types
//!
//! A served plugin talks to its peer with JSON messages, one per line.
//! The peer sends a [`PluginRequest`] and reads back a [`PluginResponse`].

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A provider: manages the lifecycle of named resource types
pub trait ResourceProvider: Send {
    /// Resource types this provider manages
    fn resources(&self) -> Vec<&'static str>;

    /// Returns validation errors for a resource configuration
    fn validate(&self, resource: &str, config: &serde_json::Value) -> Vec<String>;

    /// Creates or updates a resource, returning its resulting state
    fn apply(&mut self, resource: &str, config: &serde_json::Value) -> Result<serde_json::Value>;
}

/// A provisioner: runs an action against a freshly created resource
pub trait ResourceProvisioner: Send {
    /// Returns validation errors for a provisioner configuration
    fn validate(&self, config: &serde_json::Value) -> Vec<String>;

    /// Runs the provisioner
    fn apply(&mut self, config: &serde_json::Value) -> Result<serde_json::Value>;
}

/// A message sent to a served plugin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginRequest {
    /// The operation to perform
    pub operation: String,

    /// Operation-specific parameters
    #[serde(default)]
    pub params: serde_json::Value,
}

impl PluginRequest {
    pub fn new(operation: impl Into<String>, params: impl Into<serde_json::Value>) -> Self {
        Self {
            operation: operation.into(),
            params: params.into(),
        }
    }
}

/// A response from a served plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginResponse {
    /// Whether the operation succeeded
    pub success: bool,

    /// Result data (if success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Error message (if failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PluginResponse {
    pub fn success(data: impl Into<serde_json::Value>) -> Self {
        Self {
            success: true,
            data: Some(data.into()),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}
