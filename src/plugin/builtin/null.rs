//! The `null` provider
//!
//! Manages `null_resource`, a resource with no side effects whose ID changes
//! whenever its `triggers` change.

use anyhow::Result;
use serde_json::{json, Value};

use super::resource_id;
use crate::plugin::protocol::ResourceProvider;

const NULL_RESOURCE: &str = "null_resource";

pub struct NullProvider;

impl ResourceProvider for NullProvider {
    fn resources(&self) -> Vec<&'static str> {
        vec![NULL_RESOURCE]
    }

    fn validate(&self, resource: &str, config: &Value) -> Vec<String> {
        let mut errors = Vec::new();
        if resource != NULL_RESOURCE {
            errors.push(format!("Unknown resource type: {}", resource));
        }
        if let Some(triggers) = config.get("triggers") {
            if !triggers.is_object() {
                errors.push("triggers: must be a map".to_string());
            }
        }
        errors
    }

    fn apply(&mut self, resource: &str, config: &Value) -> Result<Value> {
        if let Some(error) = self.validate(resource, config).into_iter().next() {
            anyhow::bail!(error);
        }

        let triggers = config.get("triggers").cloned().unwrap_or_else(|| json!({}));
        Ok(json!({
            "id": resource_id(resource, &triggers),
            "triggers": triggers,
        }))
    }
}
