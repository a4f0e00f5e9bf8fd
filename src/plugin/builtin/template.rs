//! The `template` provider
//!
//! Manages `template_file`, which renders `${name}` placeholders in a
//! template string from a map of variables.

use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::resource_id;
use crate::plugin::protocol::ResourceProvider;

const TEMPLATE_FILE: &str = "template_file";

#[derive(Debug, Deserialize)]
struct TemplateConfig {
    template: String,

    #[serde(default)]
    vars: Map<String, Value>,
}

pub struct TemplateProvider;

impl ResourceProvider for TemplateProvider {
    fn resources(&self) -> Vec<&'static str> {
        vec![TEMPLATE_FILE]
    }

    fn validate(&self, resource: &str, config: &Value) -> Vec<String> {
        if resource != TEMPLATE_FILE {
            return vec![format!("Unknown resource type: {}", resource)];
        }
        match serde_json::from_value::<TemplateConfig>(config.clone()) {
            Ok(_) => Vec::new(),
            Err(e) => vec![format!("Invalid template_file config: {}", e)],
        }
    }

    fn apply(&mut self, resource: &str, config: &Value) -> Result<Value> {
        if resource != TEMPLATE_FILE {
            anyhow::bail!("Unknown resource type: {}", resource);
        }
        let config: TemplateConfig = serde_json::from_value(config.clone())
            .context("Invalid template_file config")?;

        let rendered = render(&config.template, &config.vars)?;
        Ok(json!({
            "id": resource_id(resource, &Value::String(rendered.clone())),
            "rendered": rendered,
        }))
    }
}

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]*)\}").expect("placeholder pattern is valid"));

/// Replaces every `${name}` with the matching variable
fn render(template: &str, vars: &Map<String, Value>) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(template) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        out.push_str(&template[last..whole.start()]);
        match vars.get(name.as_str()) {
            Some(Value::String(s)) => out.push_str(s),
            Some(other) => out.push_str(&other.to_string()),
            None => anyhow::bail!("Unknown template variable: {}", name.as_str()),
        }
        last = whole.end();
    }

    let rest = &template[last..];
    if let Some(start) = rest.find("${") {
        anyhow::bail!("Unterminated placeholder in template: {}", &rest[start..]);
    }
    out.push_str(rest);
    Ok(out)
}
