//! Plugins compiled into the host binary
//!
//! | Kind | Name | Resources |
//! |------|------|-----------|
//! | Provider | `null` | `null_resource` |
//! | Provider | `template` | `template_file` |
//! | Provisioner | `local-exec` | runs a shell command |

mod local_exec;
mod null;
mod template;

pub use local_exec::LocalExecProvisioner;
pub use null::NullProvider;
pub use template::TemplateProvider;

use super::protocol::{ResourceProvider, ResourceProvisioner};
use super::registry::{ProviderFactory, ProvisionerFactory};

pub const PROVIDERS: &[(&str, ProviderFactory)] =
    &[("null", null_provider), ("template", template_provider)];

pub const PROVISIONERS: &[(&str, ProvisionerFactory)] = &[("local-exec", local_exec_provisioner)];

fn null_provider() -> Box<dyn ResourceProvider> {
    Box::new(NullProvider)
}

fn template_provider() -> Box<dyn ResourceProvider> {
    Box::new(TemplateProvider)
}

fn local_exec_provisioner() -> Box<dyn ResourceProvisioner> {
    Box::new(LocalExecProvisioner)
}

/// Derives a stable resource ID from its configuration
fn resource_id(resource: &str, config: &serde_json::Value) -> String {
    let input = format!("{}{}", resource, config);
    let hash = blake3::hash(input.as_bytes());
    hash.to_hex()[..16].to_string()
}
