//! Terra Host - many plugins, one binary
//!
//! The host binary carries its providers and provisioners compiled in. A
//! launcher re-invokes it with an encoded plugin name, and the host decodes
//! that name, looks the plugin up in its registries, and serves it over
//! stdin/stdout until the launcher hangs up.

pub mod domain;
pub mod plugin;
pub mod cli;

pub use domain::{PluginIdentifier, PluginKind};
pub use plugin::{PluginError, Registries};

/// Version reported by `internal-plugin version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
