//! # Plugin System
//!
//! Lets one binary stand in for many separately-named plugin executables.
//!
//! ## Overview
//!
//! Standalone plugins used to ship as `terraform-{kind}-{name}` binaries.
//! Internal plugins are compiled into the host instead, and the host is
//! re-invoked as `terra internal-plugin terraform-{kind}-{name}` to serve one
//! of them.
//!
//! ```text
//! Launcher                               Host (re-invoked)
//!  │                                         │
//!  ├── encode(kind, name) ──▶ /path/to/terra-TFSPACE-internal-plugin-TFSPACE-terraform-provider-null
//!  │                                         │
//!  ├── split on -TFSPACE-, spawn ───────────▶ decode ─▶ registry lookup ─▶ serve
//!  │                                         │
//!  └── JSON lines over stdin/stdout ◀───────▶ blocks until the launcher hangs up
//! ```
//!
//! ## Plugin Kinds
//!
//! | Kind | Registry | Not found error |
//! |------|----------|-----------------|
//! | Provider | [`Registries::provider`] | [`PluginError::ProviderNotFound`] |
//! | Provisioner | [`Registries::provisioner`] | [`PluginError::ProvisionerNotFound`] |
//!
//! ## Key Types
//!
//! - [`Registries`] - Immutable name -> factory maps, one per kind
//! - [`Invocation`] - An invocation string split back into its fields
//! - [`Server`] - Serving loop seam; [`StdioServer`] is the default
//! - [`ResourceProvider`] / [`ResourceProvisioner`] - Plugin capabilities

pub mod builtin;
mod codec;
mod error;
mod host;
mod protocol;
mod registry;
mod serve;

pub use codec::{
    decode, encode, legacy_name, split_invocation, Invocation, LEGACY_PREFIX, MARKER, SEPARATOR,
};
pub use error::PluginError;
pub use host::{host_path, CurrentExe, HostPathResolver};
pub use protocol::{PluginRequest, PluginResponse, ResourceProvider, ResourceProvisioner};
pub use registry::{
    ProviderFactory, ProvisionerFactory, Registries, Registry, RegistryBuilder,
};
pub use serve::{serve_lines, PluginHandler, Server, StdioServer};
