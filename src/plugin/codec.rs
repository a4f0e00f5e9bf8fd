//! Plugin name encoding and decoding
//!
//! Internal plugins are launched by re-invoking the host binary. The launcher
//! receives a single string of the form:
//!
//! ```text
//! /path/to/terra-TFSPACE-internal-plugin-TFSPACE-terraform-provider-null
//! ```
//!
//! and splits it on [`SEPARATOR`]. A plain space cannot be used because the
//! host path may itself contain spaces.
//!
//! The last field is a legacy plugin filename, `terraform-{kind}-{name}`,
//! matching the names of standalone plugin binaries.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;

use super::error::PluginError;
use super::host::{host_path, HostPathResolver};
use crate::domain::{PluginIdentifier, PluginKind};

/// Field separator inside an invocation string
pub const SEPARATOR: &str = "-TFSPACE-";

/// Subcommand that serves an internal plugin
pub const MARKER: &str = "internal-plugin";

/// Prefix of legacy plugin filenames
pub const LEGACY_PREFIX: &str = "terraform";

static LEGACY_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^terraform-(provider|provisioner)-(.+)$").expect("legacy name pattern is valid")
});

/// Builds the legacy filename for a plugin, e.g. `terraform-provider-null`
pub fn legacy_name(kind: PluginKind, name: &str) -> String {
    format!("{}-{}-{}", LEGACY_PREFIX, kind, name)
}

/// Builds the invocation string that re-launches the host as the given plugin
///
/// Fails rather than producing a string that [`split_invocation`] or
/// [`decode`] would not give back unchanged.
pub fn encode(
    kind: PluginKind,
    name: &str,
    resolver: &dyn HostPathResolver,
) -> Result<String, PluginError> {
    let legacy = legacy_name(kind, name);
    if name.contains(SEPARATOR) || !matches!(decode(&legacy), Ok(ref id) if id.name() == name) {
        return Err(PluginError::MalformedPluginName(legacy));
    }

    let host = host_path(resolver)?;
    let host = host
        .to_str()
        .ok_or_else(|| PluginError::HostPathNotUtf8(host.clone()))?;
    if host.is_empty() || host.contains(SEPARATOR) {
        return Err(PluginError::MalformedInvocation(host.to_string()));
    }

    Ok(format!("{}{}{}{}{}", host, SEPARATOR, MARKER, SEPARATOR, legacy))
}

/// Parses a legacy filename like `terraform-provisioner-remote-exec`
pub fn decode(legacy: &str) -> Result<PluginIdentifier, PluginError> {
    let malformed = || PluginError::MalformedPluginName(legacy.to_string());

    let caps = LEGACY_NAME.captures(legacy).ok_or_else(malformed)?;
    if caps.len() != 3 {
        return Err(malformed());
    }

    let kind: PluginKind = caps[1].parse().map_err(|_| malformed())?;
    PluginIdentifier::new(kind, &caps[2]).map_err(|_| malformed())
}

/// An invocation string split back into its three fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    host_path: PathBuf,
    subcommand: String,
    plugin: String,
}

impl Invocation {
    pub fn host_path(&self) -> &Path {
        &self.host_path
    }

    pub fn subcommand(&self) -> &str {
        &self.subcommand
    }

    /// The legacy plugin filename
    pub fn plugin(&self) -> &str {
        &self.plugin
    }

    /// Decodes the embedded plugin filename
    pub fn identifier(&self) -> Result<PluginIdentifier, PluginError> {
        decode(&self.plugin)
    }

    /// Builds the process command that serves this plugin
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.host_path);
        cmd.arg(&self.subcommand).arg(&self.plugin);
        cmd
    }
}

/// Splits an invocation string on [`SEPARATOR`]
///
/// The host path is kept whole even when it contains spaces.
pub fn split_invocation(invocation: &str) -> Result<Invocation, PluginError> {
    let malformed = || PluginError::MalformedInvocation(invocation.to_string());

    let fields: Vec<&str> = invocation.split(SEPARATOR).collect();
    let [host, subcommand, plugin] = fields.as_slice() else {
        return Err(malformed());
    };

    if host.is_empty() || *subcommand != MARKER || plugin.is_empty() {
        return Err(malformed());
    }

    Ok(Invocation {
        host_path: PathBuf::from(host),
        subcommand: subcommand.to_string(),
        plugin: plugin.to_string(),
    })
}
