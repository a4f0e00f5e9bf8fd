//! Plugin kinds and identifiers
//!
//! A plugin is identified by its kind (`provider` or `provisioner`) and a
//! name. The name may contain hyphens (`local-exec`), so it is never split
//! further once the kind token has been consumed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum KindError {
    #[error("Invalid plugin kind: expected 'provider' or 'provisioner', got '{0}'")]
    InvalidKind(String),

    #[error("Plugin name must not be empty")]
    EmptyName,
}

/// The capability a plugin provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginKind {
    Provider,
    Provisioner,
}

impl PluginKind {
    /// All kinds, in listing order
    pub const ALL: [PluginKind; 2] = [PluginKind::Provider, PluginKind::Provisioner];

    /// Lowercase token used in legacy plugin filenames
    pub fn as_str(&self) -> &'static str {
        match self {
            PluginKind::Provider => "provider",
            PluginKind::Provisioner => "provisioner",
        }
    }
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PluginKind {
    type Err = KindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "provider" => Ok(PluginKind::Provider),
            "provisioner" => Ok(PluginKind::Provisioner),
            other => Err(KindError::InvalidKind(other.to_string())),
        }
    }
}

/// A decoded plugin identity: kind plus non-empty name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PluginIdentifier {
    kind: PluginKind,
    name: String,
}

impl PluginIdentifier {
    /// Creates an identifier, rejecting empty names
    pub fn new(kind: PluginKind, name: impl Into<String>) -> Result<Self, KindError> {
        let name = name.into();
        if name.is_empty() {
            return Err(KindError::EmptyName);
        }
        Ok(Self { kind, name })
    }

    pub fn kind(&self) -> PluginKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for PluginIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.name)
    }
}
