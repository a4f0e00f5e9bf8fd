//! Errors raised while encoding, decoding, and dispatching plugins

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("Wrong number of args: expected 1, got {0}")]
    WrongArgumentCount(usize),

    #[error("Error parsing plugin argument: {0:?}")]
    MalformedPluginName(String),

    #[error("Malformed plugin invocation: {0:?}")]
    MalformedInvocation(String),

    #[error("Host executable path is not valid UTF-8: {0:?}")]
    HostPathNotUtf8(PathBuf),

    #[error("Could not determine host executable path: {0}")]
    HostPathUnavailable(#[source] io::Error),

    #[error("Could not load provider: {0}")]
    ProviderNotFound(String),

    #[error("Could not load provisioner: {0}")]
    ProvisionerNotFound(String),
}
