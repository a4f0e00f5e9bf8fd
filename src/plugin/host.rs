//! Host executable lookup
//!
//! The invocation string embeds the absolute path of the running binary.
//! Resolution is one-shot; a failure reflects the execution environment and
//! is surfaced as-is.

use std::io;
use std::path::PathBuf;

use super::error::PluginError;

/// Resolves the absolute path of the binary that should be re-invoked
pub trait HostPathResolver {
    fn resolve(&self) -> io::Result<PathBuf>;
}

/// Resolves to the currently running executable
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentExe;

impl HostPathResolver for CurrentExe {
    fn resolve(&self) -> io::Result<PathBuf> {
        let path = std::env::current_exe()?;
        if path.is_absolute() {
            Ok(path)
        } else {
            Ok(std::env::current_dir()?.join(path))
        }
    }
}

impl<F> HostPathResolver for F
where
    F: Fn() -> io::Result<PathBuf>,
{
    fn resolve(&self) -> io::Result<PathBuf> {
        self()
    }
}

/// Resolves the host path, mapping failures to `HostPathUnavailable`
pub fn host_path(resolver: &dyn HostPathResolver) -> Result<PathBuf, PluginError> {
    resolver.resolve().map_err(PluginError::HostPathUnavailable)
}
