//! The `internal-plugin` command
//!
//! Runs a plugin compiled into this binary. Launchers call it with exactly
//! one argument: a legacy plugin filename such as `terraform-provider-null`,
//! or the literal `version`. Not meant to be called by hand.

use anyhow::Result;

use super::output::Output;
use crate::domain::{PluginIdentifier, PluginKind};
use crate::plugin::{decode, PluginError, PluginHandler, Registries, Server};

/// Argument that reports the host version instead of serving a plugin
pub const VERSION_ARG: &str = "version";

/// How a dispatch ended
#[derive(Debug)]
pub enum Outcome {
    /// Print `message` and terminate the process with `code`
    Terminate { code: i32, message: String },

    /// The invocation was rejected before anything was served
    Rejected(PluginError),

    /// The serving loop returned because the peer hung up
    Served(PluginIdentifier),
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Terminate { code, .. } => *code,
            Outcome::Rejected(_) => 1,
            Outcome::Served(_) => 0,
        }
    }
}

/// Resolves an `internal-plugin` argument list to a served plugin
pub struct Dispatcher<'a> {
    registries: &'a Registries,
    server: &'a dyn Server,
}

impl<'a> Dispatcher<'a> {
    pub fn new(registries: &'a Registries, server: &'a dyn Server) -> Self {
        Self { registries, server }
    }

    /// Decodes `args`, instantiates the plugin, and blocks serving it
    ///
    /// Errors from the serving loop are returned untouched; everything this
    /// layer rejects comes back as [`Outcome::Rejected`].
    pub fn dispatch(&self, args: &[String], output: &Output) -> Result<Outcome> {
        let [arg] = args else {
            return Ok(Outcome::Rejected(PluginError::WrongArgumentCount(args.len())));
        };

        if arg == VERSION_ARG {
            return Ok(Outcome::Terminate {
                code: 0,
                message: crate::VERSION.to_string(),
            });
        }

        let id = match decode(arg) {
            Ok(id) => id,
            Err(e) => return Ok(Outcome::Rejected(e)),
        };

        let handler = match self.instantiate(&id) {
            Ok(handler) => handler,
            Err(e) => return Ok(Outcome::Rejected(e)),
        };

        output.verbose_ctx(
            "internal-plugin",
            &format!("Starting {} plugin {}", id.kind(), id.name()),
        );
        self.server.serve(handler)?;

        Ok(Outcome::Served(id))
    }

    fn instantiate(&self, id: &PluginIdentifier) -> Result<PluginHandler, PluginError> {
        let name = id.name().to_string();
        match id.kind() {
            PluginKind::Provider => {
                let factory = self.registries.provider(&name)?;
                Ok(PluginHandler::Provider {
                    name,
                    provider: factory(),
                })
            }
            PluginKind::Provisioner => {
                let factory = self.registries.provisioner(&name)?;
                Ok(PluginHandler::Provisioner {
                    name,
                    provisioner: factory(),
                })
            }
        }
    }
}

/// Runs the command, reporting failures, and returns the process exit code
pub fn run(
    args: &[String],
    output: &Output,
    registries: &Registries,
    server: &dyn Server,
) -> Result<i32> {
    let outcome = Dispatcher::new(registries, server).dispatch(args, output)?;

    match &outcome {
        // Launchers read the bare version string, so this ignores --format
        Outcome::Terminate { message, .. } => println!("{}", message),
        Outcome::Rejected(e) => output.error(&e.to_string()),
        Outcome::Served(id) => output.verbose_ctx("internal-plugin", &format!("Peer closed {}", id)),
    }

    Ok(outcome.exit_code())
}
