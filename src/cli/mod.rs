//! # Command-Line Interface
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `internal-plugin NAME` | Serve a compiled-in plugin (launched by the host, hidden) |
//! | `internal-plugin version` | Print the host version and exit |
//! | `plugin list` | List compiled-in providers and provisioners |
//! | `plugin command KIND NAME` | Print the invocation string for a plugin |
//! | `plugin test KIND NAME` | Launch a plugin and check that it answers |
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Exit Codes
//!
//! `internal-plugin` exits `0` after `version` or once the peer hangs up,
//! and `1` for argument, decode, or lookup failures.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod internal_plugin;
mod output;
mod plugin_cmd;

pub use app::{run, Cli, Commands};
pub use internal_plugin::{Dispatcher, Outcome, VERSION_ARG};
pub use output::{Output, OutputFormat};
