//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{internal_plugin, plugin_cmd};
use crate::plugin::{Registries, StdioServer};

#[derive(Parser)]
#[command(name = "terra")]
#[command(author, version, about = "One binary, many plugins")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Runs an internally-compiled plugin (internal use)
    #[command(hide = true)]
    InternalPlugin {
        /// Legacy plugin name (terraform-KIND-NAME) or `version`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Inspect the plugins compiled into this binary
    #[command(subcommand)]
    Plugin(plugin_cmd::PluginCommands),
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);
    let registries = Registries::builtin();

    output.verbose_ctx(
        "registry",
        &format!(
            "{} providers, {} provisioners",
            registries.providers().len(),
            registries.provisioners().len()
        ),
    );

    match cli.command {
        Commands::InternalPlugin { args } => {
            // The serving loop owns the process; its end is the process's end
            let exit_code = internal_plugin::run(&args, &output, &registries, &StdioServer)?;
            std::process::exit(exit_code);
        }

        Commands::Plugin(cmd) => plugin_cmd::run(cmd, &output, &registries)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
