// src/cli/mod.rs

use clap::Parser;

pub mod handlers;

/// utilkit: a command-line playground for the utility modules.
///
/// Every command exercises one module:
///
/// - `args <argv...>`: parses the arguments with the GNU-style parser and
///   prints what it found (use `args -- --help` for its help message).
/// - `env <NAME>`: looks up an environment variable through the cached accessor.
/// - `path <PATH>`: splits a path and checks whether it exists.
/// - `time`: formats the current time or a Unix timestamp.
/// - `log <MESSAGE...>`: writes a leveled log record.
/// - `fatal <MESSAGE...>`: writes an error record, which aborts the process.
/// - `progress`: draws a progress bar.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// The command to run. Lists the commands when omitted.
    pub command: Option<String>,

    /// All remaining arguments, passed unchanged to the command.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
