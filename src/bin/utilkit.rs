// src/bin/utilkit.rs

use anyhow::Result;
use clap::Parser;
use colored::*;
use utilkit::cli::{Cli, handlers};

// --- Command Definition and Registry ---

/// A `utilkit` command, its aliases and its handler.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    about: &'static str,
    handler: fn(Vec<String>) -> Result<()>,
}

static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "args",
        aliases: &[],
        about: "Parse arguments with the GNU-style parser",
        handler: handlers::args::handle,
    },
    CommandDefinition {
        name: "env",
        aliases: &[],
        about: "Look up environment variables",
        handler: handlers::env::handle,
    },
    CommandDefinition {
        name: "path",
        aliases: &[],
        about: "Split a path into basename and dirname",
        handler: handlers::path::handle,
    },
    CommandDefinition {
        name: "time",
        aliases: &["date"],
        about: "Format a timestamp",
        handler: handlers::time::handle,
    },
    CommandDefinition {
        name: "log",
        aliases: &[],
        about: "Write a leveled log record",
        handler: handlers::log::handle,
    },
    CommandDefinition {
        name: "fatal",
        aliases: &["abort"],
        about: "Write an error record and abort",
        handler: handlers::fatal::handle,
    },
    CommandDefinition {
        name: "progress",
        aliases: &["bar"],
        about: "Draw a progress bar",
        handler: handlers::progress::handle,
    },
];

fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let Some(name) = cli.command else {
        print_commands();
        return Ok(());
    };

    match find_command(&name) {
        Some(command) => (command.handler)(cli.args),
        None => anyhow::bail!("Unknown command '{}'. Run 'utilkit' to list the commands.", name),
    }
}

fn print_commands() {
    println!("{}", "Commands:".yellow().bold());
    for command in COMMAND_REGISTRY {
        println!("  {:<10} {}", command.name.cyan(), command.about);
    }
    println!(
        "\nLog levels compiled in: 0-{} (0 errors, 1 warnings, 2 info, 3 debug).",
        utilkit::core::logger::compiled_log_level()
    );
}
