// src/cli/handlers/time.rs

use crate::core::time_utils;
use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Formats a timestamp with a strftime pattern.")]
struct TimeArgs {
    /// The strftime pattern.
    #[arg(long, short, default_value = "%Y-%m-%d %H:%M:%S")]
    pattern: String,

    /// Seconds since the Unix epoch. Defaults to now.
    #[arg(long, short, allow_hyphen_values = true)]
    unix: Option<i64>,
}

/// Prints the current time, or a Unix timestamp, in the requested format.
pub fn handle(args: Vec<String>) -> Result<()> {
    let time_args = TimeArgs::try_parse_from(&args)?;

    let formatted = match time_args.unix {
        Some(seconds) => time_utils::time_as_string_unix(&time_args.pattern, seconds)?,
        None => time_utils::now_as_string(&time_args.pattern)?,
    };
    println!("{}", formatted);

    Ok(())
}
