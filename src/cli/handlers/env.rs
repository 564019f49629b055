// src/cli/handlers/env.rs

use crate::core::env::Env;
use anyhow::Result;
use clap::Parser;
use colored::*;

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Looks up environment variables through the cached accessor."
)]
struct EnvArgs {
    /// Variable names, without the prefix.
    #[arg(required = true)]
    names: Vec<String>,

    /// Prefix prepended to every name (e.g. 'UTILS_').
    #[arg(long, short, default_value = "")]
    prefix: String,

    /// Parse the values as integers instead of printing them verbatim.
    #[arg(long)]
    int: bool,
}

/// Looks up each name through one cached `Env` and prints the values.
pub fn handle(args: Vec<String>) -> Result<()> {
    let env_args = EnvArgs::try_parse_from(&args)?;
    let env = Env::with_prefix(env_args.prefix.as_str());

    for name in &env_args.names {
        let full_name = format!("{}{}", env.prefix(), name);
        if env_args.int {
            match env.get_optional::<i64>(name)? {
                Some(value) => println!("{}={}", full_name.green(), value),
                None => println!("{} {}", full_name.yellow(), "is not set".dimmed()),
            }
        } else {
            match env.raw(name) {
                Some(value) => println!("{}={}", full_name.green(), value),
                None => println!("{} {}", full_name.yellow(), "is not set".dimmed()),
            }
        }
    }

    Ok(())
}
