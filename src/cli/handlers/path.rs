// src/cli/handlers/path.rs

use crate::core::path::PathValue;
use anyhow::Result;
use clap::Parser;
use colored::*;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Splits a path into its parts.")]
struct PathArgs {
    /// The path to inspect.
    path: String,

    /// Another path to append.
    #[arg(long, short)]
    join: Option<String>,
}

/// Splits the path into its parts and reports whether it exists.
pub fn handle(args: Vec<String>) -> Result<()> {
    let path_args = PathArgs::try_parse_from(&args)?;
    let mut path = PathValue::new(path_args.path);

    if let Some(other) = path_args.join {
        path = &path + &PathValue::new(other);
    }

    println!("  {:<10} {}", "path".blue(), path);
    println!("  {:<10} {}", "basename".blue(), path.basename());
    println!("  {:<10} {}", "dirname".blue(), path.dirname());

    let exists = if path.exists() {
        "yes".green()
    } else {
        "no".red()
    };
    println!("  {:<10} {}", "exists".blue(), exists);

    Ok(())
}
