// src/cli/handlers/args.rs

use crate::core::arg_parser::{Args, Arity, ParseStatus};
use anyhow::{Result, bail};
use colored::*;

const PROGRAM: &str = "utilkit args";
const MODES: &[&str] = &["fast", "slow"];

/// Parses `args` with the GNU-style parser and prints what was recognized.
pub fn handle(args: Vec<String>) -> Result<()> {
    let mut parser = build_parser()?;

    let mut argv = vec![PROGRAM.to_string()];
    argv.extend(args);

    match parser.parse(&argv, true) {
        ParseStatus::HelpShown => return Ok(()),
        ParseStatus::Error => bail!("Invalid arguments for '{}'.", PROGRAM),
        ParseStatus::Success => {}
    }

    let mode_index = parser.get_or::<usize>("mode", 0);
    let mode = MODES.get(mode_index).copied().unwrap_or("fast");

    println!("{}", "Options:".bold());
    println!("  {:<10} {}", "name".blue(), parser.get_or("name", "world".to_string()));
    println!("  {:<10} {}", "count".blue(), parser.get_or::<u32>("count", 1));
    println!("  {:<10} {}", "verbose".blue(), parser.get_flag("verbose", false));
    println!("  {:<10} {} (#{})", "mode".blue(), mode, mode_index);
    if parser.is_set("level") {
        println!("  {:<10} {}", "level".blue(), parser.get_or::<u8>("level", 1));
    }

    println!("{}", "Arguments:".bold());
    println!("  {:<10} {}", "input".blue(), parser.get_positional::<String>("input")?);
    if parser.is_set_positional("output") {
        println!("  {:<10} {}", "output".blue(), parser.get_positional::<String>("output")?);
    } else {
        println!("  {:<10} {}", "output".blue(), "-".dimmed());
    }

    Ok(())
}

fn build_parser() -> Result<Args> {
    let mut parser = Args::new("Shows how command-line arguments are parsed.", true);
    parser.add_option("name", Some('n'), "Name to greet", Arity::Required, false)?;
    parser.add_option("count", Some('c'), "How many times", Arity::Required, false)?;
    parser.add_option("verbose", Some('v'), "Print more details", Arity::None, false)?;
    parser.add_option("level", Some('l'), "Optional level, e.g. -l3", Arity::Optional, false)?;
    parser.add_enum_option("mode", MODES, Some('m'), "Processing mode", false)?;
    parser.add_positional("input", "Input file", true)?;
    parser.add_positional("output", "Output file", false)?;
    parser.set_help_footer("\nValues are converted with the same rules as environment variables.\n");
    Ok(parser)
}
