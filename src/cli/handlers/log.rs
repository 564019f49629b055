// src/cli/handlers/log.rs

use crate::core::logger::{Logger, log_debug, log_info, log_warning};
use anyhow::Result;
use clap::{Parser, ValueEnum};

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum LevelArg {
    Debug,
    #[default]
    Info,
    Warning,
}

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Writes a leveled log record.")]
struct LogArgs {
    /// The words of the message.
    #[arg(required = true, allow_hyphen_values = true)]
    message: Vec<String>,

    /// Severity of the record.
    #[arg(long, short, value_enum, default_value_t = LevelArg::Info)]
    level: LevelArg,

    /// Rank of this process. Without it every record is shown.
    #[arg(long)]
    rank: Option<u32>,

    /// Rank whose records are shown.
    #[arg(long, default_value_t = 0)]
    display_rank: u32,

    /// Show records of every rank.
    #[arg(long)]
    all_ranks: bool,

    /// Show the record regardless of the ranks.
    #[arg(long, short)]
    broadcast: bool,
}

/// Writes the message as a log record at the requested level and rank.
pub fn handle(args: Vec<String>) -> Result<()> {
    let log_args = LogArgs::try_parse_from(&args)?;

    let logger = Logger::global();
    logger.set_current_rank(log_args.rank);
    logger.set_display_rank(log_args.display_rank);
    logger.set_log_all_ranks(log_args.all_ranks);

    let message = log_args.message.join(" ");
    let broadcast = log_args.broadcast;
    match log_args.level {
        LevelArg::Debug if broadcast => {
            log_debug().broadcast().append(&message);
        }
        LevelArg::Debug => {
            log_debug().append(&message);
        }
        LevelArg::Info if broadcast => {
            log_info().broadcast().append(&message);
        }
        LevelArg::Info => {
            log_info().append(&message);
        }
        LevelArg::Warning if broadcast => {
            log_warning().broadcast().append(&message);
        }
        LevelArg::Warning => {
            log_warning().append(&message);
        }
    }

    Ok(())
}
