// src/cli/handlers/fatal.rs

use crate::core::logger::log_error;
use anyhow::Result;

/// Writes `args` as an error record. The process aborts once it is flushed.
pub fn handle(args: Vec<String>) -> Result<()> {
    let message = if args.is_empty() {
        "fatal error requested".to_string()
    } else {
        args.join(" ")
    };

    log::debug!("Emitting a fatal log record");
    log_error().append(&message);

    Ok(())
}
