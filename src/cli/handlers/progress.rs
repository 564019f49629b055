// src/cli/handlers/progress.rs

use crate::core::progress::Progress;
use anyhow::Result;
use clap::Parser;
use std::thread;
use std::time::Duration;

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Draws a progress bar (see UTILS_PROGRESS_OUTPUT and UTILS_PROGRESS_SIZE)."
)]
struct ProgressArgs {
    /// Number of steps.
    #[arg(long, short, default_value_t = 40)]
    total: u64,

    /// Pause between steps, in milliseconds.
    #[arg(long, short, default_value_t = 25)]
    delay: u64,
}

/// Draws a progress bar that counts up to the requested total.
pub fn handle(args: Vec<String>) -> Result<()> {
    let progress_args = ProgressArgs::try_parse_from(&args)?;
    let delay = Duration::from_millis(progress_args.delay);

    // Wiped when the handler returns.
    let mut progress = scopeguard::guard(Progress::new(progress_args.total), |mut progress| {
        progress.clear();
    });

    progress.update();
    for _ in 0..progress_args.total {
        thread::sleep(delay);
        progress.increment();
    }

    log::debug!("Drew {} progress steps", progress.current());
    Ok(())
}
