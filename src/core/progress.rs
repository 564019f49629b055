// src/core/progress.rs

use crate::constants::{
    BAR_DECORATION_WIDTH, DEFAULT_BAR_SIZE, DEFAULT_ENV_PREFIX, ROTATION_INDICATOR,
};
use crate::core::env::Env;
use crate::core::logger::log_warning;
use crate::core::string_utils;
use crate::system::terminal;
use lazy_static::lazy_static;
use std::fmt;
use std::fs::File;
use std::io::{self, IsTerminal, Write};

lazy_static! {
    static ref PROGRESS_ENV: Env = Env::with_prefix(DEFAULT_ENV_PREFIX);
}

/// Where the progress bar is drawn.
enum Output {
    Disabled,
    Stdout,
    Stderr,
    Tty(File),
    Writer(Box<dyn Write + Send>),
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Disabled => "Disabled",
            Self::Stdout => "Stdout",
            Self::Stderr => "Stderr",
            Self::Tty(_) => "Tty",
            Self::Writer(_) => "Writer",
        };
        f.write_str(name)
    }
}

/// A single-line text progress bar that redraws itself in place.
///
/// ```text
///  42% [=============================                                        ] |
/// ```
///
/// The output is chosen by `UTILS_PROGRESS_OUTPUT` (`STDOUT`, `STDERR` or
/// `TTY`, default `STDERR`); any other value disables the bar. The width
/// follows the terminal unless `UTILS_PROGRESS_SIZE` overrides it.
#[derive(Debug)]
pub struct Progress {
    output: Output,
    total: u64,
    current: u64,
    bar_size: usize,
    rot_position: usize,
}

impl Progress {
    /// Creates a progress bar configured from the `UTILS_` environment variables.
    pub fn new(total: u64) -> Self {
        Self::with_env(&PROGRESS_ENV, total)
    }

    /// Creates a progress bar configured from `PROGRESS_OUTPUT` and
    /// `PROGRESS_SIZE` in the scope of `env`.
    pub fn with_env(env: &Env, total: u64) -> Self {
        let mut selection = env.get::<String>("PROGRESS_OUTPUT", "STDERR".to_string());
        string_utils::to_upper(&mut selection);
        let size_override = env.get::<usize>("PROGRESS_SIZE", 0);

        let (output, columns) = match selection.as_str() {
            "STDOUT" => {
                let stdout = io::stdout();
                let columns = stdout
                    .is_terminal()
                    .then(|| terminal::terminal_columns(&stdout))
                    .flatten();
                (Output::Stdout, columns)
            }
            "STDERR" => {
                let stderr = io::stderr();
                let columns = stderr
                    .is_terminal()
                    .then(|| terminal::terminal_columns(&stderr))
                    .flatten();
                (Output::Stderr, columns)
            }
            "TTY" => match terminal::open_tty() {
                Ok(tty) => {
                    let columns = terminal::terminal_columns(&tty);
                    (Output::Tty(tty), columns)
                }
                Err(e) => {
                    log::debug!("Opening the terminal failed: {}", e);
                    log_warning().append("Could not open terminal. Disabling progress bar.");
                    (Output::Disabled, None)
                }
            },
            other => {
                log::debug!("Progress bar disabled by output selection '{}'", other);
                (Output::Disabled, None)
            }
        };

        let bar_size = if size_override > 0 {
            size_override
        } else {
            columns.unwrap_or(DEFAULT_BAR_SIZE)
        };
        log::debug!("Progress bar output: {:?}, width: {}", output, bar_size);

        Self {
            output,
            total,
            current: 0,
            bar_size,
            rot_position: 0,
        }
    }

    /// Creates a progress bar that draws into `writer` with a fixed width.
    pub fn to_writer(writer: impl Write + Send + 'static, total: u64, bar_size: usize) -> Self {
        Self {
            output: Output::Writer(Box::new(writer)),
            total,
            current: 0,
            bar_size,
            rot_position: 0,
        }
    }

    /// A progress bar that never draws anything.
    pub fn disabled(total: u64) -> Self {
        Self {
            output: Output::Disabled,
            total,
            current: 0,
            bar_size: DEFAULT_BAR_SIZE,
            rot_position: 0,
        }
    }

    /// Whether the bar draws anywhere.
    pub fn is_enabled(&self) -> bool {
        !matches!(self.output, Output::Disabled)
    }

    /// The value that maps to 100%.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The current value.
    pub fn current(&self) -> u64 {
        self.current
    }

    /// Full line width in columns.
    pub fn bar_size(&self) -> usize {
        self.bar_size
    }

    /// Sets a new total without redrawing.
    pub fn set_total(&mut self, total: u64) {
        self.total = total;
    }

    /// Sets the current value, at most `total`, without redrawing.
    pub fn set(&mut self, current: u64) {
        self.current = current.min(self.total);
    }

    /// Sets the current value and redraws.
    pub fn update_to(&mut self, current: u64) {
        self.set(current);

        if !self.is_enabled() {
            return;
        }

        let line = self.render();
        self.rot_position = (self.rot_position + 1) % ROTATION_INDICATOR.len();
        self.write(&line);
    }

    /// Redraws at the current value.
    pub fn update(&mut self) {
        self.update_to(self.current);
    }

    /// Advances by one and redraws.
    pub fn increment(&mut self) {
        self.update_to(self.current.saturating_add(1));
    }

    /// Overwrites the bar with spaces.
    pub fn clear(&mut self) {
        if !self.is_enabled() {
            return;
        }

        let mut blank = " ".repeat(self.bar_size);
        blank.push('\r');
        self.write(&blank);
    }

    /// Builds the bar for the current state, ending with a carriage return.
    fn render(&self) -> String {
        let width = self.bar_size.saturating_sub(BAR_DECORATION_WIDTH);
        let (percent, complete) = if self.total == 0 {
            (0, 0)
        } else {
            let total = u128::from(self.total);
            let current = u128::from(self.current);
            let complete = width as u128 * current / total;
            (
                current * 100 / total,
                usize::try_from(complete).unwrap_or(width),
            )
        };
        let indicator = ROTATION_INDICATOR
            .get(self.rot_position)
            .copied()
            .unwrap_or(' ');

        format!(
            "{:>3}% [{}{}] {}\r",
            percent,
            "=".repeat(complete),
            " ".repeat(width - complete),
            indicator
        )
    }

    fn write(&mut self, text: &str) {
        let result = match &mut self.output {
            Output::Disabled => Ok(()),
            Output::Stdout => write_flush(&mut io::stdout().lock(), text),
            Output::Stderr => write_flush(&mut io::stderr().lock(), text),
            Output::Tty(tty) => write_flush(tty, text),
            Output::Writer(writer) => write_flush(writer, text),
        };
        if let Err(e) = result {
            log::trace!("Progress bar output failed: {}", e);
        }
    }
}

fn write_flush(out: &mut impl Write, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()
}
