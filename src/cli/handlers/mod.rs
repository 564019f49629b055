// src/cli/handlers/mod.rs

// One module per `utilkit` command. Each handler receives the arguments
// that follow the command name.

/// `args`: GNU-style parsing demo.
pub mod args;
/// `env`: cached environment lookups.
pub mod env;
/// `fatal`: error record that aborts.
pub mod fatal;
/// `log`: leveled, rank-filtered records.
pub mod log;
/// `path`: path splitting and joining.
pub mod path;
/// `progress`: progress bar demo.
pub mod progress;
/// `time`: timestamp formatting.
pub mod time;
