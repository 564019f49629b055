//! Small building blocks for command-line programs: a GNU-style argument
//! parser, a leveled logger with rank filtering, cached environment lookups,
//! path strings, a terminal progress bar and a few string, math and time
//! helpers.

/// Demo command-line front-end.
pub mod cli;
/// Fixed defaults.
pub mod constants;
/// The utilities themselves.
pub mod core;
/// Terminal and process-level OS calls.
pub mod system;

pub use crate::core::arg_parser::{Args, Arity, ParseStatus};
pub use crate::core::env::Env;
pub use crate::core::logger::{Logger, log_debug, log_error, log_info, log_warning};
pub use crate::core::path::PathValue;
pub use crate::core::progress::Progress;
