// src/core/mod.rs

/// GNU-style command-line parsing.
pub mod arg_parser;
/// Cached, prefix-scoped environment variables.
pub mod env;
/// Leveled logging with rank filtering.
pub mod logger;
/// Integer helpers.
pub mod math_utils;
/// Path strings.
pub mod path;
/// Terminal progress bar.
pub mod progress;
/// String conversion and editing.
pub mod string_utils;
/// Timestamp formatting.
pub mod time_utils;
