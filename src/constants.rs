// src/constants.rs

/// Prefix of the environment variables read by the progress bar.
pub const DEFAULT_ENV_PREFIX: &str = "UTILS_";

/// Timestamp at the start of every log record, with millisecond precision.
pub const LOG_TIME_PATTERN: &str = "%a %b %d %X%.3f";

/// Shown instead of the rank in log records when no rank is configured.
pub const NO_RANK_PLACEHOLDER: &str = "-";

/// Maximum number of frames printed after a fatal log record.
pub const MAX_BACKTRACE_FRAMES: usize = 50;

/// Column at which option descriptions start in the help message.
pub const HELP_DESCRIPTION_COLUMN: usize = 30;

/// Progress bar width used when the terminal size is unknown.
pub const DEFAULT_BAR_SIZE: usize = 80;

/// Characters used by the progress bar besides the bar itself: `"100% ["` and `"] x"`.
pub const BAR_DECORATION_WIDTH: usize = 9;

/// Glyphs of the rotating activity indicator.
pub const ROTATION_INDICATOR: [char; 4] = ['-', '\\', '|', '/'];
