//! # System Interaction Layer
//!
//! The few places where the utilities talk to the operating system directly
//! instead of through the standard library.
//!
//! ## Modules
//!
//! - **`fatal`**: Ends the process after a fatal log record: prints a bounded
//!   backtrace, raises the debug-trap signal so an attached debugger stops at
//!   the caller, then aborts.
//! - **`terminal`**: Opens the controlling terminal and queries its width,
//!   used by the progress bar.

pub mod fatal;
pub mod terminal;
