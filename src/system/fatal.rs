// src/system/fatal.rs

use crate::constants::MAX_BACKTRACE_FRAMES;
use std::backtrace::Backtrace;
use std::io::Write;

/// Prints a backtrace of the calling thread to standard error, raises the
/// debug-trap signal and aborts the process.
///
/// Under a debugger the trap stops execution at the caller. Without one the
/// default action of the signal already ends the process, `abort` covers
/// platforms without it.
pub fn abort_with_backtrace() -> ! {
    let backtrace = Backtrace::force_capture().to_string();

    {
        let mut err = std::io::stderr().lock();
        let _ = writeln!(err, "Backtrace:");
        for line in truncate_frames(&backtrace, MAX_BACKTRACE_FRAMES) {
            let _ = writeln!(err, "{}", line);
        }
        let _ = err.flush();
    }

    raise_debug_trap();
    std::process::abort()
}

/// Keeps the lines of the first `max_frames` frames of a formatted backtrace.
///
/// Frames start with their index (`"  3: symbol"`); the source location
/// lines that follow belong to the same frame.
fn truncate_frames(backtrace: &str, max_frames: usize) -> Vec<&str> {
    let mut frames = 0;
    let mut kept = Vec::new();
    for line in backtrace.lines() {
        if is_frame_start(line) {
            frames += 1;
            if frames > max_frames {
                kept.push("  ...");
                break;
            }
        }
        kept.push(line);
    }
    kept
}

fn is_frame_start(line: &str) -> bool {
    line.trim_start()
        .split_once(':')
        .is_some_and(|(index, _)| !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(unix)]
#[allow(unsafe_code)]
fn raise_debug_trap() {
    // SAFETY: `raise` only delivers a signal to the calling thread.
    unsafe {
        libc::raise(libc::SIGTRAP);
    }
}

#[cfg(not(unix))]
fn raise_debug_trap() {}
