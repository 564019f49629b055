// src/system/terminal.rs

use std::fs::{File, OpenOptions};
use std::io;

/// Device names tried, in order, when writing directly to the terminal.
const TTY_DEVICES: &[&str] = &["/dev/tty", "CON:"];

/// Opens the controlling terminal for writing.
pub fn open_tty() -> io::Result<File> {
    let mut last_error = io::Error::new(io::ErrorKind::NotFound, "no terminal device");
    for device in TTY_DEVICES {
        match OpenOptions::new().write(true).open(device) {
            Ok(file) => return Ok(file),
            Err(e) => {
                log::debug!("Could not open terminal device '{}': {}", device, e);
                last_error = e;
            }
        }
    }
    Err(last_error)
}

/// Returns the number of columns of the terminal behind `fd`, if it is one.
#[cfg(unix)]
#[allow(unsafe_code)]
pub fn terminal_columns(fd: &impl std::os::fd::AsRawFd) -> Option<usize> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    // SAFETY: TIOCGWINSZ writes a `winsize` into the pointer and nothing else.
    let result = unsafe { libc::ioctl(fd.as_raw_fd(), libc::TIOCGWINSZ, &mut size) };
    (result == 0 && size.ws_col > 0).then_some(usize::from(size.ws_col))
}

#[cfg(not(unix))]
pub fn terminal_columns<T>(_fd: &T) -> Option<usize> {
    None
}
