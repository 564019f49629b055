// src/core/path.rs

use crate::core::string_utils::{self, ConvertError, ParseValue};
use std::fmt;
use std::ops::Add;
use std::path::Path;

/// Separator used when joining paths.
#[cfg(unix)]
pub const SEPARATOR: char = '/';
#[cfg(not(unix))]
pub const SEPARATOR: char = '\\';

/// All characters recognized as separators when splitting a path.
#[cfg(unix)]
const SEPARATORS: &[char] = &['/'];
#[cfg(not(unix))]
const SEPARATORS: &[char] = &['\\', '/'];

/// A file or directory name stored as a plain string.
///
/// Construction strips one trailing separator, so `"foo/"` and `"foo"` are
/// the same value. Apart from [`PathValue::exists`] nothing here touches the
/// filesystem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathValue {
    path: String,
}

impl PathValue {
    /// Wraps `path`, dropping one trailing separator.
    pub fn new(path: impl Into<String>) -> Self {
        let mut path = path.into();
        if path.ends_with(SEPARATOR) {
            string_utils::replace_last(&mut path, &SEPARATOR.to_string(), "");
        }
        Self { path }
    }

    /// The path text.
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Whether the path is empty.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// The part after the last separator, or the whole path if there is none.
    pub fn basename(&self) -> &str {
        match self.path.rsplit_once(SEPARATORS) {
            Some((_, base)) => base,
            None => &self.path,
        }
    }

    /// The part before the last separator, or `""` if there is none.
    pub fn dirname(&self) -> &str {
        match self.path.rsplit_once(SEPARATORS) {
            Some((dir, _)) => dir,
            None => "",
        }
    }

    /// The directory containing this path.
    pub fn dir(&self) -> Self {
        Self::new(self.dirname())
    }

    /// Appends `other` (which should be relative) with a single separator.
    /// Joining with an empty path returns the other side unchanged.
    pub fn join(&self, other: &Self) -> Self {
        if self.path.is_empty() {
            return other.clone();
        }
        if other.path.is_empty() {
            return self.clone();
        }
        Self::new(format!("{}{}{}", self.path, SEPARATOR, other.path))
    }

    /// Checks whether something exists at this path.
    pub fn exists(&self) -> bool {
        std::fs::metadata(&self.path).is_ok()
    }
}

impl From<&str> for PathValue {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for PathValue {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl From<PathValue> for String {
    fn from(path: PathValue) -> Self {
        path.path
    }
}

impl AsRef<Path> for PathValue {
    fn as_ref(&self) -> &Path {
        Path::new(&self.path)
    }
}

impl fmt::Display for PathValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl Add<&PathValue> for &PathValue {
    type Output = PathValue;

    fn add(self, other: &PathValue) -> PathValue {
        self.join(other)
    }
}

impl ParseValue for PathValue {
    fn parse_value(text: &str) -> Result<Self, ConvertError> {
        Ok(Self::new(text))
    }
}
