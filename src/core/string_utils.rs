// src/core/string_utils.rs

use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Cannot convert an empty string to {target}.")]
    Empty { target: &'static str },
    #[error("'{text}' is not a valid {target}.")]
    Invalid { text: String, target: &'static str },
}

/// A value that can be built from its textual form.
///
/// This is the conversion used by the argument parser, the environment
/// accessor and [`parse_array`]. Strings pass through unchanged, booleans
/// accept a lenient set of words and everything else uses the type's
/// [`FromStr`] implementation on the trimmed text.
pub trait ParseValue: Sized {
    /// Converts `text` into `Self`.
    fn parse_value(text: &str) -> Result<Self, ConvertError>;
}

impl ParseValue for String {
    fn parse_value(text: &str) -> Result<Self, ConvertError> {
        Ok(text.to_string())
    }
}

impl ParseValue for PathBuf {
    fn parse_value(text: &str) -> Result<Self, ConvertError> {
        Ok(PathBuf::from(text))
    }
}

impl ParseValue for char {
    fn parse_value(text: &str) -> Result<Self, ConvertError> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            (None, _) => Err(ConvertError::Empty { target: "char" }),
            _ => Err(ConvertError::Invalid {
                text: text.to_string(),
                target: "char",
            }),
        }
    }
}

impl ParseValue for bool {
    /// Accepts `on`/`yes`/`true` and `off`/`no`/`false` in any case.
    /// Any other input must be an integer, where zero is `false`.
    fn parse_value(text: &str) -> Result<Self, ConvertError> {
        let trimmed = text.trim();
        if ["on", "yes", "true"]
            .iter()
            .any(|word| trimmed.eq_ignore_ascii_case(word))
        {
            return Ok(true);
        }
        if ["off", "no", "false"]
            .iter()
            .any(|word| trimmed.eq_ignore_ascii_case(word))
        {
            return Ok(false);
        }

        i64::parse_value(trimmed)
            .map(|n| n != 0)
            .map_err(|_| ConvertError::Invalid {
                text: text.to_string(),
                target: "bool",
            })
    }
}

macro_rules! impl_parse_value_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ParseValue for $ty {
                fn parse_value(text: &str) -> Result<Self, ConvertError> {
                    let trimmed = text.trim();
                    if trimmed.is_empty() {
                        return Err(ConvertError::Empty { target: stringify!($ty) });
                    }
                    <$ty as FromStr>::from_str(trimmed).map_err(|_| ConvertError::Invalid {
                        text: text.to_string(),
                        target: stringify!($ty),
                    })
                }
            }
        )*
    };
}

impl_parse_value_from_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

/// Parses `text` into any [`ParseValue`] type.
pub fn parse<T: ParseValue>(text: &str) -> Result<T, ConvertError> {
    T::parse_value(text)
}

/// Splits `text` at `delimiter` and parses every element.
///
/// An empty input yields an empty list.
pub fn parse_array<T: ParseValue>(text: &str, delimiter: char) -> Result<Vec<T>, ConvertError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(delimiter).map(T::parse_value).collect()
}

// --- Splitting and joining ---

/// Splits `text` at every occurrence of `delimiter`.
pub fn split(text: &str, delimiter: char) -> Vec<String> {
    text.split(delimiter).map(str::to_string).collect()
}

/// Joins `items` with `token` between consecutive elements.
pub fn join<S: AsRef<str>>(items: &[S], token: &str) -> String {
    let mut joined = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            joined.push_str(token);
        }
        joined.push_str(item.as_ref());
    }
    joined
}

// --- Trimming ---
// Whitespace is tested with the ASCII rules so results do not depend on the locale.

/// Removes leading whitespace in place.
pub fn ltrim(s: &mut String) -> &mut String {
    let start = s.len() - s.trim_start_matches(|c: char| c.is_ascii_whitespace()).len();
    s.drain(..start);
    s
}

/// Removes trailing whitespace in place.
pub fn rtrim(s: &mut String) -> &mut String {
    let end = s.trim_end_matches(|c: char| c.is_ascii_whitespace()).len();
    s.truncate(end);
    s
}

/// Removes whitespace from both ends in place.
pub fn trim(s: &mut String) -> &mut String {
    ltrim(rtrim(s))
}

/// Whether `text` begins with `prefix`.
pub fn starts_with(text: &str, prefix: &str) -> bool {
    text.starts_with(prefix)
}

/// Whether `text` ends with `suffix`.
pub fn ends_with(text: &str, suffix: &str) -> bool {
    text.ends_with(suffix)
}

// --- Replacing ---

/// Replaces the first occurrence of `from` with `to`.
/// Returns `false` if `from` does not occur in `s`.
pub fn replace(s: &mut String, from: &str, to: &str) -> bool {
    match s.find(from) {
        Some(pos) => {
            s.replace_range(pos..pos + from.len(), to);
            true
        }
        None => false,
    }
}

/// Replaces the last occurrence of `from` with `to`.
/// Returns `false` if `from` does not occur in `s`.
pub fn replace_last(s: &mut String, from: &str, to: &str) -> bool {
    match s.rfind(from) {
        Some(pos) => {
            s.replace_range(pos..pos + from.len(), to);
            true
        }
        None => false,
    }
}

// --- Padding and case ---

/// Pads `text` on the left with `filler` until it is `width` characters long.
pub fn pad_left(text: &str, width: usize, filler: char) -> String {
    let len = text.chars().count();
    let mut padded: String = std::iter::repeat_n(filler, width.saturating_sub(len)).collect();
    padded.push_str(text);
    padded
}

/// Pads `text` on the right with `filler` until it is `width` characters long.
pub fn pad_right(text: &str, width: usize, filler: char) -> String {
    let len = text.chars().count();
    let mut padded = text.to_string();
    padded.extend(std::iter::repeat_n(filler, width.saturating_sub(len)));
    padded
}

/// Converts `s` to upper case in place.
pub fn to_upper(s: &mut String) -> &mut String {
    s.make_ascii_uppercase();
    s
}

/// Converts `s` to lower case in place.
pub fn to_lower(s: &mut String) -> &mut String {
    s.make_ascii_lowercase();
    s
}
