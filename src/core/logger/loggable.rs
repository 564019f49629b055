// src/core/logger/loggable.rs

use super::LogRecord;
use crate::core::path::PathValue;
use std::collections::VecDeque;
use std::fmt::{self, Write};

/// A value that can be appended to a [`LogRecord`].
///
/// - strings are quoted: `"text"`
/// - numbers, characters, booleans and paths are written as they are
/// - sequences are written as `[a, b, c]`
/// - tuples are written as `{a, b, c}`
/// - [`Space`] and [`NoSpace`] change the spacing of the record
///
/// Types without an implementation are rejected at compile time.
pub trait Loggable {
    /// Writes the textual form of `self` into `out`.
    fn render(&self, out: &mut String);

    /// Adds `self` to `record`. By default the value is rendered and
    /// followed by a space.
    fn apply(&self, record: &mut LogRecord<'_>) {
        record.push_value(self);
    }
}

impl<T: Loggable + ?Sized> Loggable for &T {
    fn render(&self, out: &mut String) {
        (**self).render(out);
    }

    fn apply(&self, record: &mut LogRecord<'_>) {
        (**self).apply(record);
    }
}

// --- Strings ---

impl Loggable for str {
    fn render(&self, out: &mut String) {
        out.push('"');
        out.push_str(self);
        out.push('"');
    }
}

impl Loggable for String {
    fn render(&self, out: &mut String) {
        self.as_str().render(out);
    }
}

// --- Values written as they are ---

macro_rules! impl_loggable_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Loggable for $ty {
                fn render(&self, out: &mut String) {
                    // Writing into a String cannot fail.
                    let _ = write!(out, "{}", self);
                }
            }
        )*
    };
}

impl_loggable_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
    PathValue
);

impl Loggable for fmt::Arguments<'_> {
    fn render(&self, out: &mut String) {
        let _ = out.write_fmt(*self);
    }
}

// --- Sequences ---

fn render_sequence<'a, T, I>(items: I, out: &mut String)
where
    T: Loggable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    out.push('[');
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        item.render(out);
    }
    out.push(']');
}

impl<T: Loggable> Loggable for [T] {
    fn render(&self, out: &mut String) {
        render_sequence(self, out);
    }
}

impl<T: Loggable, const N: usize> Loggable for [T; N] {
    fn render(&self, out: &mut String) {
        render_sequence(self, out);
    }
}

impl<T: Loggable> Loggable for Vec<T> {
    fn render(&self, out: &mut String) {
        render_sequence(self, out);
    }
}

impl<T: Loggable> Loggable for VecDeque<T> {
    fn render(&self, out: &mut String) {
        render_sequence(self, out);
    }
}

// --- Tuples ---

macro_rules! impl_loggable_tuple {
    ($first:ident $(, $rest:ident)*) => {
        impl<$first: Loggable $(, $rest: Loggable)*> Loggable for ($first, $($rest,)*) {
            #[allow(non_snake_case)]
            fn render(&self, out: &mut String) {
                let ($first, $($rest,)*) = self;
                out.push('{');
                $first.render(out);
                $(
                    out.push_str(", ");
                    $rest.render(out);
                )*
                out.push('}');
            }
        }
    };
}

impl_loggable_tuple!(A);
impl_loggable_tuple!(A, B);
impl_loggable_tuple!(A, B, C);
impl_loggable_tuple!(A, B, C, D);
impl_loggable_tuple!(A, B, C, D, E);
impl_loggable_tuple!(A, B, C, D, E, F);

// --- Spacing ---

/// Adds a space and re-enables the space after each value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Space;

/// Stops adding a space after each value.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpace;

impl Loggable for Space {
    fn render(&self, _out: &mut String) {}

    fn apply(&self, record: &mut LogRecord<'_>) {
        record.enable_space();
    }
}

impl Loggable for NoSpace {
    fn render(&self, _out: &mut String) {}

    fn apply(&self, record: &mut LogRecord<'_>) {
        record.disable_space();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered<T: Loggable + ?Sized>(value: &T) -> String {
        let mut out = String::new();
        value.render(&mut out);
        out
    }

    #[test]
    fn test_strings_are_quoted() {
        assert_eq!(rendered("abc"), "\"abc\"");
        assert_eq!(rendered(&"abc".to_string()), "\"abc\"");
    }

    #[test]
    fn test_plain_values() {
        assert_eq!(rendered(&42), "42");
        assert_eq!(rendered(&-1.5f64), "-1.5");
        assert_eq!(rendered(&true), "true");
        assert_eq!(rendered(&'c'), "c");
        assert_eq!(rendered(&PathValue::from("a/b/")), "a/b");

        let formatted = rendered(&format_args!("{}-{}", 1, 2));
        assert_eq!(formatted, "1-2");
    }

    #[test]
    fn test_sequences() {
        assert_eq!(rendered(&vec![1, 2, 3]), "[1, 2, 3]");
        assert_eq!(rendered(&["x", "y"]), "[\"x\", \"y\"]");
        assert_eq!(rendered(&Vec::<u8>::new()), "[]");
        assert_eq!(rendered(&vec![vec![1], vec![2, 3]]), "[[1], [2, 3]]");
        assert_eq!(rendered(&VecDeque::from(vec![4, 5])), "[4, 5]");
    }

    #[test]
    fn test_tuples() {
        assert_eq!(rendered(&(1,)), "{1}");
        assert_eq!(rendered(&(1, "two", 3.5)), "{1, \"two\", 3.5}");
        assert_eq!(rendered(&(vec![1], ('a', false))), "{[1], {a, false}}");
    }

    #[test]
    fn test_spacing_markers_render_nothing() {
        assert_eq!(rendered(&Space), "");
        assert_eq!(rendered(&NoSpace), "");
    }
}
