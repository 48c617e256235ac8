//! Small parsing and formatting helpers shared by the probe and the monitor.

use std::fmt;
use std::str::FromStr;

/// Outcome of a lenient parse: either the parsed value or the fallback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Parsed<T> {
    /// The input parsed successfully.
    Value(T),
    /// The input was absent or malformed and the default was used.
    Defaulted(T),
}

impl<T> Parsed<T> {
    /// Returns the contained value regardless of where it came from.
    pub fn into_inner(self) -> T {
        match self {
            Parsed::Value(v) | Parsed::Defaulted(v) => v,
        }
    }

    #[must_use]
    pub fn is_defaulted(&self) -> bool {
        matches!(self, Parsed::Defaulted(_))
    }
}

/// Parses `raw` with `parse`, falling back to `default` when it yields `None`.
pub fn parse_or_default<T, F>(raw: &str, default: T, parse: F) -> Parsed<T>
where
    F: FnOnce(&str) -> Option<T>,
{
    match parse(raw) {
        Some(v) => Parsed::Value(v),
        None => Parsed::Defaulted(default),
    }
}

/// Parses a trimmed string with [`FromStr`], discarding the error.
pub fn parse_trimmed<T: FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse::<T>().ok()
}

/// Quotes a value for safe use on the right-hand side of a shell assignment.
///
/// The value is wrapped in single quotes; embedded single quotes become
/// `'"'"'` (close quote, double-quoted quote, reopen quote).
#[must_use]
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\"'\"'"))
}

/// Formats a float in shortest round-trip form, always with a decimal point
/// (`30.0`, not `30`).
pub struct FloatDisplay(pub f64);

impl fmt::Display for FloatDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
