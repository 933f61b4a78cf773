//! Field validation rules shared by every bindable record.
//!
//! Validators run when a value is assigned, whether by a setter or while
//! parsing, and return the value on success so setters can chain them.

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt::Display;

/// Checks `min <= value <= max`. Unordered values such as NaN fail.
pub fn ensure_range<T>(field: &'static str, value: T, min: T, max: T) -> Result<T>
where
    T: PartialOrd + Display + Copy,
{
    if !(min <= value && value <= max) {
        return Err(Error::OutOfRange {
            field,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(value)
}

/// Checks `value >= min`. Unordered values such as NaN fail.
pub fn ensure_at_least<T>(field: &'static str, value: T, min: T) -> Result<T>
where
    T: PartialOrd + Display + Copy,
{
    if value.partial_cmp(&min).map_or(true, Ordering::is_lt) {
        return Err(Error::OutOfRange {
            field,
            value: value.to_string(),
            min: min.to_string(),
            max: "unbounded".to_string(),
        });
    }
    Ok(value)
}

/// Range check for an optional component; `None` always passes.
pub fn ensure_optional_range<T>(
    field: &'static str,
    value: Option<T>,
    min: T,
    max: T,
) -> Result<Option<T>>
where
    T: PartialOrd + Display + Copy,
{
    value.map(|v| ensure_range(field, v, min, max)).transpose()
}

/// How strictly a string field rejects blank input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPolicy {
    /// Any string, including the empty string.
    NotNull,
    /// At least one character.
    NotEmpty,
    /// At least one non-whitespace character.
    NotWhitespace,
}

pub fn ensure_text(field: &'static str, value: String, policy: TextPolicy) -> Result<String> {
    match policy {
        TextPolicy::NotNull => {}
        TextPolicy::NotEmpty if value.is_empty() => {
            return Err(Error::InvalidArgument {
                field,
                reason: "must not be empty",
            });
        }
        TextPolicy::NotWhitespace if value.trim().is_empty() => {
            return Err(Error::InvalidArgument {
                field,
                reason: "must not be empty or whitespace",
            });
        }
        _ => {}
    }
    Ok(value)
}

pub fn ensure_optional_text(
    field: &'static str,
    value: Option<String>,
    policy: TextPolicy,
) -> Result<Option<String>> {
    value.map(|v| ensure_text(field, v, policy)).transpose()
}
