//! Value parsing helpers for console prompts.
//!
//! Every helper maps a blank line to `None`. What `None` means is decided at
//! the call site: "exit" at the menu, "leave empty" on create, "keep the
//! current value" on update.

use crate::model::project::Hours;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Malformed numeric text typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    InvalidInteger(String),
    InvalidDecimal(String),
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInteger(text) => write!(f, "{text} is not a valid number"),
            Self::InvalidDecimal(text) => write!(f, "{text} is not a valid decimal number"),
        }
    }
}

impl Error for InputError {}

/// Returns the trimmed text, or `None` when it is blank.
pub fn parse_optional_string(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parses an optional integer of any width.
///
/// # Errors
/// - `InvalidInteger` when the text is non-blank and not an integer.
pub fn parse_optional_integer<T: FromStr>(text: &str) -> Result<Option<T>, InputError> {
    parse_optional_string(text)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|_| InputError::InvalidInteger(value))
        })
        .transpose()
}

/// Parses an optional decimal normalized to two fraction digits.
///
/// # Errors
/// - `InvalidDecimal` when the text is non-blank and not a decimal.
pub fn parse_optional_decimal(text: &str) -> Result<Option<Hours>, InputError> {
    parse_optional_string(text)
        .map(|value| {
            value
                .parse::<Hours>()
                .map_err(|_| InputError::InvalidDecimal(value))
        })
        .transpose()
}
