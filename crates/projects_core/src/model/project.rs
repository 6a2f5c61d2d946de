//! Project domain model.
//!
//! # Responsibility
//! - Define the project record and its store-side validation.
//! - Define `Hours`, a decimal normalized to exactly two fraction digits.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes afterwards.
//! - A persisted project always has a non-blank `name`.
//! - `Hours` never carries more than two fraction digits.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Store-assigned project identifier.
pub type ProjectId = i64;

const HUNDREDTHS_PER_UNIT: i64 = 100;

static DECIMAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<sign>[+-])?(?P<whole>[0-9]*)(?:\.(?P<fraction>[0-9]*))?$")
        .expect("valid decimal regex")
});

/// Decimal hour count with exactly two fraction digits.
///
/// Stored as a signed count of hundredths so equality and persistence are
/// exact. Serialized as its canonical text form (`"12.50"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hours(i64);

impl Hours {
    /// Builds a value from a raw hundredths count (`1250` is `12.50`).
    pub const fn from_hundredths(hundredths: i64) -> Self {
        Self(hundredths)
    }

    pub const fn hundredths(self) -> i64 {
        self.0
    }
}

impl Display for Hours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let unit = HUNDREDTHS_PER_UNIT.unsigned_abs();
        write!(f, "{sign}{}.{:02}", magnitude / unit, magnitude % unit)
    }
}

/// Error returned when text cannot be read as `Hours`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseHoursError {
    input: String,
}

impl Display for ParseHoursError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` is not a valid decimal number", self.input)
    }
}

impl Error for ParseHoursError {}

impl FromStr for Hours {
    type Err = ParseHoursError;

    /// Parses `[+-]digits[.digits]` or `[+-].digits`.
    ///
    /// Fraction digits beyond the second are rounded half away from zero.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseHoursError {
            input: value.to_string(),
        };

        let captures = DECIMAL_RE.captures(value).ok_or_else(invalid)?;
        let negative = captures.name("sign").is_some_and(|sign| sign.as_str() == "-");
        let whole_text = captures.name("whole").map_or("", |m| m.as_str());
        let fraction_text = captures.name("fraction").map_or("", |m| m.as_str());

        if whole_text.is_empty() && fraction_text.is_empty() {
            return Err(invalid());
        }

        let whole = if whole_text.is_empty() {
            0
        } else {
            whole_text.parse::<i64>().map_err(|_| invalid())?
        };

        let mut digits = fraction_text.bytes().map(|b| i64::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().is_some_and(|digit| digit >= 5);

        let magnitude = whole
            .checked_mul(HUNDREDTHS_PER_UNIT)
            .and_then(|value| value.checked_add(tenths * 10 + hundredths))
            .and_then(|value| value.checked_add(i64::from(round_up)))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -magnitude } else { magnitude }))
    }
}

impl TryFrom<String> for Hours {
    type Error = ParseHoursError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Hours> for String {
    fn from(value: Hours) -> Self {
        value.to_string()
    }
}

/// Validation failures for the store-side project invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    /// `name` is absent or blank after trimming.
    MissingName,
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingName => write!(f, "project name is required"),
        }
    }
}

impl Error for ProjectValidationError {}

/// One project record.
///
/// Every field except `id` is optional at this level. Required-ness of
/// `name` is checked by `validate()` at the store boundary, so the console
/// can hand over exactly what the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Assigned by the store on creation; `None` for unsaved records.
    pub id: Option<ProjectId>,
    pub name: Option<String>,
    pub estimated_hours: Option<Hours>,
    pub actual_hours: Option<Hours>,
    /// Intended range is 1-5. Not enforced.
    pub difficulty: Option<i32>,
    pub notes: Option<String>,
}

impl Project {
    /// Creates an unsaved project with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Returns a copy carrying the given store id.
    pub fn with_id(mut self, id: ProjectId) -> Self {
        self.id = Some(id);
        self
    }

    /// Checks invariants that must hold for persisted projects.
    ///
    /// # Errors
    /// - `MissingName` when `name` is `None` or whitespace only.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => Ok(()),
            _ => Err(ProjectValidationError::MissingName),
        }
    }
}

impl Display for Project {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "   ID={}", display_or_null(self.id.as_ref()))?;
        writeln!(f, "   name={}", display_or_null(self.name.as_ref()))?;
        writeln!(
            f,
            "   estimatedHours={}",
            display_or_null(self.estimated_hours.as_ref())
        )?;
        writeln!(
            f,
            "   actualHours={}",
            display_or_null(self.actual_hours.as_ref())
        )?;
        writeln!(f, "   difficulty={}", display_or_null(self.difficulty.as_ref()))?;
        write!(f, "   notes={}", display_or_null(self.notes.as_ref()))
    }
}

fn display_or_null<T: Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "null".to_string(), ToString::to_string)
}
