//! Validated numeric input and the decimal rounding/formatting policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::error::ValidationError;

/// A finite, strictly positive real number entered by the user.
///
/// Amounts and rates are only ever constructed through [`PositiveAmount::parse`]
/// or [`PositiveAmount::new`], so a value of this type is always safe to divide by.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "f64", into = "f64")]
#[schema(value_type = f64, example = 1050.5)]
pub struct PositiveAmount(f64);

impl PositiveAmount {
    /// Wraps a raw value, rejecting non-finite and non-positive numbers.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite);
        }
        if value <= 0.0 {
            return Err(ValidationError::NotPositive(value));
        }
        Ok(Self(value))
    }

    /// Parses free-form chat input.
    ///
    /// Surrounding and internal whitespace is dropped and every comma is read
    /// as a decimal separator, so `"1 050,5"` and `"1050.5"` are the same value.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let normalized: String = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| if c == ',' { '.' } else { c })
            .collect();

        if normalized.is_empty() {
            return Err(ValidationError::Empty);
        }

        let value: f64 = normalized
            .parse()
            .map_err(|_| ValidationError::NotANumber(text.trim().to_string()))?;

        Self::new(value)
    }

    pub fn get(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for PositiveAmount {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PositiveAmount> for f64 {
    fn from(amount: PositiveAmount) -> Self {
        amount.0
    }
}

impl fmt::Display for PositiveAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_decimal(self.0, 4))
    }
}

/// Rounds `value` to `places` decimal places.
///
/// Rounding is done on the exact binary value with ties to even, by rendering
/// the value with `places` decimals and reading it back.
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}

/// Renders `value` with `places` decimals, then strips trailing zeros and a
/// dangling decimal point: `1050.5000` becomes `1050.5`, `10.0000` becomes `10`.
pub fn format_decimal(value: f64, places: usize) -> String {
    let rendered = format!("{value:.places$}");
    if rendered.contains('.') {
        rendered
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        rendered
    }
}
