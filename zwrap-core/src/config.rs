//! Configuration for value formatting and rounding.
//!
//! The value types are stateless; the settings here only pick defaults for
//! operations that take an explicit mode (rounding) or have more than one
//! accepted rendering (hex padding, decimal places).

use crate::error::{Result, ValueError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest number of fractional digits the decimal type can carry.
pub const MAX_DECIMAL_PLACES: u32 = 28;

/// Rounding discipline for rational-to-integer rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoundingMode {
    /// Nearest integer, ties to the even neighbour (banker's rounding).
    #[default]
    ToEven,
    /// Nearest integer, ties away from zero.
    AwayFromZero,
    /// Truncation.
    ToZero,
    /// Ceiling.
    ToPositiveInfinity,
    /// Floor.
    ToNegativeInfinity,
}

impl RoundingMode {
    /// All modes, in declaration order.
    pub const ALL: [RoundingMode; 5] = [
        RoundingMode::ToEven,
        RoundingMode::AwayFromZero,
        RoundingMode::ToZero,
        RoundingMode::ToPositiveInfinity,
        RoundingMode::ToNegativeInfinity,
    ];

    /// Name of the mode as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            RoundingMode::ToEven => "ToEven",
            RoundingMode::AwayFromZero => "AwayFromZero",
            RoundingMode::ToZero => "ToZero",
            RoundingMode::ToPositiveInfinity => "ToPositiveInfinity",
            RoundingMode::ToNegativeInfinity => "ToNegativeInfinity",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoundingMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self> {
        RoundingMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValueError::format_error(format!("Invalid rounding mode: {}", s)))
    }
}

/// Digit padding for hexadecimal bit-vector rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HexPadding {
    /// Always `ceil(width / 4)` digits.
    #[default]
    Full,
    /// Leading zeros trimmed, at least one digit.
    Trimmed,
}

/// Formatting and rounding defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rounding mode used by `round_with`.
    pub rounding: RoundingMode,
    /// Hex digit padding used by `format_with`.
    pub hex_padding: HexPadding,
    /// Fractional digits kept by decimal rendering; `None` keeps the full precision.
    pub decimal_places: Option<u32>,
}

impl Config {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rounding mode.
    #[must_use]
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Set the hex padding.
    #[must_use]
    pub fn with_hex_padding(mut self, hex_padding: HexPadding) -> Self {
        self.hex_padding = hex_padding;
        self
    }

    /// Set the number of decimal places.
    #[must_use]
    pub fn with_decimal_places(mut self, places: u32) -> Self {
        self.decimal_places = Some(places);
        self
    }

    /// Check that every setting is within range.
    pub fn validate(&self) -> Result<()> {
        if let Some(places) = self.decimal_places
            && places > MAX_DECIMAL_PLACES
        {
            tracing::debug!(places, max = MAX_DECIMAL_PLACES, "rejecting decimal places");
            return Err(ValueError::invalid_argument(format!(
                "Decimal places {} exceeds maximum {}",
                places, MAX_DECIMAL_PLACES
            )));
        }
        Ok(())
    }
}
