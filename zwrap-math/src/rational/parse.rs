//! Parsing and formatting of rationals.
//!
//! Accepted input forms (surrounding whitespace is ignored):
//! - integer: `42`, `-7`, `+3`
//! - fraction: `22/7`, `-1 / 3` (sign on the numerator only)
//! - decimal: `1.25`, `-0.5`, `.5`, `3.` (exactly one decimal point)

use super::Rational;
use num_bigint::BigInt;
use num_traits::Zero;
use std::fmt;
use std::str::FromStr;
use zwrap_core::{Config, Result, ValueError};

/// Output form for [`Rational::format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RationalFormat {
    /// `N` or `N/D`.
    #[default]
    Fraction,
    /// Decimal expansion via the fixed-point decimal type.
    Decimal,
}

impl FromStr for RationalFormat {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "" | "F" | "FRACTION" | "G" | "GENERAL" => Ok(RationalFormat::Fraction),
            "D" | "DECIMAL" => Ok(RationalFormat::Decimal),
            _ => Err(ValueError::format_error(format!(
                "Invalid format string: {}",
                s
            ))),
        }
    }
}

impl Rational {
    /// Parse an integer, fraction or decimal string.
    pub fn parse(input: &str) -> Result<Self> {
        let result = parse_rational(input);
        if let Err(err) = &result {
            tracing::debug!(input, error = %err, "rational parse failed");
        }
        result
    }

    /// Parse, returning `None` instead of an error.
    pub fn try_parse(input: &str) -> Option<Self> {
        parse_rational(input).ok()
    }

    /// Render with a format specifier (see [`RationalFormat`]).
    pub fn format(&self, spec: &str) -> Result<String> {
        self.format_with(spec, &Config::default())
    }

    /// Render with a format specifier, honouring `config.decimal_places`.
    pub fn format_with(&self, spec: &str, config: &Config) -> Result<String> {
        match spec.parse::<RationalFormat>()? {
            RationalFormat::Fraction => Ok(self.to_string()),
            RationalFormat::Decimal => self.to_decimal_string(config),
        }
    }

    fn to_decimal_string(&self, config: &Config) -> Result<String> {
        config.validate()?;
        let mut value = self.to_decimal()?;
        if let Some(places) = config.decimal_places {
            value = value.round_dp(places);
        }
        Ok(value.normalize().to_string())
    }
}

fn parse_rational(input: &str) -> Result<Rational> {
    let value = input.trim();
    if value.is_empty() {
        return Err(ValueError::format_error(
            "Input string must not be null or empty",
        ));
    }

    if let Some((num_str, den_str)) = value.split_once('/') {
        let num_str = num_str.trim();
        let den_str = den_str.trim();
        let numer = parse_signed(num_str)
            .ok_or_else(|| ValueError::format_error(format!("Invalid numerator: {}", num_str)))?;
        let denom = parse_digits(den_str).ok_or_else(|| {
            ValueError::format_error(format!("Invalid denominator: {}", den_str))
        })?;
        if denom.is_zero() {
            return Err(ValueError::format_error(format!(
                "Invalid fraction: {}",
                value
            )));
        }
        return Ok(Rational::normalized(numer, denom));
    }

    if value.contains('.') {
        return parse_decimal(value)
            .ok_or_else(|| ValueError::format_error(format!("Invalid decimal format: {}", value)));
    }

    parse_signed(value)
        .map(Rational::from_integer)
        .ok_or_else(|| ValueError::format_error(format!("Invalid integer format: {}", value)))
}

/// Split an optional leading sign off `s`.
fn split_sign(s: &str) -> (bool, &str) {
    match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    }
}

/// Non-empty run of ASCII digits.
fn parse_digits(s: &str) -> Option<BigInt> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigInt::parse_bytes(s.as_bytes(), 10)
}

fn parse_signed(s: &str) -> Option<BigInt> {
    let (negative, digits) = split_sign(s);
    let magnitude = parse_digits(digits)?;
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_decimal(s: &str) -> Option<Rational> {
    let (negative, body) = split_sign(s);
    let (int_part, frac_part) = body.split_once('.')?;
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    let digits = format!("{}{}", int_part, frac_part);
    let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10)?;
    let numer = if negative { -magnitude } else { magnitude };
    let scale = u32::try_from(frac_part.len()).ok()?;
    Some(Rational::normalized(numer, BigInt::from(10u32).pow(scale)))
}

impl FromStr for Rational {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self> {
        Rational::parse(s)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}
