//! Conversions between [`Rational`] and fixed-width numeric types.

use super::Rational;
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use rust_decimal::Decimal;
use zwrap_core::{Result, ValueError};

/// Bits in the mantissa of [`Decimal`].
const DECIMAL_MANTISSA_BITS: u64 = 96;

impl Rational {
    /// Exact conversion from a fixed-point decimal: `mantissa / 10^scale`.
    pub fn from_decimal(value: Decimal) -> Self {
        let numer = BigInt::from(value.mantissa());
        let denom = BigInt::from(10u32).pow(value.scale());
        Rational::normalized(numer, denom)
    }

    /// The integer value. Fails with `NotAnInteger` if the denominator is not one.
    pub fn to_bigint(&self) -> Result<BigInt> {
        self.expect_integer("BigInteger")?;
        Ok(self.numer.clone())
    }

    /// Convert to `i32`.
    pub fn to_i32(&self) -> Result<i32> {
        self.expect_integer("int")?;
        self.numer.to_i32().ok_or_else(|| self.out_of_range("int"))
    }

    /// Convert to `i64`.
    pub fn to_i64(&self) -> Result<i64> {
        self.expect_integer("long")?;
        self.numer.to_i64().ok_or_else(|| self.out_of_range("long"))
    }

    /// Convert to a fixed-point decimal (96-bit mantissa, scale at most 28).
    ///
    /// Integers convert exactly. Otherwise both parts must be representable
    /// as decimals and the quotient is computed in decimal arithmetic, which
    /// is exact whenever the expansion terminates within 28 digits.
    pub fn to_decimal(&self) -> Result<Decimal> {
        let numer = decimal_from_bigint(&self.numer)?;
        if self.is_integer() {
            return Ok(numer);
        }
        let denom = decimal_from_bigint(&self.denom)?;
        numer.checked_div(denom).ok_or_else(|| {
            tracing::debug!(value = %self, "decimal quotient out of range");
            ValueError::overflow(format!("Value {} is outside the range of decimal", self))
        })
    }

    fn expect_integer(&self, target: &str) -> Result<()> {
        if self.is_integer() {
            Ok(())
        } else {
            Err(ValueError::not_an_integer(format!(
                "Cannot convert non-integer value to {}",
                target
            )))
        }
    }

    fn out_of_range(&self, target: &str) -> ValueError {
        tracing::debug!(value = %self, to = target, "integer conversion out of range");
        ValueError::overflow(format!("Value {} is outside the range of {}", self, target))
    }
}

fn decimal_from_bigint(value: &BigInt) -> Result<Decimal> {
    let overflow = || {
        tracing::debug!(%value, "integer part exceeds decimal mantissa");
        ValueError::overflow(format!("Value {} is outside the range of decimal", value))
    };

    if value.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if value.bits() > DECIMAL_MANTISSA_BITS {
        return Err(overflow());
    }
    let mantissa = value.to_i128().ok_or_else(overflow)?;
    Decimal::try_from_i128_with_scale(mantissa, 0).map_err(|_| overflow())
}

impl From<Decimal> for Rational {
    fn from(value: Decimal) -> Self {
        Rational::from_decimal(value)
    }
}

impl TryFrom<&Rational> for Decimal {
    type Error = ValueError;

    fn try_from(value: &Rational) -> Result<Self> {
        value.to_decimal()
    }
}
