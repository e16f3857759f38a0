//! Rounding to integers.
//!
//! All modes work from the floor quotient and its non-negative remainder, so
//! the midpoint test is the exact comparison `2 * remainder` vs `denominator`.

use super::Rational;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use zwrap_core::{Config, RoundingMode};

impl Rational {
    /// Round to the nearest integer. `mode` only decides exact midpoints.
    #[must_use]
    pub fn round(&self, mode: RoundingMode) -> BigInt {
        if self.is_integer() {
            return self.numer.clone();
        }

        let (floor, remainder) = self.numer.div_mod_floor(&self.denom);
        debug_assert!(!remainder.is_zero());
        let ceil = &floor + BigInt::one();

        match (&remainder + &remainder).cmp(&self.denom) {
            Ordering::Less => floor,
            Ordering::Greater => ceil,
            Ordering::Equal => match mode {
                RoundingMode::ToEven => {
                    if floor.is_even() {
                        floor
                    } else {
                        ceil
                    }
                }
                RoundingMode::AwayFromZero => {
                    if self.numer.is_negative() {
                        floor
                    } else {
                        ceil
                    }
                }
                RoundingMode::ToZero => {
                    if self.numer.is_negative() {
                        ceil
                    } else {
                        floor
                    }
                }
                RoundingMode::ToPositiveInfinity => ceil,
                RoundingMode::ToNegativeInfinity => floor,
            },
        }
    }

    /// Round using the configured default mode.
    #[must_use]
    pub fn round_with(&self, config: &Config) -> BigInt {
        self.round(config.rounding)
    }

    /// Largest integer not greater than this value.
    #[must_use]
    pub fn floor(&self) -> BigInt {
        self.numer.div_floor(&self.denom)
    }

    /// Smallest integer not less than this value.
    #[must_use]
    pub fn ceil(&self) -> BigInt {
        let (floor, remainder) = self.numer.div_mod_floor(&self.denom);
        if remainder.is_zero() {
            floor
        } else {
            floor + BigInt::one()
        }
    }

    /// Integer part, dropping the fraction.
    #[must_use]
    pub fn trunc(&self) -> BigInt {
        &self.numer / &self.denom
    }
}
