//! Exact Rational Numbers.
//!
//! [`Rational`] is a numerator/denominator pair over [`BigInt`] kept in
//! canonical form at all times:
//! - the denominator is strictly positive, the sign lives on the numerator
//! - `gcd(|numerator|, denominator) == 1`, and zero is always `0/1`
//!
//! Because the form is canonical, structural equality and hashing coincide
//! with numeric equality. Every constructor and every arithmetic result goes
//! through the same normalization step; nothing trusts caller-supplied parts.
//!
//! Ordering uses cross multiplication (`a/b < c/d` iff `a*d < c*b`), which is
//! exact because both denominators are positive.

mod convert;
mod parse;
mod rounding;

pub use parse::RationalFormat;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use std::ops::{Add, Mul, Neg, Sub};
use zwrap_core::{Result, ValueError};

/// An exact rational number in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rational {
    numer: BigInt,
    denom: BigInt,
}

impl Rational {
    /// Create `numerator / denominator`, reduced to lowest terms.
    ///
    /// Fails with `DivisionByZero` when the denominator is zero.
    pub fn new(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> Result<Self> {
        let denom = denominator.into();
        if denom.is_zero() {
            return Err(ValueError::DivisionByZero(
                "Denominator must be non-zero".to_string(),
            ));
        }
        Ok(Self::normalized(numerator.into(), denom))
    }

    /// Create the rational `value / 1`.
    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self {
            numer: value.into(),
            denom: BigInt::one(),
        }
    }

    /// Sign-fix and reduce. `denom` must be non-zero.
    pub(crate) fn normalized(mut numer: BigInt, mut denom: BigInt) -> Self {
        debug_assert!(!denom.is_zero());
        if denom.is_negative() {
            numer = -numer;
            denom = -denom;
        }
        let gcd = numer.gcd(&denom);
        if !gcd.is_one() {
            numer /= &gcd;
            denom /= &gcd;
        }
        Self { numer, denom }
    }

    /// The rational zero.
    pub fn zero() -> Self {
        Self::from_integer(0)
    }

    /// The rational one.
    pub fn one() -> Self {
        Self::from_integer(1)
    }

    /// The rational minus one.
    pub fn minus_one() -> Self {
        Self::from_integer(-1)
    }

    /// Numerator (carries the sign).
    #[must_use]
    pub fn numerator(&self) -> &BigInt {
        &self.numer
    }

    /// Denominator (always positive).
    #[must_use]
    pub fn denominator(&self) -> &BigInt {
        &self.denom
    }

    /// Decompose into `(numerator, denominator)`.
    #[must_use]
    pub fn into_parts(self) -> (BigInt, BigInt) {
        (self.numer, self.denom)
    }

    /// Whether the denominator is one.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.denom.is_one()
    }

    /// Whether this is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    /// Whether this is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.numer.is_positive()
    }

    /// Whether this is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.numer.is_negative()
    }

    /// -1, 0 or 1.
    #[must_use]
    pub fn signum(&self) -> i32 {
        match self.numer.sign() {
            num_bigint::Sign::Minus => -1,
            num_bigint::Sign::NoSign => 0,
            num_bigint::Sign::Plus => 1,
        }
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            numer: self.numer.abs(),
            denom: self.denom.clone(),
        }
    }

    /// Multiplicative inverse. Fails with `DivisionByZero` on zero.
    pub fn reciprocal(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(ValueError::division_by_zero());
        }
        Ok(Self::normalized(self.denom.clone(), self.numer.clone()))
    }

    /// Exact division. Fails with `DivisionByZero` when `other` is zero.
    pub fn checked_div(&self, other: &Rational) -> Result<Self> {
        if other.is_zero() {
            return Err(ValueError::division_by_zero());
        }
        Ok(Self::normalized(
            &self.numer * &other.denom,
            &self.denom * &other.numer,
        ))
    }

    /// Integer power. A zero exponent yields one; a negative exponent is the
    /// reciprocal of the positive power, so `0^-k` fails with `DivisionByZero`.
    pub fn pow(&self, exponent: i32) -> Result<Self> {
        if exponent == 0 {
            return Ok(Self::one());
        }
        let base = if exponent < 0 {
            self.reciprocal()?
        } else {
            self.clone()
        };
        let e = exponent.unsigned_abs();
        Ok(Self::normalized(base.numer.pow(e), base.denom.pow(e)))
    }

    /// The smaller of two values.
    #[must_use]
    pub fn min_of(left: &Rational, right: &Rational) -> Rational {
        if left <= right {
            left.clone()
        } else {
            right.clone()
        }
    }

    /// The larger of two values.
    #[must_use]
    pub fn max_of(left: &Rational, right: &Rational) -> Rational {
        if left >= right {
            left.clone()
        } else {
            right.clone()
        }
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::zero()
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.numer * &other.denom).cmp(&(&other.numer * &self.denom))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add<&Rational> for &Rational {
    type Output = Rational;

    fn add(self, rhs: &Rational) -> Rational {
        Rational::normalized(
            &self.numer * &rhs.denom + &rhs.numer * &self.denom,
            &self.denom * &rhs.denom,
        )
    }
}

impl Sub<&Rational> for &Rational {
    type Output = Rational;

    fn sub(self, rhs: &Rational) -> Rational {
        Rational::normalized(
            &self.numer * &rhs.denom - &rhs.numer * &self.denom,
            &self.denom * &rhs.denom,
        )
    }
}

impl Mul<&Rational> for &Rational {
    type Output = Rational;

    fn mul(self, rhs: &Rational) -> Rational {
        Rational::normalized(&self.numer * &rhs.numer, &self.denom * &rhs.denom)
    }
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident) => {
        impl $imp<Rational> for Rational {
            type Output = Rational;

            fn $method(self, rhs: Rational) -> Rational {
                (&self).$method(&rhs)
            }
        }

        impl $imp<&Rational> for Rational {
            type Output = Rational;

            fn $method(self, rhs: &Rational) -> Rational {
                (&self).$method(rhs)
            }
        }

        impl $imp<Rational> for &Rational {
            type Output = Rational;

            fn $method(self, rhs: Rational) -> Rational {
                self.$method(&rhs)
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational {
            numer: -&self.numer,
            denom: self.denom.clone(),
        }
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational {
            numer: -self.numer,
            denom: self.denom,
        }
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Rational {
                fn from(value: $t) -> Self {
                    Rational::from_integer(value)
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, BigInt);

/// A raw `BigRational` with a zero denominator (only reachable through
/// `BigRational::new_raw`) converts to zero.
impl From<BigRational> for Rational {
    fn from(value: BigRational) -> Self {
        let (numer, denom) = value.into_raw();
        if denom.is_zero() {
            return Rational::zero();
        }
        Rational::normalized(numer, denom)
    }
}

impl From<Rational> for BigRational {
    fn from(value: Rational) -> Self {
        BigRational::new_raw(value.numer, value.denom)
    }
}

impl From<&Rational> for BigRational {
    fn from(value: &Rational) -> Self {
        BigRational::new_raw(value.numer.clone(), value.denom.clone())
    }
}
