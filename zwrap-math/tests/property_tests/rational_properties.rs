//! Property-based tests for rational arithmetic

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed};
use proptest::prelude::*;
use zwrap_core::RoundingMode;
use zwrap_math::Rational;

/// Strategy for numerators
fn numer_strategy() -> impl Strategy<Value = i64> {
    -1_000_000i64..1_000_000i64
}

/// Strategy for non-zero denominators
fn denom_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![-1_000_000i64..-1i64, 1i64..1_000_000i64]
}

fn rational_strategy() -> impl Strategy<Value = Rational> {
    (numer_strategy(), denom_strategy())
        .prop_map(|(n, d)| Rational::new(n, d).expect("non-zero denominator"))
}

fn assert_canonical(r: &Rational) -> Result<(), TestCaseError> {
    prop_assert!(r.denominator().is_positive());
    prop_assert!(r.numerator().gcd(r.denominator()).is_one());
    Ok(())
}

#[cfg(test)]
mod canonical_form {
    use super::*;

    proptest! {
        /// Every constructed value is in lowest terms with a positive denominator
        #[test]
        fn construction_is_canonical(n in numer_strategy(), d in denom_strategy()) {
            let r = Rational::new(n, d).expect("non-zero denominator");
            assert_canonical(&r)?;
        }

        /// Arithmetic results stay canonical
        #[test]
        fn arithmetic_is_canonical(a in rational_strategy(), b in rational_strategy()) {
            assert_canonical(&(&a + &b))?;
            assert_canonical(&(&a - &b))?;
            assert_canonical(&(&a * &b))?;
            assert_canonical(&-&a)?;
            if !b.is_zero() {
                assert_canonical(&a.checked_div(&b).expect("non-zero"))?;
            }
        }

        /// Scaling numerator and denominator gives the same value
        #[test]
        fn scaling_preserves_value(n in numer_strategy(), d in denom_strategy(), k in 1i64..1000) {
            let r = Rational::new(n, d).expect("non-zero");
            let scaled = Rational::new(n * k, d * k).expect("non-zero");
            prop_assert_eq!(r, scaled);
        }
    }
}

#[cfg(test)]
mod arithmetic_laws {
    use super::*;

    proptest! {
        /// Addition is commutative
        #[test]
        fn add_commutative(a in rational_strategy(), b in rational_strategy()) {
            prop_assert_eq!(&a + &b, &b + &a);
        }

        /// Subtraction inverts addition
        #[test]
        fn sub_inverts_add(a in rational_strategy(), b in rational_strategy()) {
            prop_assert_eq!(&(&a + &b) - &b, a);
        }

        /// Division inverts multiplication
        #[test]
        fn div_inverts_mul(a in rational_strategy(), b in rational_strategy()) {
            prop_assume!(!b.is_zero());
            let product = &a * &b;
            prop_assert_eq!(product.checked_div(&b).expect("non-zero"), a);
        }

        /// Agrees with num-rational on every operation
        #[test]
        fn matches_big_rational(a in rational_strategy(), b in rational_strategy()) {
            let (x, y) = (BigRational::from(&a), BigRational::from(&b));
            prop_assert_eq!(BigRational::from(&a + &b), &x + &y);
            prop_assert_eq!(BigRational::from(&a * &b), &x * &y);
            prop_assert_eq!(a.cmp(&b), x.cmp(&y));
        }

        /// Ordering is consistent with subtraction
        #[test]
        fn ordering_matches_difference_sign(a in rational_strategy(), b in rational_strategy()) {
            let diff = &a - &b;
            prop_assert_eq!(a.cmp(&b), diff.signum().cmp(&0));
        }
    }
}

#[cfg(test)]
mod rounding_laws {
    use super::*;

    /// Strategy for exact `k + 1/2` midpoints
    fn midpoint_strategy() -> impl Strategy<Value = Rational> {
        (-10_000i64..10_000i64).prop_map(|k| Rational::new(2 * k + 1, 2).expect("non-zero"))
    }

    proptest! {
        /// Ties to even always yields an even integer
        #[test]
        fn to_even_on_midpoints_is_even(m in midpoint_strategy()) {
            prop_assert!(m.round(RoundingMode::ToEven).is_even());
        }

        /// Ties away from zero yields the integer of greater magnitude
        #[test]
        fn away_from_zero_on_midpoints(m in midpoint_strategy()) {
            let rounded = m.round(RoundingMode::AwayFromZero);
            let (floor, ceil) = (m.floor(), m.ceil());
            let expected = if floor.abs() > ceil.abs() { floor } else { ceil };
            prop_assert_eq!(rounded, expected);
        }

        /// Every mode lands within one of the value, between floor and ceil
        #[test]
        fn rounding_within_floor_and_ceil(r in rational_strategy()) {
            let (floor, ceil) = (r.floor(), r.ceil());
            prop_assert!(&ceil - &floor <= BigInt::one());
            for mode in RoundingMode::ALL {
                let rounded = r.round(mode);
                prop_assert!(rounded >= floor && rounded <= ceil);
            }
        }

        /// Every mode lands on a nearest integer, at most one half away
        #[test]
        fn every_mode_is_nearest(r in rational_strategy()) {
            let half = Rational::new(1, 2).expect("non-zero");
            for mode in RoundingMode::ALL {
                let distance = (&Rational::from_integer(r.round(mode)) - &r).abs();
                prop_assert!(distance <= half);
            }
        }

        /// Truncation moves toward zero
        #[test]
        fn trunc_toward_zero(r in rational_strategy()) {
            let t = Rational::from_integer(r.trunc());
            prop_assert!(t.abs() <= r.abs());
        }
    }
}

#[cfg(test)]
mod round_trips {
    use super::*;

    proptest! {
        /// Display output parses back to the same value
        #[test]
        fn display_round_trip(r in rational_strategy()) {
            let text = r.to_string();
            prop_assert_eq!(Rational::parse(&text).expect("round trip"), r);
        }

        /// Decimal output of a terminating value parses back exactly
        #[test]
        fn decimal_round_trip(n in numer_strategy(), scale in 0u32..6) {
            let r = Rational::new(n, BigInt::from(10).pow(scale)).expect("non-zero");
            let text = r.format("D").expect("fits");
            prop_assert_eq!(Rational::parse(&text).expect("round trip"), r);
        }

        /// Parsing never panics on arbitrary input
        #[test]
        fn parse_never_panics(s in "\\PC*") {
            let _ = Rational::try_parse(&s);
        }
    }
}
