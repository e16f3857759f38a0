//! Property-based tests for bit-vector operations

use num_bigint::{BigInt, BigUint};
use num_traits::One;
use proptest::prelude::*;
use zwrap_math::{BitVector, Bv, Endianness};

/// Strategy for widths, biased toward small and byte-aligned ones
fn width_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![1u32..=16, Just(32u32), Just(64u32), 65u32..=130]
}

/// Strategy for a vector and a second vector of the same width
fn pair_strategy() -> impl Strategy<Value = (BitVector, BitVector)> {
    width_strategy().prop_flat_map(|w| {
        (any::<u128>(), any::<u128>()).prop_map(move |(a, b)| {
            (
                BitVector::new(a, w).expect("valid width"),
                BitVector::new(b, w).expect("valid width"),
            )
        })
    })
}

/// Strategy for a vector of width >= 2 and a split point strictly inside it
fn split_strategy() -> impl Strategy<Value = (BitVector, u32)> {
    (2u32..=130).prop_flat_map(|w| {
        (any::<u128>(), 1..w)
            .prop_map(move |(v, split)| (BitVector::new(v, w).expect("valid width"), split))
    })
}

fn modulus(width: u32) -> BigUint {
    BigUint::one() << width
}

#[cfg(test)]
mod modular_closure {
    use super::*;

    proptest! {
        /// Addition agrees with integer addition mod 2^N
        #[test]
        fn add_is_modular((a, b) in pair_strategy()) {
            let sum = a.checked_add(&b).expect("same width");
            prop_assert_eq!(sum.value(), &((a.value() + b.value()) % modulus(a.width())));
        }

        /// Multiplication agrees with integer multiplication mod 2^N
        #[test]
        fn mul_is_modular((a, b) in pair_strategy()) {
            let product = a.checked_mul(&b).expect("same width");
            prop_assert_eq!(product.value(), &((a.value() * b.value()) % modulus(a.width())));
        }

        /// a - b + b == a
        #[test]
        fn sub_inverts_add((a, b) in pair_strategy()) {
            let back = a.checked_sub(&b).and_then(|d| d.checked_add(&b)).expect("same width");
            prop_assert_eq!(back, a);
        }

        /// Negation is subtraction from zero
        #[test]
        fn neg_is_zero_minus((a, _b) in pair_strategy()) {
            let zero = BitVector::zero(a.width()).expect("valid");
            prop_assert_eq!(a.wrapping_neg(), zero.checked_sub(&a).expect("same width"));
        }

        /// Complement is all-ones XOR
        #[test]
        fn complement_is_xor_ones((a, _b) in pair_strategy()) {
            let ones = BitVector::max(a.width()).expect("valid");
            prop_assert_eq!(a.complement(), a.checked_xor(&ones).expect("same width"));
        }
    }
}

#[cfg(test)]
mod signed_semantics {
    use super::*;

    proptest! {
        /// With the MSB set, signed == unsigned - 2^N; otherwise they agree
        #[test]
        fn signed_reinterpretation((a, _b) in pair_strategy()) {
            let unsigned = a.to_bigint(false);
            let signed = a.to_bigint(true);
            if a.is_negative() {
                prop_assert_eq!(signed, unsigned - BigInt::from(modulus(a.width())));
            } else {
                prop_assert_eq!(signed, unsigned);
            }
        }

        /// Signed division and remainder recombine to the dividend
        #[test]
        fn sdiv_srem_recombine((a, b) in pair_strategy()) {
            prop_assume!(!b.is_zero());
            let q = a.div(&b, true).expect("non-zero");
            let r = a.rem(&b, true).expect("non-zero");
            let back = q.checked_mul(&b).and_then(|p| p.checked_add(&r)).expect("same width");
            prop_assert_eq!(back, a);
        }

        /// Unsigned division and remainder recombine to the dividend
        #[test]
        fn udiv_urem_recombine((a, b) in pair_strategy()) {
            prop_assume!(!b.is_zero());
            let q = a.div(&b, false).expect("non-zero");
            let r = a.rem(&b, false).expect("non-zero");
            prop_assert!(r.value() < b.value());
            let back = q.checked_mul(&b).and_then(|p| p.checked_add(&r)).expect("same width");
            prop_assert_eq!(back, a);
        }

        /// smod is zero or shares the divisor's sign
        #[test]
        fn smod_sign_follows_divisor((a, b) in pair_strategy()) {
            prop_assume!(!b.is_zero());
            let m = a.smod(&b).expect("non-zero");
            prop_assert!(m.is_zero() || m.is_negative() == b.is_negative());
        }

        /// Signed comparison agrees with the signed integer reading
        #[test]
        fn signed_compare_matches_integers((a, b) in pair_strategy()) {
            let expected = a.to_bigint(true).cmp(&b.to_bigint(true));
            prop_assert_eq!(a.compare(&b, true).expect("same width"), expected);
        }

        /// Arithmetic shift right matches floor division by 2^k
        #[test]
        fn ashr_is_floor_division((a, _b) in pair_strategy(), k in 0i64..20) {
            let shifted = a.shr(k, true).expect("non-negative");
            let expected = a.to_bigint(true) >> (k as usize);
            prop_assert_eq!(shifted.to_bigint(true), expected);
        }
    }
}

#[cfg(test)]
mod width_changes {
    use super::*;

    proptest! {
        /// Sign extension preserves the signed value; zero extension the unsigned one
        #[test]
        fn extension_preserves_value((a, _b) in pair_strategy(), extra in 0u32..40) {
            let wide = a.width() + extra;
            prop_assert_eq!(a.resize(wide, true).expect("valid").to_bigint(true), a.to_bigint(true));
            prop_assert_eq!(a.resize(wide, false).expect("valid").to_bigint(false), a.to_bigint(false));
        }

        /// Splitting and concatenating restores the vector
        #[test]
        fn extract_concat_round_trip((a, split) in split_strategy()) {
            let low = a.extract(0, split).expect("in range");
            let high = a.extract(split, a.width() - split).expect("in range");
            prop_assert_eq!(high.concat(&low, a.width()).expect("sum matches"), a);
        }

        /// Rotation by k then by width - k is the identity
        #[test]
        fn rotation_inverse((a, _b) in pair_strategy(), k in 0i64..300) {
            let w = i64::from(a.width());
            let there = a.rotate_left(k).expect("non-negative");
            prop_assert_eq!(there.rotate_right(k).expect("non-negative"), a.clone());
            prop_assert_eq!(a.rotate_left(k % w).expect("ok"), a.rotate_right(w - k % w).expect("ok"));
        }

        /// Popcount and zero counts are bounded by the width
        #[test]
        fn bit_counts_bounded((a, _b) in pair_strategy()) {
            let w = a.width();
            prop_assert!(a.popcount() <= w);
            prop_assert!(a.count_leading_zeros() + a.count_trailing_zeros() <= w || a.is_zero());
        }
    }
}

#[cfg(test)]
mod round_trips {
    use super::*;

    proptest! {
        /// Every format parses back to the same vector
        #[test]
        fn format_round_trip((a, _b) in pair_strategy()) {
            for spec in ["", "D", "B", "X"] {
                let text = a.format(spec).expect("valid spec");
                prop_assert_eq!(BitVector::parse(&text, a.width()).expect("round trip"), a.clone());
            }
        }

        /// Bytes round-trip in both byte orders
        #[test]
        fn bytes_round_trip((a, _b) in pair_strategy()) {
            for order in [Endianness::Little, Endianness::Big] {
                let bytes = a.to_bytes(order);
                prop_assert_eq!(bytes.len(), a.width().div_ceil(8) as usize);
                prop_assert_eq!(BitVector::from_bytes(&bytes, a.width(), order).expect("fits"), a.clone());
            }
        }

        /// Typed and runtime surfaces agree
        #[test]
        fn typed_matches_runtime(x in any::<u16>(), y in any::<u16>()) {
            let (a, b) = (Bv::<16>::new(x), Bv::<16>::new(y));
            let (ra, rb) = (a.to_bitvector(), b.to_bitvector());
            prop_assert_eq!((&a + &b).to_bitvector(), ra.checked_add(&rb).expect("same width"));
            prop_assert_eq!((&a * &b).to_bitvector(), ra.checked_mul(&rb).expect("same width"));
            prop_assert_eq!(u32::from(x.wrapping_sub(y)), (&a - &b).to_u32(false).expect("fits"));
        }

        /// Hex parsing never panics on arbitrary input
        #[test]
        fn hex_parse_never_panics(s in "\\PC*") {
            let _ = Bv::<32>::from_hex(&s);
            let _ = Bv::<32>::parse(&s);
        }
    }
}
