//! Width-generic bit-vector algorithms.
//!
//! Every function here takes operand values already reduced to
//! `[0, 2^width)` and returns a value in the same range. Width agreement
//! between operands is the caller's job: `Bv<N>` gets it from the type,
//! `BitVector` checks it before calling in.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use zwrap_core::{Result, ValueError};

/// `2^width`.
pub(crate) fn modulus(width: u32) -> BigUint {
    BigUint::one() << width
}

/// `2^width - 1`, all bits set.
pub(crate) fn mask(width: u32) -> BigUint {
    modulus(width) - 1u32
}

/// Drop every bit at or above `width`.
pub(crate) fn truncate(value: BigUint, width: u32) -> BigUint {
    if value.bits() <= u64::from(width) {
        value
    } else {
        value & mask(width)
    }
}

/// `value mod 2^width` with a non-negative result, so negative inputs land
/// on their two's-complement bit pattern.
pub(crate) fn wrap(value: &BigInt, width: u32) -> BigUint {
    let (_, magnitude) = value.mod_floor(&BigInt::from(modulus(width))).into_parts();
    magnitude
}

/// Whether the most significant bit is set.
pub(crate) fn sign_bit_set(value: &BigUint, width: u32) -> bool {
    value.bit(u64::from(width - 1))
}

/// Two's-complement reading: `value - 2^width` when the MSB is set.
pub(crate) fn to_signed(value: &BigUint, width: u32) -> BigInt {
    let unsigned = BigInt::from(value.clone());
    if sign_bit_set(value, width) {
        unsigned - BigInt::from(modulus(width))
    } else {
        unsigned
    }
}

pub(crate) fn to_integer(value: &BigUint, width: u32, signed: bool) -> BigInt {
    if signed {
        to_signed(value, width)
    } else {
        BigInt::from(value.clone())
    }
}

pub(crate) fn add(a: &BigUint, b: &BigUint, width: u32) -> BigUint {
    truncate(a + b, width)
}

pub(crate) fn sub(a: &BigUint, b: &BigUint, width: u32) -> BigUint {
    truncate(a + modulus(width) - b, width)
}

pub(crate) fn mul(a: &BigUint, b: &BigUint, width: u32) -> BigUint {
    truncate(a * b, width)
}

pub(crate) fn neg(a: &BigUint, width: u32) -> BigUint {
    if a.is_zero() {
        BigUint::zero()
    } else {
        modulus(width) - a
    }
}

fn check_divisor(b: &BigUint) -> Result<()> {
    if b.is_zero() {
        Err(ValueError::division_by_zero())
    } else {
        Ok(())
    }
}

/// Quotient; signed mode truncates toward zero like SMT `bvsdiv`.
pub(crate) fn div(a: &BigUint, b: &BigUint, width: u32, signed: bool) -> Result<BigUint> {
    check_divisor(b)?;
    if !signed {
        return Ok(a / b);
    }
    let quotient = to_signed(a, width) / to_signed(b, width);
    Ok(wrap(&quotient, width))
}

/// Remainder; signed mode takes the sign of the dividend like SMT `bvsrem`.
pub(crate) fn rem(a: &BigUint, b: &BigUint, width: u32, signed: bool) -> Result<BigUint> {
    check_divisor(b)?;
    if !signed {
        return Ok(a % b);
    }
    let remainder = to_signed(a, width) % to_signed(b, width);
    Ok(wrap(&remainder, width))
}

/// Signed modulo whose result takes the sign of the divisor (SMT `bvsmod`).
pub(crate) fn smod(a: &BigUint, b: &BigUint, width: u32) -> Result<BigUint> {
    check_divisor(b)?;
    let divisor = to_signed(b, width);
    let mut result = to_signed(a, width) % &divisor;
    if !result.is_zero() && result.is_negative() != divisor.is_negative() {
        result += &divisor;
    }
    Ok(wrap(&result, width))
}

pub(crate) fn not(a: &BigUint, width: u32) -> BigUint {
    mask(width) - a
}

fn shift_amount(amount: i64) -> Result<u64> {
    u64::try_from(amount)
        .map_err(|_| ValueError::invalid_argument("Shift amount must be non-negative"))
}

pub(crate) fn shl(a: &BigUint, amount: i64, width: u32) -> Result<BigUint> {
    let amount = shift_amount(amount)?;
    if amount >= u64::from(width) {
        return Ok(BigUint::zero());
    }
    Ok(truncate(a << amount, width))
}

/// Logical shift fills with zeros; arithmetic shift copies the sign bit.
pub(crate) fn shr(a: &BigUint, amount: i64, width: u32, signed: bool) -> Result<BigUint> {
    let amount = shift_amount(amount)?;
    let fill_ones = signed && sign_bit_set(a, width);
    if amount >= u64::from(width) {
        return Ok(if fill_ones {
            mask(width)
        } else {
            BigUint::zero()
        });
    }

    let shifted = a >> amount;
    if fill_ones {
        let all = mask(width);
        let vacated = &all ^ (&all >> amount);
        Ok(shifted | vacated)
    } else {
        Ok(shifted)
    }
}

fn rotation(positions: i64, width: u32) -> Result<u64> {
    let positions = u64::try_from(positions)
        .map_err(|_| ValueError::invalid_argument("Positions must be non-negative"))?;
    Ok(positions % u64::from(width))
}

pub(crate) fn rotate_left(a: &BigUint, positions: i64, width: u32) -> Result<BigUint> {
    let positions = rotation(positions, width)?;
    if positions == 0 {
        return Ok(a.clone());
    }
    let wrapped = a >> (u64::from(width) - positions);
    Ok(truncate((a << positions) | wrapped, width))
}

pub(crate) fn rotate_right(a: &BigUint, positions: i64, width: u32) -> Result<BigUint> {
    let positions = rotation(positions, width)?;
    if positions == 0 {
        return Ok(a.clone());
    }
    let wrapped = a << (u64::from(width) - positions);
    Ok(truncate((a >> positions) | wrapped, width))
}

pub(crate) fn compare(a: &BigUint, b: &BigUint, width: u32, signed: bool) -> Ordering {
    if !signed {
        return a.cmp(b);
    }
    match (sign_bit_set(a, width), sign_bit_set(b, width)) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        // Same sign: two's-complement order agrees with unsigned order.
        _ => a.cmp(b),
    }
}

/// The `len`-bit slice starting at bit `start` (bit 0 is the LSB).
pub(crate) fn extract(a: &BigUint, width: u32, start: u32, len: u32) -> Result<BigUint> {
    let end = u64::from(start) + u64::from(len);
    if end > u64::from(width) {
        return Err(ValueError::invalid_argument(format!(
            "Cannot extract {} bits starting from bit {} from {}-bit vector. \
             Extraction range [{}:{}] exceeds available bits [0:{}].",
            len,
            start,
            width,
            end - 1,
            start,
            width - 1
        )));
    }
    Ok(truncate(a >> start, len))
}

/// Zero/sign extension or truncation to `new_width`.
pub(crate) fn resize(a: &BigUint, width: u32, new_width: u32, signed: bool) -> BigUint {
    match new_width.cmp(&width) {
        Ordering::Equal => a.clone(),
        Ordering::Less => truncate(a.clone(), new_width),
        Ordering::Greater => {
            if signed && sign_bit_set(a, width) {
                a | (mask(new_width) ^ mask(width))
            } else {
                a.clone()
            }
        }
    }
}

pub(crate) fn repeat(a: &BigUint, width: u32, new_width: u32) -> Result<BigUint> {
    if new_width % width != 0 {
        return Err(ValueError::invalid_argument(format!(
            "Target size {} must be a multiple of source size {}",
            new_width, width
        )));
    }
    let mut result = BigUint::zero();
    for _ in 0..new_width / width {
        result = (result << width) | a;
    }
    Ok(result)
}

/// `high` in the upper bits, `low` in the lower bits.
pub(crate) fn concat(
    high: &BigUint,
    high_width: u32,
    low: &BigUint,
    low_width: u32,
    result_width: u32,
) -> Result<BigUint> {
    let sum = u64::from(high_width) + u64::from(low_width);
    if u64::from(result_width) != sum {
        return Err(ValueError::invalid_argument(format!(
            "Result size {} must equal sum of input sizes ({} + {} = {})",
            result_width, high_width, low_width, sum
        )));
    }
    Ok((high << low_width) | low)
}

pub(crate) fn popcount(a: &BigUint) -> u32 {
    a.count_ones() as u32
}

pub(crate) fn leading_zeros(a: &BigUint, width: u32) -> u32 {
    width - a.bits() as u32
}

pub(crate) fn trailing_zeros(a: &BigUint, width: u32) -> u32 {
    a.trailing_zeros().map_or(width, |zeros| zeros as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn test_wrap_negative() {
        assert_eq!(wrap(&BigInt::from(-1), 8), u(255));
        assert_eq!(wrap(&BigInt::from(-256), 8), u(0));
        assert_eq!(wrap(&BigInt::from(-257), 8), u(255));
        assert_eq!(wrap(&BigInt::from(300), 8), u(44));
    }

    #[test]
    fn test_to_signed() {
        assert_eq!(to_signed(&u(255), 8), BigInt::from(-1));
        assert_eq!(to_signed(&u(128), 8), BigInt::from(-128));
        assert_eq!(to_signed(&u(127), 8), BigInt::from(127));
        assert_eq!(to_signed(&u(1), 1), BigInt::from(-1));
    }

    #[test]
    fn test_sub_wraps() {
        assert_eq!(sub(&u(5), &u(10), 8), u(251));
        assert_eq!(sub(&u(10), &u(5), 8), u(5));
    }

    #[test]
    fn test_signed_division_overflow_wraps() {
        // -128 / -1 = 128, which wraps back to -128.
        assert_eq!(div(&u(128), &u(255), 8, true).expect("non-zero"), u(128));
    }

    #[test]
    fn test_smod_sign_follows_divisor() {
        // -10 smod 3 = 2
        assert_eq!(smod(&u(246), &u(3), 8).expect("non-zero"), u(2));
        // 10 smod -3 = -2
        assert_eq!(smod(&u(10), &u(253), 8).expect("non-zero"), u(254));
        // -10 smod -3 = -1
        assert_eq!(smod(&u(246), &u(253), 8).expect("non-zero"), u(255));
        // exact division leaves zero
        assert_eq!(smod(&u(246), &u(5), 8).expect("non-zero"), u(0));
    }

    #[test]
    fn test_arithmetic_shift_fills_sign() {
        assert_eq!(shr(&u(0b1000_0000), 3, 8, true).expect("ok"), u(0b1111_0000));
        assert_eq!(shr(&u(0b1000_0000), 3, 8, false).expect("ok"), u(0b0001_0000));
        assert_eq!(shr(&u(0b1000_0000), 8, 8, true).expect("ok"), u(0xFF));
        assert_eq!(shr(&u(0b0100_0000), 20, 8, true).expect("ok"), u(0));
    }

    #[test]
    fn test_signed_compare() {
        assert_eq!(compare(&u(255), &u(1), 8, true), Ordering::Less);
        assert_eq!(compare(&u(255), &u(1), 8, false), Ordering::Greater);
        assert_eq!(compare(&u(254), &u(255), 8, true), Ordering::Less);
    }

    #[test]
    fn test_bit_counts_of_zero() {
        assert_eq!(leading_zeros(&u(0), 12), 12);
        assert_eq!(trailing_zeros(&u(0), 12), 12);
        assert_eq!(popcount(&u(0)), 0);
    }
}
