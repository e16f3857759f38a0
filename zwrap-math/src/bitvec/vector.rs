//! Bit-vector whose width is a runtime value.

use super::{BvFormat, Endianness, check_width, convert, ops, text};
use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use std::cmp::Ordering;
use std::fmt;
use zwrap_core::{Config, Result, ValueError};

/// A `width`-bit value stored in `[0, 2^width)`.
///
/// Equality and hashing include the width: `5` as an 8-bit vector is not
/// equal to `5` as a 16-bit vector. Binary operations on vectors of
/// different widths fail with `WidthMismatch`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitVector {
    value: BigUint,
    width: u32,
}

impl BitVector {
    /// Wrap any integer into `width` bits (negative values become their
    /// two's-complement pattern).
    pub fn new(value: impl Into<BigInt>, width: u32) -> Result<Self> {
        check_width(width)?;
        Ok(Self::from_raw(ops::wrap(&value.into(), width), width))
    }

    /// Build from an unsigned value, dropping bits at or above `width`.
    pub fn from_biguint(value: BigUint, width: u32) -> Result<Self> {
        check_width(width)?;
        Ok(Self::from_raw(ops::truncate(value, width), width))
    }

    /// Caller guarantees a valid width and an in-range value.
    pub(crate) fn from_raw(value: BigUint, width: u32) -> Self {
        debug_assert!(value.bits() <= u64::from(width));
        Self { value, width }
    }

    /// All bits clear.
    pub fn zero(width: u32) -> Result<Self> {
        Self::from_biguint(BigUint::zero(), width)
    }

    /// The value one.
    pub fn one(width: u32) -> Result<Self> {
        Self::from_biguint(BigUint::from(1u32), width)
    }

    /// All bits set (`2^width - 1`).
    pub fn max(width: u32) -> Result<Self> {
        check_width(width)?;
        Ok(Self::from_raw(ops::mask(width), width))
    }

    /// Alias for [`BitVector::max`].
    pub fn all_ones(width: u32) -> Result<Self> {
        Self::max(width)
    }

    /// Only the most significant bit set.
    pub fn sign_bit(width: u32) -> Result<Self> {
        check_width(width)?;
        Ok(Self::from_raw(ops::modulus(width - 1), width))
    }

    /// The stored unsigned value.
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Consume and return the stored unsigned value.
    pub fn into_value(self) -> BigUint {
        self.value
    }

    /// Width in bits.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Whether every bit is clear.
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Whether the sign bit is set.
    pub fn is_negative(&self) -> bool {
        ops::sign_bit_set(&self.value, self.width)
    }

    /// Bit `index`, counting from the LSB. Bits past the width read as zero.
    pub fn bit(&self, index: u32) -> bool {
        index < self.width && self.value.bit(u64::from(index))
    }

    /// Unsigned value, or the two's-complement reading when `signed`.
    pub fn to_bigint(&self, signed: bool) -> BigInt {
        ops::to_integer(&self.value, self.width, signed)
    }

    fn same_width(&self, other: &Self) -> Result<()> {
        if self.width == other.width {
            Ok(())
        } else {
            tracing::debug!(left = self.width, right = other.width, "bit-vector width mismatch");
            Err(ValueError::width_mismatch(self.width, other.width))
        }
    }

    fn with_value(&self, value: BigUint) -> Self {
        Self::from_raw(value, self.width)
    }

    // Arithmetic

    /// `(self + other) mod 2^width`.
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        self.same_width(other)?;
        Ok(self.with_value(ops::add(&self.value, &other.value, self.width)))
    }

    /// `(self - other) mod 2^width`.
    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        self.same_width(other)?;
        Ok(self.with_value(ops::sub(&self.value, &other.value, self.width)))
    }

    /// `(self * other) mod 2^width`.
    pub fn checked_mul(&self, other: &Self) -> Result<Self> {
        self.same_width(other)?;
        Ok(self.with_value(ops::mul(&self.value, &other.value, self.width)))
    }

    /// Two's-complement negation.
    #[must_use]
    pub fn wrapping_neg(&self) -> Self {
        self.with_value(ops::neg(&self.value, self.width))
    }

    /// Quotient, unsigned or signed (truncating toward zero).
    pub fn div(&self, other: &Self, signed: bool) -> Result<Self> {
        self.same_width(other)?;
        Ok(self.with_value(ops::div(&self.value, &other.value, self.width, signed)?))
    }

    /// Remainder; in signed mode it takes the sign of the dividend.
    pub fn rem(&self, other: &Self, signed: bool) -> Result<Self> {
        self.same_width(other)?;
        Ok(self.with_value(ops::rem(&self.value, &other.value, self.width, signed)?))
    }

    /// Signed modulo; the result takes the sign of the divisor.
    pub fn smod(&self, other: &Self) -> Result<Self> {
        self.same_width(other)?;
        Ok(self.with_value(ops::smod(&self.value, &other.value, self.width)?))
    }

    // Bitwise

    /// Bitwise AND.
    pub fn checked_and(&self, other: &Self) -> Result<Self> {
        self.same_width(other)?;
        Ok(self.with_value(&self.value & &other.value))
    }

    /// Bitwise OR.
    pub fn checked_or(&self, other: &Self) -> Result<Self> {
        self.same_width(other)?;
        Ok(self.with_value(&self.value | &other.value))
    }

    /// Bitwise XOR.
    pub fn checked_xor(&self, other: &Self) -> Result<Self> {
        self.same_width(other)?;
        Ok(self.with_value(&self.value ^ &other.value))
    }

    /// Flip every bit.
    #[must_use]
    pub fn complement(&self) -> Self {
        self.with_value(ops::not(&self.value, self.width))
    }

    // Shifts and rotations

    /// Shift left, filling with zeros. Amounts of `width` or more give zero.
    pub fn shl(&self, amount: i64) -> Result<Self> {
        Ok(self.with_value(ops::shl(&self.value, amount, self.width)?))
    }

    /// Logical (`signed == false`) or arithmetic shift right.
    pub fn shr(&self, amount: i64, signed: bool) -> Result<Self> {
        Ok(self.with_value(ops::shr(&self.value, amount, self.width, signed)?))
    }

    /// Rotate toward the MSB by `positions mod width`.
    pub fn rotate_left(&self, positions: i64) -> Result<Self> {
        Ok(self.with_value(ops::rotate_left(&self.value, positions, self.width)?))
    }

    /// Rotate toward the LSB by `positions mod width`.
    pub fn rotate_right(&self, positions: i64) -> Result<Self> {
        Ok(self.with_value(ops::rotate_right(&self.value, positions, self.width)?))
    }

    // Comparisons

    /// Order under the unsigned or signed reading.
    pub fn compare(&self, other: &Self, signed: bool) -> Result<Ordering> {
        self.same_width(other)?;
        Ok(ops::compare(&self.value, &other.value, self.width, signed))
    }

    /// `self < other`.
    pub fn lt(&self, other: &Self, signed: bool) -> Result<bool> {
        Ok(self.compare(other, signed)? == Ordering::Less)
    }

    /// `self <= other`.
    pub fn le(&self, other: &Self, signed: bool) -> Result<bool> {
        Ok(self.compare(other, signed)? != Ordering::Greater)
    }

    /// `self > other`.
    pub fn gt(&self, other: &Self, signed: bool) -> Result<bool> {
        Ok(self.compare(other, signed)? == Ordering::Greater)
    }

    /// `self >= other`.
    pub fn ge(&self, other: &Self, signed: bool) -> Result<bool> {
        Ok(self.compare(other, signed)? != Ordering::Less)
    }

    // Width changes

    /// `len` bits starting at bit `start`.
    pub fn extract(&self, start: u32, len: u32) -> Result<Self> {
        check_width(len)?;
        let value = ops::extract(&self.value, self.width, start, len)?;
        Ok(Self::from_raw(value, len))
    }

    /// Zero-extend, sign-extend or truncate to `new_width`.
    pub fn resize(&self, new_width: u32, signed: bool) -> Result<Self> {
        check_width(new_width)?;
        let value = ops::resize(&self.value, self.width, new_width, signed);
        Ok(Self::from_raw(value, new_width))
    }

    /// Tile this pattern to fill `new_width`, which must be a multiple of
    /// the current width.
    pub fn repeat(&self, new_width: u32) -> Result<Self> {
        check_width(new_width)?;
        let value = ops::repeat(&self.value, self.width, new_width)?;
        Ok(Self::from_raw(value, new_width))
    }

    /// `self` as the high bits, `low` as the low bits. `result_width` must be
    /// the sum of both widths.
    pub fn concat(&self, low: &Self, result_width: u32) -> Result<Self> {
        check_width(result_width)?;
        let value = ops::concat(&self.value, self.width, &low.value, low.width, result_width)?;
        Ok(Self::from_raw(value, result_width))
    }

    // Bit counting

    /// Number of set bits.
    pub fn popcount(&self) -> u32 {
        ops::popcount(&self.value)
    }

    /// Leading zero bits; an all-zero vector reports its width.
    pub fn count_leading_zeros(&self) -> u32 {
        ops::leading_zeros(&self.value, self.width)
    }

    /// Trailing zero bits; an all-zero vector reports its width.
    pub fn count_trailing_zeros(&self) -> u32 {
        ops::trailing_zeros(&self.value, self.width)
    }

    // Integer conversions

    /// Convert the chosen reading to `i32`.
    pub fn to_i32(&self, signed: bool) -> Result<i32> {
        convert::to_fixed(&self.value, self.width, signed, "int")
    }

    /// Convert the chosen reading to `u32`.
    pub fn to_u32(&self, signed: bool) -> Result<u32> {
        convert::to_fixed(&self.value, self.width, signed, "uint")
    }

    /// Convert the chosen reading to `i64`.
    pub fn to_i64(&self, signed: bool) -> Result<i64> {
        convert::to_fixed(&self.value, self.width, signed, "long")
    }

    /// Convert the chosen reading to `u64`.
    pub fn to_u64(&self, signed: bool) -> Result<u64> {
        convert::to_fixed(&self.value, self.width, signed, "ulong")
    }

    // Bytes

    /// Read at most `ceil(width / 8)` bytes.
    pub fn from_bytes(bytes: &[u8], width: u32, endianness: Endianness) -> Result<Self> {
        check_width(width)?;
        Ok(Self::from_raw(convert::from_bytes(bytes, width, endianness)?, width))
    }

    /// Exactly `ceil(width / 8)` bytes.
    pub fn to_bytes(&self, endianness: Endianness) -> Vec<u8> {
        convert::to_bytes(&self.value, self.width, endianness)
    }

    /// Write `ceil(width / 8)` bytes to the front of `dest`.
    pub fn copy_to(&self, dest: &mut [u8], endianness: Endianness) -> Result<()> {
        convert::copy_to(&self.value, self.width, dest, endianness)
    }

    // Text

    /// Parse hex digits with an optional `0x` prefix.
    pub fn from_hex(hex: &str, width: u32) -> Result<Self> {
        check_width(width)?;
        Ok(Self::from_raw(text::parse_hex(hex, width)?, width))
    }

    /// Parse binary digits with an optional `0b` prefix.
    pub fn from_binary(binary: &str, width: u32) -> Result<Self> {
        check_width(width)?;
        Ok(Self::from_raw(text::parse_binary(binary, width)?, width))
    }

    /// Parse any string [`BitVector::format`] produces.
    pub fn parse(input: &str, width: u32) -> Result<Self> {
        check_width(width)?;
        let result = text::parse_any(input, width);
        if let Err(err) = &result {
            tracing::debug!(input, width, error = %err, "bit-vector parse failed");
        }
        Ok(Self::from_raw(result?, width))
    }

    /// Binary digits, zero-padded to the width.
    pub fn to_binary_string(&self) -> String {
        text::binary_string(&self.value, self.width)
    }

    /// Uppercase hex, zero-padded to `ceil(width / 4)` digits.
    pub fn to_hex_string(&self) -> String {
        text::hex_string(&self.value, self.width, Default::default())
    }

    /// Render with a format specifier (see [`BvFormat`]).
    pub fn format(&self, spec: &str) -> Result<String> {
        self.format_with(spec, &Config::default())
    }

    /// Render with a format specifier, honouring `config.hex_padding`.
    pub fn format_with(&self, spec: &str, config: &Config) -> Result<String> {
        let format: BvFormat = spec.parse()?;
        Ok(text::render(&self.value, self.width, format, config.hex_padding))
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl PartialOrd for BitVector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders by width, then by unsigned value.
impl Ord for BitVector {
    fn cmp(&self, other: &Self) -> Ordering {
        self.width
            .cmp(&other.width)
            .then_with(|| self.value.cmp(&other.value))
    }
}
