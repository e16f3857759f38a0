//! Bit-vector whose width is a const parameter.

use super::{BitVector, BvFormat, Endianness, MAX_WIDTH, convert, ops, text};
use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, BitAnd, BitOr, BitXor, Mul, Neg, Not, Sub};
use std::str::FromStr;
use zwrap_core::{Config, Result, ValueError};

/// An `N`-bit value stored in `[0, 2^N)`.
///
/// `N` must be in `1..=MAX_WIDTH`; other widths fail to compile when a
/// value is constructed. Wrapping arithmetic and bitwise operations are
/// available as operators because they cannot fail. Division, shifts and
/// width changes return [`Result`].
///
/// ```
/// use zwrap_math::Bv;
///
/// let a = Bv::<8>::new(200);
/// let b = Bv::<8>::new(100);
/// assert_eq!((a + b).to_string(), "44");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bv<const N: u32> {
    value: BigUint,
}

impl<const N: u32> Bv<N> {
    /// The width, checked when first used.
    pub const WIDTH: u32 = {
        assert!(N > 0, "bit-vector width must be greater than zero");
        assert!(N <= MAX_WIDTH, "bit-vector width exceeds MAX_WIDTH");
        N
    };

    /// Wrap any integer into `N` bits.
    pub fn new(value: impl Into<BigInt>) -> Self {
        Self::from_raw(ops::wrap(&value.into(), Self::WIDTH))
    }

    /// Build from an unsigned value, dropping bits at or above `N`.
    pub fn from_biguint(value: BigUint) -> Self {
        Self::from_raw(ops::truncate(value, Self::WIDTH))
    }

    pub(crate) fn from_raw(value: BigUint) -> Self {
        debug_assert!(value.bits() <= u64::from(Self::WIDTH));
        Self { value }
    }

    /// All bits clear.
    pub fn zero() -> Self {
        Self::from_raw(BigUint::zero())
    }

    /// The value one.
    pub fn one() -> Self {
        Self::from_raw(BigUint::from(1u32))
    }

    /// All bits set.
    pub fn max() -> Self {
        Self::from_raw(ops::mask(Self::WIDTH))
    }

    /// Alias for [`Bv::max`].
    pub fn all_ones() -> Self {
        Self::max()
    }

    /// Only the most significant bit set.
    pub fn sign_bit() -> Self {
        Self::from_raw(ops::modulus(Self::WIDTH - 1))
    }

    /// Width in bits.
    pub fn width(&self) -> u32 {
        Self::WIDTH
    }

    /// The stored unsigned value.
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Whether every bit is clear.
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Whether the sign bit is set.
    pub fn is_negative(&self) -> bool {
        ops::sign_bit_set(&self.value, N)
    }

    /// Bit `index`, counting from the LSB. Bits past the width read as zero.
    pub fn bit(&self, index: u32) -> bool {
        index < N && self.value.bit(u64::from(index))
    }

    /// Unsigned value, or the two's-complement reading when `signed`.
    pub fn to_bigint(&self, signed: bool) -> BigInt {
        ops::to_integer(&self.value, N, signed)
    }

    /// Erase the width into the type-less form.
    pub fn to_bitvector(&self) -> BitVector {
        BitVector::from_raw(self.value.clone(), Self::WIDTH)
    }

    /// Quotient, unsigned or signed (truncating toward zero).
    pub fn div(&self, other: &Self, signed: bool) -> Result<Self> {
        ops::div(&self.value, &other.value, N, signed).map(Self::from_raw)
    }

    /// Remainder; in signed mode it takes the sign of the dividend.
    pub fn rem(&self, other: &Self, signed: bool) -> Result<Self> {
        ops::rem(&self.value, &other.value, N, signed).map(Self::from_raw)
    }

    /// Signed modulo; the result takes the sign of the divisor.
    pub fn smod(&self, other: &Self) -> Result<Self> {
        ops::smod(&self.value, &other.value, N).map(Self::from_raw)
    }

    /// Shift left, filling with zeros.
    pub fn shl(&self, amount: i64) -> Result<Self> {
        ops::shl(&self.value, amount, N).map(Self::from_raw)
    }

    /// Logical or arithmetic shift right.
    pub fn shr(&self, amount: i64, signed: bool) -> Result<Self> {
        ops::shr(&self.value, amount, N, signed).map(Self::from_raw)
    }

    /// Rotate toward the MSB.
    pub fn rotate_left(&self, positions: i64) -> Result<Self> {
        ops::rotate_left(&self.value, positions, N).map(Self::from_raw)
    }

    /// Rotate toward the LSB.
    pub fn rotate_right(&self, positions: i64) -> Result<Self> {
        ops::rotate_right(&self.value, positions, N).map(Self::from_raw)
    }

    /// Order under the unsigned or signed reading.
    pub fn compare(&self, other: &Self, signed: bool) -> Ordering {
        ops::compare(&self.value, &other.value, N, signed)
    }

    /// `self < other`.
    pub fn lt(&self, other: &Self, signed: bool) -> bool {
        self.compare(other, signed) == Ordering::Less
    }

    /// `self <= other`.
    pub fn le(&self, other: &Self, signed: bool) -> bool {
        self.compare(other, signed) != Ordering::Greater
    }

    /// `self > other`.
    pub fn gt(&self, other: &Self, signed: bool) -> bool {
        self.compare(other, signed) == Ordering::Greater
    }

    /// `self >= other`.
    pub fn ge(&self, other: &Self, signed: bool) -> bool {
        self.compare(other, signed) != Ordering::Less
    }

    /// `M` bits starting at bit `start`.
    pub fn extract<const M: u32>(&self, start: u32) -> Result<Bv<M>> {
        ops::extract(&self.value, N, start, Bv::<M>::WIDTH).map(Bv::from_raw)
    }

    /// Zero-extend, sign-extend or truncate to `M` bits.
    pub fn resize<const M: u32>(&self, signed: bool) -> Bv<M> {
        Bv::from_raw(ops::resize(&self.value, N, Bv::<M>::WIDTH, signed))
    }

    /// Tile this pattern across `M` bits; `M` must be a multiple of `N`.
    pub fn repeat<const M: u32>(&self) -> Result<Bv<M>> {
        ops::repeat(&self.value, Self::WIDTH, Bv::<M>::WIDTH).map(Bv::from_raw)
    }

    /// `self` in the high bits, `low` in the low bits. `R` must equal `N + L`.
    pub fn concat<const L: u32, const R: u32>(&self, low: &Bv<L>) -> Result<Bv<R>> {
        ops::concat(&self.value, Self::WIDTH, &low.value, Bv::<L>::WIDTH, Bv::<R>::WIDTH)
            .map(Bv::from_raw)
    }

    /// Number of set bits.
    pub fn popcount(&self) -> u32 {
        ops::popcount(&self.value)
    }

    /// Leading zero bits; zero reports `N`.
    pub fn count_leading_zeros(&self) -> u32 {
        ops::leading_zeros(&self.value, N)
    }

    /// Trailing zero bits; zero reports `N`.
    pub fn count_trailing_zeros(&self) -> u32 {
        ops::trailing_zeros(&self.value, N)
    }

    /// Convert the chosen reading to `i32`.
    pub fn to_i32(&self, signed: bool) -> Result<i32> {
        convert::to_fixed(&self.value, N, signed, "int")
    }

    /// Convert the chosen reading to `u32`.
    pub fn to_u32(&self, signed: bool) -> Result<u32> {
        convert::to_fixed(&self.value, N, signed, "uint")
    }

    /// Convert the chosen reading to `i64`.
    pub fn to_i64(&self, signed: bool) -> Result<i64> {
        convert::to_fixed(&self.value, N, signed, "long")
    }

    /// Convert the chosen reading to `u64`.
    pub fn to_u64(&self, signed: bool) -> Result<u64> {
        convert::to_fixed(&self.value, N, signed, "ulong")
    }

    /// Read at most `ceil(N / 8)` bytes.
    pub fn from_bytes(bytes: &[u8], endianness: Endianness) -> Result<Self> {
        convert::from_bytes(bytes, Self::WIDTH, endianness).map(Self::from_raw)
    }

    /// Exactly `ceil(N / 8)` bytes.
    pub fn to_bytes(&self, endianness: Endianness) -> Vec<u8> {
        convert::to_bytes(&self.value, N, endianness)
    }

    /// Write `ceil(N / 8)` bytes to the front of `dest`.
    pub fn copy_to(&self, dest: &mut [u8], endianness: Endianness) -> Result<()> {
        convert::copy_to(&self.value, N, dest, endianness)
    }

    /// Parse hex digits with an optional `0x` prefix.
    pub fn from_hex(hex: &str) -> Result<Self> {
        text::parse_hex(hex, Self::WIDTH).map(Self::from_raw)
    }

    /// Parse binary digits with an optional `0b` prefix.
    pub fn from_binary(binary: &str) -> Result<Self> {
        text::parse_binary(binary, Self::WIDTH).map(Self::from_raw)
    }

    /// Parse any string [`Bv::format`] produces.
    pub fn parse(input: &str) -> Result<Self> {
        let result = text::parse_any(input, Self::WIDTH);
        if let Err(err) = &result {
            tracing::debug!(input, width = N, error = %err, "bit-vector parse failed");
        }
        result.map(Self::from_raw)
    }

    /// Binary digits, zero-padded to `N`.
    pub fn to_binary_string(&self) -> String {
        text::binary_string(&self.value, N)
    }

    /// Uppercase hex, zero-padded to `ceil(N / 4)` digits.
    pub fn to_hex_string(&self) -> String {
        text::hex_string(&self.value, N, Default::default())
    }

    /// Render with a format specifier (see [`BvFormat`]).
    pub fn format(&self, spec: &str) -> Result<String> {
        self.format_with(spec, &Config::default())
    }

    /// Render with a format specifier, honouring `config.hex_padding`.
    pub fn format_with(&self, spec: &str, config: &Config) -> Result<String> {
        let format: BvFormat = spec.parse()?;
        Ok(text::render(&self.value, N, format, config.hex_padding))
    }
}

impl<const N: u32> Default for Bv<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: u32> fmt::Display for Bv<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<const N: u32> FromStr for Bv<N> {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl<const N: u32> PartialOrd for Bv<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Unsigned order.
impl<const N: u32> Ord for Bv<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<const N: u32> From<Bv<N>> for BitVector {
    fn from(value: Bv<N>) -> Self {
        BitVector::from_raw(value.value, Bv::<N>::WIDTH)
    }
}

impl<const N: u32> TryFrom<BitVector> for Bv<N> {
    type Error = ValueError;

    fn try_from(value: BitVector) -> Result<Self> {
        if value.width() != Self::WIDTH {
            return Err(ValueError::width_mismatch(value.width(), N));
        }
        Ok(Self::from_raw(value.into_value()))
    }
}

impl<const N: u32> TryFrom<&BitVector> for Bv<N> {
    type Error = ValueError;

    fn try_from(value: &BitVector) -> Result<Self> {
        Self::try_from(value.clone())
    }
}

macro_rules! impl_wrapping_binop {
    ($trait:ident, $method:ident, |$a:ident, $b:ident| $body:expr) => {
        impl<const N: u32> $trait<&Bv<N>> for &Bv<N> {
            type Output = Bv<N>;

            fn $method(self, rhs: &Bv<N>) -> Bv<N> {
                let ($a, $b) = (&self.value, &rhs.value);
                Bv::from_raw($body)
            }
        }

        impl<const N: u32> $trait<Bv<N>> for Bv<N> {
            type Output = Bv<N>;

            fn $method(self, rhs: Bv<N>) -> Bv<N> {
                (&self).$method(&rhs)
            }
        }

        impl<const N: u32> $trait<&Bv<N>> for Bv<N> {
            type Output = Bv<N>;

            fn $method(self, rhs: &Bv<N>) -> Bv<N> {
                (&self).$method(rhs)
            }
        }
    };
}

impl_wrapping_binop!(Add, add, |a, b| ops::add(a, b, N));
impl_wrapping_binop!(Sub, sub, |a, b| ops::sub(a, b, N));
impl_wrapping_binop!(Mul, mul, |a, b| ops::mul(a, b, N));
impl_wrapping_binop!(BitAnd, bitand, |a, b| a & b);
impl_wrapping_binop!(BitOr, bitor, |a, b| a | b);
impl_wrapping_binop!(BitXor, bitxor, |a, b| a ^ b);

impl<const N: u32> Neg for &Bv<N> {
    type Output = Bv<N>;

    fn neg(self) -> Bv<N> {
        Bv::from_raw(ops::neg(&self.value, N))
    }
}

impl<const N: u32> Neg for Bv<N> {
    type Output = Bv<N>;

    fn neg(self) -> Bv<N> {
        -&self
    }
}

impl<const N: u32> Not for &Bv<N> {
    type Output = Bv<N>;

    fn not(self) -> Bv<N> {
        Bv::from_raw(ops::not(&self.value, N))
    }
}

impl<const N: u32> Not for Bv<N> {
    type Output = Bv<N>;

    fn not(self) -> Bv<N> {
        !&self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zwrap_core::ErrorKind;

    #[test]
    fn test_operators_wrap() {
        let a = Bv::<8>::new(200);
        let b = Bv::<8>::new(100);
        assert_eq!(&a + &b, Bv::new(44));
        assert_eq!(b.clone() - a.clone(), Bv::new(156));
        assert_eq!(&a * &b, Bv::new(32));
        assert_eq!(-Bv::<8>::one(), Bv::max());
        assert_eq!(!Bv::<4>::new(0b1010), Bv::new(0b0101));
        assert_eq!(Bv::<4>::new(0b1100) & Bv::new(0b1010), Bv::new(0b1000));
        assert_eq!(Bv::<4>::new(0b1100) | Bv::new(0b1010), Bv::new(0b1110));
        assert_eq!(Bv::<4>::new(0b1100) ^ Bv::new(0b1010), Bv::new(0b0110));
    }

    #[test]
    fn test_signed_division() {
        let x = Bv::<8>::new(128);
        assert_eq!(x.div(&Bv::new(2), false).expect("ok"), Bv::new(64));
        assert_eq!(x.div(&Bv::new(2), true).expect("ok"), Bv::new(192));
        assert_eq!(
            Bv::<8>::new(246).smod(&Bv::new(3)).expect("ok"),
            Bv::new(2)
        );
        assert_eq!(
            x.rem(&Bv::zero(), false).expect_err("zero").kind(),
            ErrorKind::DivisionByZero
        );
    }

    #[test]
    fn test_width_changing_ops() {
        let v = Bv::<8>::new(0xAB);
        let high: Bv<4> = v.extract(4).expect("in range");
        assert_eq!(high, Bv::new(0xA));
        assert!(v.extract::<4>(5).is_err());

        assert_eq!(v.resize::<16>(true), Bv::<16>::new(0xFFAB));
        assert_eq!(v.resize::<16>(false), Bv::<16>::new(0x00AB));
        assert_eq!(v.resize::<4>(false), Bv::<4>::new(0xB));

        let tiled: Bv<24> = v.repeat().expect("multiple");
        assert_eq!(tiled, Bv::new(0xABABAB));
        assert!(v.repeat::<12>().is_err());

        let joined: Bv<12> = Bv::<4>::new(0xF).concat(&v).expect("4 + 8");
        assert_eq!(joined, Bv::new(0xFAB));
        let err = Bv::<4>::new(0xF).concat::<8, 16>(&v).expect_err("wrong sum");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_rotate_scenario() {
        let v = Bv::<8>::from_binary("10110000").expect("valid");
        assert_eq!(v.rotate_left(2).expect("ok").to_binary_string(), "11000010");
        assert_eq!(v.rotate_left(0).expect("ok"), v);
    }

    #[test]
    fn test_signed_comparison_and_ordering() {
        let minus_one = Bv::<8>::new(-1);
        let one = Bv::<8>::one();
        assert!(minus_one.lt(&one, true));
        assert!(minus_one.gt(&one, false));
        assert!(one < minus_one);
    }

    #[test]
    fn test_conversions() {
        let v = Bv::<16>::new(-2);
        assert_eq!(v.to_i32(true).expect("fits"), -2);
        assert_eq!(v.to_u32(false).expect("fits"), 0xFFFE);
        assert_eq!(v.to_bytes(Endianness::Big), vec![0xFF, 0xFE]);
        assert_eq!(Bv::<16>::from_bytes(&[0xFE, 0xFF], Endianness::Little).expect("fits"), v);
        assert_eq!(v.to_hex_string(), "FFFE");
        assert_eq!(v.format("B").expect("valid"), "0b1111111111111110 (16-bit)");
    }

    #[test]
    fn test_bitvector_interop() {
        let typed = Bv::<12>::new(0x123);
        let erased: BitVector = typed.clone().into();
        assert_eq!(erased.width(), 12);
        assert_eq!(typed.to_bitvector(), erased);
        assert_eq!(Bv::<12>::try_from(&erased).expect("same width"), typed);

        let err = Bv::<8>::try_from(erased).expect_err("wrong width");
        assert_eq!(err.kind(), ErrorKind::WidthMismatch);
    }

    #[test]
    fn test_from_str_round_trip() {
        let v = Bv::<10>::new(0x2C5);
        for spec in ["V", "D", "B", "X"] {
            let text = v.format(spec).expect("valid");
            assert_eq!(text.parse::<Bv<10>>().expect("round trip"), v);
        }
    }
}
