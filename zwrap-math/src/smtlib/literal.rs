//! SMT-LIB literal forms of rationals and bit-vectors.
//!
//! | Value            | Literal                 |
//! |------------------|-------------------------|
//! | `5`              | `5`                     |
//! | `-5`             | `(- 5)`                 |
//! | `1/3`            | `(/ 1 3)`               |
//! | `-1/3`           | `(- (/ 1 3))`           |
//! | 8-bit `0xB2`     | `#xb2`                  |
//! | 6-bit `0b101100` | `#b101100`              |
//!
//! The reader also accepts decimals (`1.5`), `(/ (- 1) 3)` and the indexed
//! form `(_ bv178 8)`.

use super::sexp::{self, Sexp};
use crate::bitvec::{BitVector, Bv, check_width};
use crate::rational::Rational;
use num_bigint::{BigInt, BigUint};
use zwrap_core::{Result, ValueError};

fn unsupported(kind: &str, expr: &Sexp) -> ValueError {
    ValueError::format_error(format!("Unsupported {} literal: {}", kind, expr))
}

pub(crate) fn integer_to_smtlib(value: &BigInt) -> String {
    if value.sign() == num_bigint::Sign::Minus {
        format!("(- {})", -value)
    } else {
        value.to_string()
    }
}

pub(crate) fn rational_from_sexp(expr: &Sexp) -> Result<Rational> {
    match expr {
        Sexp::Atom(atom) => {
            if !atom.starts_with(|c: char| c.is_ascii_digit()) || atom.contains('/') {
                return Err(unsupported("numeric", expr));
            }
            Rational::parse(atom)
        }
        Sexp::List(items) => match items.as_slice() {
            [op, operand] if op.as_atom() == Some("-") => Ok(-rational_from_sexp(operand)?),
            [op, numer, denom] if op.as_atom() == Some("/") => {
                rational_from_sexp(numer)?.checked_div(&rational_from_sexp(denom)?)
            }
            _ => Err(unsupported("numeric", expr)),
        },
    }
}

pub(crate) fn bitvector_from_sexp(expr: &Sexp) -> Result<BitVector> {
    match expr {
        Sexp::Atom(atom) => {
            if let Some(digits) = atom.strip_prefix("#b") {
                let width = u32::try_from(digits.len())
                    .map_err(|_| unsupported("bit-vector", expr))?;
                return BitVector::from_binary(digits, width);
            }
            if let Some(digits) = atom.strip_prefix("#x") {
                let width = u32::try_from(digits.len())
                    .ok()
                    .and_then(|len| len.checked_mul(4))
                    .ok_or_else(|| unsupported("bit-vector", expr))?;
                return BitVector::from_hex(digits, width);
            }
            Err(unsupported("bit-vector", expr))
        }
        Sexp::List(items) => match items.as_slice() {
            [underscore, Sexp::Atom(symbol), Sexp::Atom(width)]
                if underscore.as_atom() == Some("_") && symbol.starts_with("bv") =>
            {
                let value = BigUint::parse_bytes(symbol["bv".len()..].as_bytes(), 10)
                    .ok_or_else(|| unsupported("bit-vector", expr))?;
                let width: u32 = width.parse().map_err(|_| unsupported("bit-vector", expr))?;
                check_width(width)?;
                if value.bits() > u64::from(width) {
                    return Err(ValueError::invalid_argument(format!(
                        "Value {} does not fit in {}-bit bitvector",
                        value, width
                    )));
                }
                BitVector::from_biguint(value, width)
            }
            _ => Err(unsupported("bit-vector", expr)),
        },
    }
}

impl Rational {
    /// SMT-LIB term for this value.
    pub fn to_smtlib(&self) -> String {
        let magnitude = if self.is_integer() {
            self.numerator().magnitude().to_string()
        } else {
            format!(
                "(/ {} {})",
                self.numerator().magnitude(),
                self.denominator()
            )
        };
        if self.is_negative() {
            format!("(- {})", magnitude)
        } else {
            magnitude
        }
    }

    /// Read an SMT-LIB numeral, decimal or `-`/`/` term.
    pub fn from_smtlib(input: &str) -> Result<Self> {
        rational_from_sexp(&sexp::parse_one(input)?)
    }
}

impl BitVector {
    /// `#x…` when the width is a multiple of four, otherwise `#b…`.
    pub fn to_smtlib(&self) -> String {
        if self.width() % 4 == 0 {
            format!("#x{}", self.to_hex_string().to_ascii_lowercase())
        } else {
            format!("#b{}", self.to_binary_string())
        }
    }

    /// Read `#b…`, `#x…` or `(_ bvV W)`. The width comes from the literal.
    pub fn from_smtlib(input: &str) -> Result<Self> {
        bitvector_from_sexp(&sexp::parse_one(input)?)
    }
}

impl<const N: u32> Bv<N> {
    /// `#x…` when `N` is a multiple of four, otherwise `#b…`.
    pub fn to_smtlib(&self) -> String {
        self.to_bitvector().to_smtlib()
    }

    /// Read an SMT-LIB bit-vector literal whose width must be `N`.
    pub fn from_smtlib(input: &str) -> Result<Self> {
        Self::try_from(BitVector::from_smtlib(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zwrap_core::ErrorKind;

    fn rat(n: i64, d: i64) -> Rational {
        Rational::new(n, d).expect("non-zero denominator")
    }

    #[test]
    fn test_rational_to_smtlib() {
        assert_eq!(rat(5, 1).to_smtlib(), "5");
        assert_eq!(rat(-5, 1).to_smtlib(), "(- 5)");
        assert_eq!(rat(1, 3).to_smtlib(), "(/ 1 3)");
        assert_eq!(rat(-1, 3).to_smtlib(), "(- (/ 1 3))");
        assert_eq!(Rational::zero().to_smtlib(), "0");
    }

    #[test]
    fn test_rational_from_smtlib() {
        assert_eq!(Rational::from_smtlib("(- (/ 1 3))").expect("valid"), rat(-1, 3));
        assert_eq!(Rational::from_smtlib("(/ (- 1) 3)").expect("valid"), rat(-1, 3));
        assert_eq!(Rational::from_smtlib("(/ 1.0 4.0)").expect("valid"), rat(1, 4));
        assert_eq!(Rational::from_smtlib("2.5").expect("valid"), rat(5, 2));
        assert_eq!(Rational::from_smtlib(" 7 ").expect("valid"), rat(7, 1));
    }

    #[test]
    fn test_rational_from_smtlib_failures() {
        assert_eq!(
            Rational::from_smtlib("(/ 1 0)").expect_err("zero").kind(),
            ErrorKind::DivisionByZero
        );
        assert_eq!(Rational::from_smtlib("x").expect_err("symbol").kind(), ErrorKind::FormatError);
        assert_eq!(Rational::from_smtlib("1/2").expect_err("not smtlib").kind(), ErrorKind::FormatError);
        assert_eq!(Rational::from_smtlib("(+ 1 2)").expect_err("op").kind(), ErrorKind::FormatError);
    }

    #[test]
    fn test_bitvector_literals() {
        let v = BitVector::new(0xB2, 8).expect("valid");
        assert_eq!(v.to_smtlib(), "#xb2");
        assert_eq!(BitVector::from_smtlib("#xb2").expect("valid"), v);
        assert_eq!(BitVector::from_smtlib("(_ bv178 8)").expect("valid"), v);

        let odd = BitVector::new(0b101100, 6).expect("valid");
        assert_eq!(odd.to_smtlib(), "#b101100");
        assert_eq!(BitVector::from_smtlib("#b101100").expect("valid"), odd);
    }

    #[test]
    fn test_bitvector_literal_failures() {
        assert!(BitVector::from_smtlib("#b").is_err());
        assert!(BitVector::from_smtlib("#q12").is_err());
        assert!(BitVector::from_smtlib("(_ bvx 8)").is_err());
        assert_eq!(
            BitVector::from_smtlib("(_ bv1 0)").expect_err("zero width").kind(),
            ErrorKind::InvalidWidth
        );
    }

    #[test]
    fn test_typed_literal_width_checked() {
        assert_eq!(Bv::<8>::from_smtlib("#xff").expect("valid"), Bv::max());
        assert_eq!(
            Bv::<16>::from_smtlib("#xff").expect_err("8-bit literal").kind(),
            ErrorKind::WidthMismatch
        );
        assert_eq!(Bv::<12>::new(0xABC).to_smtlib(), "#xabc");
    }

    #[test]
    fn test_deeply_nested_literal_is_rejected() {
        let input = format!("{}1{}", "(- ".repeat(200_000), ")".repeat(200_000));
        assert_eq!(
            Rational::from_smtlib(&input).expect_err("too deep").kind(),
            ErrorKind::FormatError
        );

        let input = format!("{}1{}", "(- ".repeat(10), ")".repeat(10));
        assert_eq!(Rational::from_smtlib(&input).expect("shallow"), rat(1, 1));
    }

    #[test]
    fn test_indexed_literal_out_of_range() {
        assert_eq!(
            BitVector::from_smtlib("(_ bv256 8)").expect_err("too large").kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            BitVector::from_smtlib("(_ bv255 8)").expect("fits"),
            BitVector::max(8).expect("valid")
        );
        assert_eq!(
            BitVector::from_smtlib("(_ bv1 0)").expect_err("zero width").kind(),
            ErrorKind::InvalidWidth
        );
    }
}
