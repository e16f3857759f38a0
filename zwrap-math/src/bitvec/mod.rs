//! Fixed-width bit-vectors with two's-complement semantics.
//!
//! Two surfaces share one engine:
//! - [`Bv<N>`]: width is a const parameter, so mixing widths is a type error
//!   and width-changing operations name their result width as a type.
//! - [`BitVector`]: width is a runtime value, for widths only known while
//!   reading a model. Binary operations check widths and fail with
//!   `WidthMismatch`.
//!
//! Stored values are always in `[0, 2^width)`. Signed operations reinterpret
//! the stored bits as two's complement; nothing else changes.

mod convert;
pub(crate) mod ops;
mod sized;
mod text;
mod vector;

pub use sized::Bv;
pub use vector::BitVector;

use std::fmt;
use std::str::FromStr;
use zwrap_core::{Result, ValueError};

/// Largest supported width, in bits.
pub const MAX_WIDTH: u32 = 1 << 24;

/// Byte order for byte-array conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endianness {
    /// Least significant byte first.
    #[default]
    Little,
    /// Most significant byte first.
    Big,
}

/// Format specifier accepted by `format`.
///
/// | Spec              | Output                       |
/// |-------------------|------------------------------|
/// | `""`, `V`, `VALUE`| `178`                        |
/// | `D`, `DECIMAL`    | `178 (8-bit)`                |
/// | `B`, `BINARY`     | `0b10110010 (8-bit)`         |
/// | `X`, `HEX`        | `0xB2 (8-bit)`               |
///
/// Matching is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BvFormat {
    /// Unsigned decimal value.
    #[default]
    Value,
    /// Decimal value with width suffix.
    Decimal,
    /// Binary, zero-padded to the width.
    Binary,
    /// Uppercase hex, zero-padded to `ceil(width / 4)` digits.
    Hex,
}

impl FromStr for BvFormat {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "" | "V" | "VALUE" => Ok(BvFormat::Value),
            "D" | "DECIMAL" => Ok(BvFormat::Decimal),
            "B" | "BINARY" => Ok(BvFormat::Binary),
            "X" | "HEX" => Ok(BvFormat::Hex),
            _ => Err(ValueError::format_error(format!(
                "Invalid format string: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for BvFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spec = match self {
            BvFormat::Value => "V",
            BvFormat::Decimal => "D",
            BvFormat::Binary => "B",
            BvFormat::Hex => "X",
        };
        f.write_str(spec)
    }
}

/// Reject widths outside `1..=MAX_WIDTH`.
pub(crate) fn check_width(width: u32) -> Result<()> {
    if width == 0 {
        return Err(ValueError::invalid_width(
            "BitVec size must be greater than zero",
        ));
    }
    if width > MAX_WIDTH {
        return Err(ValueError::invalid_width(format!(
            "BitVec size {} exceeds maximum {}",
            width, MAX_WIDTH
        )));
    }
    Ok(())
}
