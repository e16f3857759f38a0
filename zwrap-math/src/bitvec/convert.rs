//! Fixed-width integer and byte-array conversions.

use super::Endianness;
use super::ops;
use num_bigint::{BigInt, BigUint};
use zwrap_core::{Result, ValueError};

/// Bytes needed to hold `width` bits.
pub(crate) fn byte_len(width: u32) -> usize {
    width.div_ceil(8) as usize
}

/// Signed or unsigned reading converted to a primitive integer.
///
/// `type_name` is the name used in the overflow message.
pub(crate) fn to_fixed<T>(value: &BigUint, width: u32, signed: bool, type_name: &str) -> Result<T>
where
    T: for<'a> TryFrom<&'a BigInt>,
{
    let integer = ops::to_integer(value, width, signed);
    T::try_from(&integer).map_err(|_| {
        tracing::debug!(value = %integer, width, signed, to = type_name, "bit-vector conversion out of range");
        ValueError::overflow(format!(
            "{} value {} is outside the range of {}",
            if signed { "Signed" } else { "Unsigned" },
            integer,
            type_name
        ))
    })
}

/// Read up to `ceil(width / 8)` bytes. Bits beyond `width` are dropped.
pub(crate) fn from_bytes(bytes: &[u8], width: u32, endianness: Endianness) -> Result<BigUint> {
    let max = byte_len(width);
    if bytes.len() > max {
        return Err(ValueError::invalid_argument(format!(
            "Byte array length {} exceeds maximum {} bytes for {}-bit bitvector",
            bytes.len(),
            max,
            width
        )));
    }
    let value = match endianness {
        Endianness::Little => BigUint::from_bytes_le(bytes),
        Endianness::Big => BigUint::from_bytes_be(bytes),
    };
    Ok(ops::truncate(value, width))
}

/// Exactly `ceil(width / 8)` bytes.
pub(crate) fn to_bytes(value: &BigUint, width: u32, endianness: Endianness) -> Vec<u8> {
    let mut bytes = value.to_bytes_le();
    bytes.resize(byte_len(width), 0);
    if endianness == Endianness::Big {
        bytes.reverse();
    }
    bytes
}

/// Write `ceil(width / 8)` bytes to the front of `dest`.
pub(crate) fn copy_to(
    value: &BigUint,
    width: u32,
    dest: &mut [u8],
    endianness: Endianness,
) -> Result<()> {
    let bytes = to_bytes(value, width, endianness);
    let Some(target) = dest.get_mut(..bytes.len()) else {
        return Err(ValueError::invalid_argument(format!(
            "Destination span length {} is too small for {} bytes",
            dest.len(),
            bytes.len()
        )));
    };
    target.copy_from_slice(&bytes);
    Ok(())
}
