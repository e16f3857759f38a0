//! Hex, binary and decimal text for bit-vectors.

use super::BvFormat;
use super::ops;
use num_bigint::BigUint;
use zwrap_core::{HexPadding, Result, ValueError};

/// Hex digits needed to show `width` bits.
pub(crate) fn hex_digits(width: u32) -> usize {
    width.div_ceil(4) as usize
}

/// Strip a two-character radix prefix, ignoring case.
fn strip_radix_prefix<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    match s.get(..2) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => s.get(2..),
        _ => None,
    }
}

pub(crate) fn parse_hex(hex: &str, width: u32) -> Result<BigUint> {
    if hex.trim().is_empty() {
        return Err(ValueError::invalid_argument(
            "Hex string cannot be null or empty",
        ));
    }
    let digits = strip_radix_prefix(hex, "0x").unwrap_or(hex);
    let max = hex_digits(width);
    if digits.len() > max {
        return Err(ValueError::invalid_argument(format!(
            "Hex string length {} exceeds maximum {} digits for {}-bit bitvector",
            digits.len(),
            max,
            width
        )));
    }
    let invalid = || ValueError::invalid_argument(format!("Invalid hexadecimal string: {}", hex));
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let value = BigUint::parse_bytes(digits.as_bytes(), 16).ok_or_else(invalid)?;
    Ok(ops::truncate(value, width))
}

pub(crate) fn parse_binary(binary: &str, width: u32) -> Result<BigUint> {
    if binary.trim().is_empty() {
        return Err(ValueError::invalid_argument(
            "Binary string cannot be null or empty",
        ));
    }
    let digits = strip_radix_prefix(binary, "0b").unwrap_or(binary);
    if digits.len() > width as usize {
        return Err(ValueError::invalid_argument(format!(
            "Binary string length {} exceeds maximum {} bits for {}-bit bitvector",
            digits.len(),
            width,
            width
        )));
    }
    if let Some(c) = digits.chars().find(|c| *c != '0' && *c != '1') {
        return Err(ValueError::invalid_argument(format!(
            "Invalid binary character '{}' in string: {}",
            c, binary
        )));
    }
    BigUint::parse_bytes(digits.as_bytes(), 2).ok_or_else(|| {
        ValueError::invalid_argument(format!("Invalid binary string: {}", binary))
    })
}

/// Parse anything `render` produces: a decimal value, `0x…` or `0b…`,
/// optionally followed by a ` (N-bit)` suffix that must match `width`.
pub(crate) fn parse_any(text: &str, width: u32) -> Result<BigUint> {
    let trimmed = text.trim();
    let body = match trimmed.strip_suffix("-bit)") {
        Some(rest) => {
            let (body, declared) = rest.rsplit_once('(').ok_or_else(|| {
                ValueError::format_error(format!("Invalid bit-vector string: {}", text))
            })?;
            let declared: u32 = declared.parse().map_err(|_| {
                ValueError::format_error(format!("Invalid bit-vector string: {}", text))
            })?;
            if declared != width {
                return Err(ValueError::width_mismatch(declared, width));
            }
            body.trim_end()
        }
        None => trimmed,
    };

    if strip_radix_prefix(body, "0x").is_some() {
        return parse_hex(body, width);
    }
    if strip_radix_prefix(body, "0b").is_some() {
        return parse_binary(body, width);
    }

    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValueError::format_error(format!(
            "Invalid bit-vector string: {}",
            text
        )));
    }
    let value = BigUint::parse_bytes(body.as_bytes(), 10).ok_or_else(|| {
        ValueError::format_error(format!("Invalid bit-vector string: {}", text))
    })?;
    if value.bits() > u64::from(width) {
        return Err(ValueError::invalid_argument(format!(
            "Value {} does not fit in {}-bit bitvector",
            value, width
        )));
    }
    Ok(value)
}

pub(crate) fn binary_string(value: &BigUint, width: u32) -> String {
    format!("{:0>w$}", value.to_str_radix(2), w = width as usize)
}

pub(crate) fn hex_string(value: &BigUint, width: u32, padding: HexPadding) -> String {
    let hex = value.to_str_radix(16).to_ascii_uppercase();
    match padding {
        HexPadding::Full => format!("{:0>w$}", hex, w = hex_digits(width)),
        HexPadding::Trimmed => hex,
    }
}

pub(crate) fn render(value: &BigUint, width: u32, format: BvFormat, padding: HexPadding) -> String {
    match format {
        BvFormat::Value => value.to_string(),
        BvFormat::Decimal => format!("{} ({}-bit)", value, width),
        BvFormat::Binary => format!("0b{} ({}-bit)", binary_string(value, width), width),
        BvFormat::Hex => format!("0x{} ({}-bit)", hex_string(value, width, padding), width),
    }
}
