//! Property-based tests for zwrap-math
//!
//! This module contains property tests for:
//! - Rational canonical form, arithmetic laws, rounding and round-trips
//! - Bit-vector modular closure, signed reinterpretation and width changes
//! - SMT-LIB literal round-trips

mod bitvec_properties;
mod rational_properties;
mod smtlib_properties;
