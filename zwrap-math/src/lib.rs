//! zwrap Math - exact value types for solver models
//!
//! This crate provides the concrete values an SMT model assigns to
//! constants:
//! - [`Rational`]: arbitrary-precision fractions kept in lowest terms, with
//!   exact arithmetic, rounding, decimal conversion and parsing
//! - [`Bv<N>`] and [`BitVector`]: fixed-width bit-vectors with wrapping
//!   arithmetic, signed and unsigned division, shifts, rotations and width
//!   changes, mirroring SMT-LIB `QF_BV` semantics
//! - [`Model`]: reading and writing SMT-LIB model output
//!
//! Errors are [`zwrap_core::ValueError`]; formatting defaults come from
//! [`zwrap_core::Config`].
//!
//! # Examples
//!
//! ```
//! use zwrap_math::{Bv, Rational};
//!
//! let sum = Rational::parse("1/3").unwrap() + Rational::parse("1/6").unwrap();
//! assert_eq!(sum.to_string(), "1/2");
//!
//! let x = Bv::<8>::new(128);
//! assert_eq!(x.div(&Bv::new(2), true).unwrap(), Bv::new(192));
//! assert_eq!(x.to_i32(true).unwrap(), -128);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod bitvec;
pub mod rational;
pub mod smtlib;

pub use bitvec::{BitVector, Bv, BvFormat, Endianness, MAX_WIDTH};
pub use rational::{Rational, RationalFormat};
pub use smtlib::{Model, ModelValue};
