//! zwrap Core - errors and configuration for the solver value types
//!
//! This crate holds the vocabulary shared by the zwrap crates:
//! - [`ValueError`], the error taxonomy of every value operation
//! - [`ErrorContext`] and [`ResultExt`] for layering context onto failures
//! - [`Config`], [`RoundingMode`] and [`HexPadding`] for formatting defaults
//!
//! # Examples
//!
//! ```
//! use zwrap_core::{Config, ErrorKind, ResultExt, RoundingMode, ValueError};
//!
//! let config = Config::new().with_rounding(RoundingMode::AwayFromZero);
//! assert!(config.validate().is_ok());
//!
//! let failed: Result<(), ValueError> = Err(ValueError::division_by_zero());
//! let err = failed.context("while evaluating x / y").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::DivisionByZero);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod error_context;

pub use config::{Config, HexPadding, MAX_DECIMAL_PLACES, RoundingMode};
pub use error::{ErrorKind, Result, ValueError};
pub use error_context::{ContextResult, ErrorContext, ResultExt};
