//! SMT-LIB text for model values.
//!
//! Solvers print models as `define-fun` entries whose values are SMT-LIB
//! literals. This module reads and writes those literals for [`Rational`]
//! and bit-vectors, and collects whole models into a [`Model`].
//!
//! ```
//! use zwrap_math::{Bv, Model, Rational};
//!
//! let model = Model::parse("(model (define-fun x () (_ BitVec 8) #x2a) (define-fun r () Real (/ 1 3)))")
//!     .expect("valid model");
//! assert_eq!(model.bv::<8>("x").expect("8-bit"), Bv::new(42));
//! assert_eq!(model.rational("r").expect("real").to_string(), "1/3");
//! assert_eq!(Rational::from(-5).to_smtlib(), "(- 5)");
//! ```
//!
//! [`Rational`]: crate::Rational

mod literal;
mod model;
mod sexp;

pub use model::{Model, ModelValue};
