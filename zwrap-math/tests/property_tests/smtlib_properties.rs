//! Property-based tests for SMT-LIB literals

use proptest::prelude::*;
use zwrap_math::{BitVector, Model, Rational};

proptest! {
    /// Rational literals read back to the same value
    #[test]
    fn rational_literal_round_trip(n in -100_000i64..100_000, d in 1i64..100_000) {
        let r = Rational::new(n, d).expect("non-zero");
        prop_assert_eq!(Rational::from_smtlib(&r.to_smtlib()).expect("round trip"), r);
    }

    /// Bit-vector literals keep both width and value
    #[test]
    fn bitvector_literal_round_trip(v in any::<u64>(), w in 1u32..=64) {
        let bv = BitVector::new(v, w).expect("valid width");
        prop_assert_eq!(BitVector::from_smtlib(&bv.to_smtlib()).expect("round trip"), bv);
    }

    /// Printed models parse back unchanged
    #[test]
    fn model_round_trip(values in proptest::collection::vec((any::<i32>(), 1i64..50), 0..8)) {
        let mut model = Model::new();
        for (i, (n, d)) in values.iter().enumerate() {
            model.insert(format!("r{}", i), Rational::new(*n, *d).expect("non-zero")).expect("valid name");
            model.insert(format!("v{}", i), BitVector::new(*n, 12).expect("valid")).expect("valid name");
        }
        prop_assert_eq!(Model::parse(&model.to_smtlib()).expect("round trip"), model);
    }
}
