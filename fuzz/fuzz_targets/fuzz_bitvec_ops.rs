//! Fuzz target for bit-vector operations
//!
//! Applies random operation sequences and checks every result stays
//! inside its width.

#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;
use zwrap_core::ErrorKind;
use zwrap_math::BitVector;

#[derive(Debug, Arbitrary)]
enum BvOp {
    Add,
    Sub,
    Mul,
    And,
    Or,
    Xor,
    Neg,
    Not,
    UDiv,
    SDiv,
    URem,
    SRem,
    SMod,
    Shl(i8),
    LShr(i8),
    AShr(i8),
    RotL(i8),
    RotR(i8),
}

#[derive(Debug, Arbitrary)]
struct Step {
    op: BvOp,
    operand: u64,
}

fn apply(acc: &BitVector, step: &Step) -> Option<BitVector> {
    let other = BitVector::new(step.operand, acc.width()).ok()?;
    let result = match step.op {
        BvOp::Add => acc.checked_add(&other),
        BvOp::Sub => acc.checked_sub(&other),
        BvOp::Mul => acc.checked_mul(&other),
        BvOp::And => acc.checked_and(&other),
        BvOp::Or => acc.checked_or(&other),
        BvOp::Xor => acc.checked_xor(&other),
        BvOp::Neg => Ok(acc.wrapping_neg()),
        BvOp::Not => Ok(acc.complement()),
        BvOp::UDiv => acc.div(&other, false),
        BvOp::SDiv => acc.div(&other, true),
        BvOp::URem => acc.rem(&other, false),
        BvOp::SRem => acc.rem(&other, true),
        BvOp::SMod => acc.smod(&other),
        BvOp::Shl(k) => acc.shl(i64::from(k)),
        BvOp::LShr(k) => acc.shr(i64::from(k), false),
        BvOp::AShr(k) => acc.shr(i64::from(k), true),
        BvOp::RotL(k) => acc.rotate_left(i64::from(k)),
        BvOp::RotR(k) => acc.rotate_right(i64::from(k)),
    };

    match result {
        Ok(value) => Some(value),
        Err(err) => {
            let expected = matches!(
                (&step.op, err.kind()),
                (
                    BvOp::UDiv | BvOp::SDiv | BvOp::URem | BvOp::SRem | BvOp::SMod,
                    ErrorKind::DivisionByZero
                ) | (
                    BvOp::Shl(_) | BvOp::LShr(_) | BvOp::AShr(_) | BvOp::RotL(_) | BvOp::RotR(_),
                    ErrorKind::InvalidArgument
                )
            );
            assert!(expected, "unexpected error {err} for {step:?}");
            None
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let mut unstructured = Unstructured::new(data);

    let width: u32 = match unstructured.int_in_range(1..=200u32) {
        Ok(w) => w,
        Err(_) => return,
    };
    let start: u64 = match unstructured.arbitrary() {
        Ok(v) => v,
        Err(_) => return,
    };
    let Ok(mut acc) = BitVector::new(start, width) else {
        return;
    };
    let bound = BigUint::from(1u8) << width;

    for _ in 0..32 {
        let Ok(step) = unstructured.arbitrary::<Step>() else {
            break;
        };
        if let Some(next) = apply(&acc, &step) {
            assert_eq!(next.width(), width);
            assert!(next.value() < &bound);
            acc = next;
        }
    }

    let text = acc.to_hex_string();
    assert_eq!(BitVector::from_hex(&text, width).ok(), Some(acc));
});
