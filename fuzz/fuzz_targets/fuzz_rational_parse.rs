//! Fuzz target for rational parsing and formatting
//!
//! Any string that parses must print back to a value that parses equal.

#![no_main]

use libfuzzer_sys::fuzz_target;
use zwrap_math::Rational;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Some(value) = Rational::try_parse(input) else {
        return;
    };

    let printed = value.to_string();
    assert_eq!(Rational::parse(&printed).ok(), Some(value.clone()));

    let smt = value.to_smtlib();
    assert_eq!(Rational::from_smtlib(&smt).ok(), Some(value.clone()));

    for spec in ["", "D", "F", "G"] {
        let _ = value.format(spec);
    }
});
