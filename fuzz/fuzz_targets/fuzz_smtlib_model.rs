//! Fuzz target for SMT-LIB model parsing
//!
//! Arbitrary text must never panic the reader, and any model it accepts
//! must survive a print/parse round trip.

#![no_main]

use libfuzzer_sys::fuzz_target;
use zwrap_math::Model;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(model) = Model::parse(input) else {
        return;
    };

    let printed = model.to_smtlib();
    let reparsed = Model::parse(&printed);
    assert_eq!(reparsed.ok().as_ref(), Some(&model), "round trip failed for {printed}");

    for (name, _) in model.iter() {
        let _ = model.rational(name);
        let _ = model.bitvector(name);
    }
});
