//! Fuzz target for armor normalization
//!
//! This fuzzer feeds arbitrary pasted text through `normalize` to find:
//! - Panics on unusual Unicode or control characters
//! - Inputs where normalization is not idempotent
//! - Outputs that still carry carriage returns or doubled blank lines
//! - Leading or trailing whitespace surviving the trim
//!
//! The fuzzer should NEVER panic. Every input maps to a parser-ready form.

#![no_main]

use libfuzzer_sys::fuzz_target;
use keyfold_core::armor::normalize;

fuzz_target!(|input: String| {
    let once = normalize(&input);

    // A second pass must not change anything
    assert_eq!(normalize(&once), once);

    // Line endings are unified and runs of blank lines are collapsed
    assert!(!once.contains('\r'));
    assert!(!once.contains("\n\n\n"));

    // No surrounding whitespace remains
    assert_eq!(once.trim(), once);
});
