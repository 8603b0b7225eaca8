//! Fuzz target for cleartext block extraction
//!
//! Every displayed post runs through `extract_clearsigned` before any
//! verification, so it sees text written by arbitrary board users. This
//! fuzzer looks for:
//! - Panics on truncated or interleaved armor markers
//! - Blocks accepted without a complete signature frame
//! - Out-of-bounds slicing while undoing dash-escaping
//!
//! The fuzzer should NEVER panic. Incomplete blocks must yield `None`, and
//! an extracted signature must keep its full armor frame.

#![no_main]

use libfuzzer_sys::fuzz_target;
use keyfold_pgp::extract_clearsigned;

fuzz_target!(|input: String| {
    if let Some(block) = extract_clearsigned(&input) {
        let signature = &block.signature_armored;
        assert!(signature.starts_with("-----BEGIN PGP SIGNATURE-----"));
        assert!(signature.trim_end().ends_with("-----END PGP SIGNATURE-----"));
    }
});
