//! Fuzz target for public key parsing
//!
//! Directory lookups and pasted recipient keys hand untrusted armor to
//! `parse_cert`. This fuzzer throws arbitrary bytes at that path to find:
//! - Panics in armor decoding or packet parsing
//! - Certificates that parse but resolve to a malformed fingerprint
//! - Integer overflows in packet length handling
//!
//! The fuzzer should NEVER panic. All invalid inputs should return an error,
//! and every certificate that parses must resolve to a canonical fingerprint.

#![no_main]

use libfuzzer_sys::fuzz_target;
use keyfold_core::is_canonical_fingerprint;
use keyfold_pgp::{canonical_fingerprint, parse_cert};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    // Parsing may fail, but success must yield a well-formed fingerprint
    if let Ok(cert) = parse_cert(input) {
        assert!(is_canonical_fingerprint(&canonical_fingerprint(&cert)));
    }
});
