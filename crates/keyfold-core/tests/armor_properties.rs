//! Property-based tests for armor text normalization
//!
//! These tests verify normalization invariants for ALL pasted inputs, not
//! just specific examples. Uses proptest to assemble adversarial mixes of
//! line endings, blank runs, and armor fragments.

use keyfold_core::armor::normalize;
use proptest::prelude::*;

/// Strategy for fragments that show up in pasted key material
fn pasted_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("\r\n".to_string()),
        Just("\n".to_string()),
        Just("\r".to_string()),
        Just(" ".to_string()),
        Just("\t".to_string()),
        Just("-----BEGIN PGP PUBLIC KEY BLOCK-----".to_string()),
        Just("-----END PGP PUBLIC KEY BLOCK-----".to_string()),
        "[A-Za-z0-9+/=]{1,16}",
    ]
}

/// Strategy for whole pasted blobs assembled from fragments
fn pasted_text() -> impl Strategy<Value = String> {
    prop::collection::vec(pasted_fragment(), 0..32).prop_map(|parts| parts.concat())
}

#[test]
fn prop_normalize_is_idempotent() {
    proptest!(|(input in pasted_text())| {
        let once = normalize(&input);
        let twice = normalize(&once);

        // PROPERTY: Normalizing an already-normalized text changes nothing
        prop_assert_eq!(twice, once, "normalization not idempotent");
    });
}

#[test]
fn prop_normalize_is_idempotent_for_arbitrary_unicode() {
    proptest!(|(input in any::<String>())| {
        let once = normalize(&input);
        let twice = normalize(&once);

        // PROPERTY: Idempotence holds for arbitrary unicode, not just armor
        prop_assert_eq!(twice, once, "normalization not idempotent");
    });
}

#[test]
fn prop_normalize_output_has_unix_line_endings() {
    proptest!(|(input in pasted_text())| {
        let output = normalize(&input);

        // PROPERTY: No carriage returns survive normalization
        prop_assert!(!output.contains('\r'), "CR survived in {:?}", output);
    });
}

#[test]
fn prop_normalize_collapses_blank_runs() {
    proptest!(|(input in pasted_text())| {
        let output = normalize(&input);

        // PROPERTY: At most one blank line between any two content lines
        prop_assert!(!output.contains("\n\n\n"), "blank run survived in {:?}", output);
    });
}

#[test]
fn prop_normalize_output_is_trimmed() {
    proptest!(|(input in pasted_text())| {
        let output = normalize(&input);

        // PROPERTY: No leading or trailing whitespace
        prop_assert_eq!(output.trim(), output.as_str(), "output not trimmed");
    });
}

#[test]
fn prop_normalize_preserves_non_whitespace_content() {
    proptest!(|(input in pasted_text())| {
        let output = normalize(&input);

        let before: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        let after: String = output.chars().filter(|c| !c.is_whitespace()).collect();

        // PROPERTY: Normalization only rewrites whitespace
        prop_assert_eq!(after, before, "non-whitespace content changed");
    });
}
