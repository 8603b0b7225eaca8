//! Property-based tests for signing, verification, and encryption.
//!
//! One generated key is shared across cases; generating a fresh key per
//! case would dominate the runtime without exercising anything new.

use std::sync::OnceLock;

use keyfold_pgp::{
    Cert, KeyAlgorithm, clear_sign, decrypt, encrypt, extract_clearsigned, generate,
    sign_detached, verify_clearsigned, verify_detached,
};
use proptest::prelude::*;

static CERT: OnceLock<Cert> = OnceLock::new();

fn test_cert() -> &'static Cert {
    CERT.get_or_init(|| generate("Alice <alice@example.com>", KeyAlgorithm::Curve25519).unwrap())
}

/// Strategy producing arbitrary message payloads.
fn message_bytes() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..512)
}

/// Strategy producing post text already in canonical form: printable
/// lines without trailing whitespace and no trailing newline.
fn canonical_post() -> impl Strategy<Value = String> {
    proptest::collection::vec("[ -~]{0,40}", 0..8).prop_map(|lines| {
        let joined = lines
            .iter()
            .map(|line| line.trim_end())
            .collect::<Vec<_>>()
            .join("\n");
        joined.trim_end_matches('\n').to_string()
    })
}

#[test]
fn prop_detached_signatures_roundtrip() {
    proptest!(|(message in message_bytes())| {
        let cert = test_cert();
        let signature = sign_detached(cert, &message).unwrap();
        // PROPERTY: a signature made over a message verifies against it.
        prop_assert!(verify_detached(cert, &message, &signature).is_ok());
    });
}

#[test]
fn prop_detached_signatures_reject_bit_flips() {
    proptest!(|(
        message in proptest::collection::vec(any::<u8>(), 1..256),
        flip in any::<prop::sample::Index>(),
    )| {
        let cert = test_cert();
        let signature = sign_detached(cert, &message).unwrap();
        let mut tampered = message.clone();
        let index = flip.index(tampered.len());
        tampered[index] ^= 0x01;
        // PROPERTY: changing any byte of the message invalidates the signature.
        prop_assert!(verify_detached(cert, &tampered, &signature).is_err());
    });
}

#[test]
fn prop_clearsigned_posts_roundtrip() {
    proptest!(|(text in canonical_post())| {
        let cert = test_cert();
        let framed = clear_sign(cert, &text).unwrap();
        let block = extract_clearsigned(&framed).unwrap();
        // PROPERTY: extraction recovers the signed text exactly.
        prop_assert_eq!(&block.text, &text);
        // PROPERTY: the recovered block verifies against the signer.
        prop_assert!(verify_clearsigned(cert, &block).is_ok());
    });
}

#[test]
fn prop_clearsigned_posts_detect_tampering() {
    proptest!(|(text in canonical_post())| {
        let cert = test_cert();
        let framed = clear_sign(cert, &text).unwrap();
        let mut block = extract_clearsigned(&framed).unwrap();
        block.text.push('!');
        // PROPERTY: any appended character invalidates the signature.
        prop_assert!(verify_clearsigned(cert, &block).is_err());
    });
}

#[test]
fn prop_encrypted_messages_roundtrip() {
    proptest!(|(message in message_bytes())| {
        let cert = test_cert();
        let armored = encrypt(cert, &message).unwrap();
        // PROPERTY: the key owner recovers exactly the original bytes.
        prop_assert_eq!(decrypt(cert, &armored).unwrap(), message);
    });
}

#[test]
fn prop_extraction_is_total() {
    proptest!(|(input in any::<String>())| {
        // PROPERTY: junk input yields None rather than a panic.
        let _ = extract_clearsigned(&input);
    });
}
