//! Encrypt/decrypt flows through the identity service.

use keyfold_client::{IdentityError, IdentityService, KeyAlgorithm, MemoryStorage};

async fn alice() -> IdentityService<MemoryStorage> {
    let service = IdentityService::open(MemoryStorage::new()).await.unwrap();
    service
        .generate_identity("Alice", "alice@example.com", KeyAlgorithm::Curve25519)
        .await
        .unwrap();
    service
}

#[tokio::test]
async fn encrypt_decrypt_roundtrip_through_own_key() {
    let service = alice().await;
    let public = service.public_key().await.unwrap();

    let armored = service.encrypt("hello", &public).await.unwrap();
    assert!(armored.starts_with("-----BEGIN PGP MESSAGE-----"));
    assert_eq!(service.decrypt(&armored).await.unwrap(), "hello");
}

#[tokio::test]
async fn encrypt_works_without_an_active_identity() {
    let alice = alice().await;
    let empty = IdentityService::open(MemoryStorage::new()).await.unwrap();

    let armored = empty.encrypt("hello", &alice.public_key().await.unwrap()).await.unwrap();
    assert_eq!(alice.decrypt(&armored).await.unwrap(), "hello");
}

#[tokio::test]
async fn tampered_ciphertext_fails_recoverably() {
    let service = alice().await;
    let public = service.public_key().await.unwrap();
    let armored = service.encrypt("hello", &public).await.unwrap();

    // Flip one character in the middle of the armor body.
    let mut chars: Vec<char> = armored.chars().collect();
    let mid = chars.len() / 2;
    chars[mid] = if chars[mid] == 'A' { 'B' } else { 'A' };
    let tampered: String = chars.into_iter().collect();

    let err = service.decrypt(&tampered).await.unwrap_err();
    assert!(matches!(err, IdentityError::DecryptionFailed { .. }));
    assert!(err.is_recoverable());
}

#[tokio::test]
async fn decrypt_requires_an_active_identity() {
    let empty = IdentityService::open(MemoryStorage::new()).await.unwrap();
    let message = "-----BEGIN PGP MESSAGE-----\n\nwcDMA0I=\n-----END PGP MESSAGE-----";
    let err = empty.decrypt(message).await.unwrap_err();
    assert_eq!(err, IdentityError::NoActiveKey);
}

#[tokio::test]
async fn decrypt_rejects_non_message_input() {
    let service = alice().await;
    let err = service.decrypt("just some pasted text").await.unwrap_err();
    assert!(matches!(err, IdentityError::DecryptionFailed { .. }));
}

#[tokio::test]
async fn wrong_recipient_cannot_decrypt() {
    let alice = alice().await;
    let bob = IdentityService::open(MemoryStorage::new()).await.unwrap();
    bob.generate_identity("Bob", "bob@example.com", KeyAlgorithm::Curve25519).await.unwrap();

    let armored = bob.encrypt("for bob only", &bob.public_key().await.unwrap()).await.unwrap();
    let err = alice.decrypt(&armored).await.unwrap_err();
    assert!(matches!(err, IdentityError::DecryptionFailed { .. }));
}

#[tokio::test]
async fn encrypt_rejects_unparsable_recipient_keys() {
    let service = alice().await;
    let err = service.encrypt("hello", "not a key").await.unwrap_err();
    assert!(matches!(err, IdentityError::InvalidRecipientKey { .. }));
}

#[tokio::test]
async fn non_utf8_plaintext_is_a_decryption_failure() {
    let service = alice().await;
    let cert = keyfold_pgp::parse_cert(&service.public_key().await.unwrap()).unwrap();
    let armored = keyfold_pgp::encrypt(&cert, &[0x00, 0xff, 0xfe, 0x80]).unwrap();

    let err = service.decrypt(&armored).await.unwrap_err();
    assert!(matches!(err, IdentityError::DecryptionFailed { .. }));
}
