//! Message encryption and decryption.
//!
//! Encryption needs only the recipient's public key and works without a
//! loaded identity; decryption needs the active private key.

use keyfold_core::{KeyStorage, armor};
use keyfold_pgp::PgpError;

use crate::error::IdentityError;
use crate::service::IdentityService;

impl<S: KeyStorage> IdentityService<S> {
    /// Encrypts `plaintext` to a recipient's armored public key.
    ///
    /// The recipient armor is normalized before parsing; a key that does
    /// not parse, or that has no encryption-capable key, is
    /// [`IdentityError::InvalidRecipientKey`].
    pub async fn encrypt(
        &self,
        plaintext: &str,
        recipient_public_key_armored: &str,
    ) -> Result<String, IdentityError> {
        let normalized = armor::normalize(recipient_public_key_armored);
        let recipient = keyfold_pgp::parse_cert(&normalized)
            .map_err(|err| IdentityError::InvalidRecipientKey { reason: err.to_string() })?;
        keyfold_pgp::encrypt(&recipient, plaintext.as_bytes()).map_err(|err| match err {
            err @ PgpError::NoEncryptionKey => {
                IdentityError::InvalidRecipientKey { reason: err.to_string() }
            }
            other => IdentityError::Pgp(other),
        })
    }

    /// Decrypts an armored message with the active private key.
    ///
    /// Fails with [`IdentityError::NoActiveKey`] when no identity is
    /// loaded. Every other failure, including non-UTF-8 plaintext, is the
    /// recoverable [`IdentityError::DecryptionFailed`]: callers fall back
    /// to showing the raw ciphertext.
    pub async fn decrypt(&self, armored_message: &str) -> Result<String, IdentityError> {
        let cert = self.active_cert().await.ok_or(IdentityError::NoActiveKey)?;
        if !armor::is_encrypted_message(armored_message) {
            return Err(IdentityError::DecryptionFailed {
                reason: "input is not a PGP message".to_string(),
            });
        }
        let plaintext = keyfold_pgp::decrypt(&cert, armored_message)
            .map_err(|err| IdentityError::DecryptionFailed { reason: err.to_string() })?;
        String::from_utf8(plaintext).map_err(|_| IdentityError::DecryptionFailed {
            reason: "decrypted payload is not valid UTF-8".to_string(),
        })
    }
}
