//! Error type for OpenPGP operations.

use thiserror::Error;

/// Errors raised by the OpenPGP backend.
///
/// Backend errors are flattened to strings at this boundary. Callers react
/// to which operation failed, not to packet-level detail, and the
/// underlying error types are neither `Clone` nor `PartialEq`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PgpError {
    /// Key material or armor could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// Key generation failed
    #[error("key generation error: {0}")]
    Generate(String),

    /// A certificate could not be serialized or armored
    #[error("armor error: {0}")]
    Armor(String),

    /// Encryption failed
    #[error("encrypt error: {0}")]
    Encrypt(String),

    /// Decryption failed
    #[error("decrypt error: {0}")]
    Decrypt(String),

    /// Signing failed
    #[error("sign error: {0}")]
    Sign(String),

    /// The signature did not check out against the given certificate
    #[error("verify error: {0}")]
    Verify(String),

    /// The certificate has no encryption-capable key
    #[error("no encryption-capable key in certificate")]
    NoEncryptionKey,
}
