//! Service-level error taxonomy.
//!
//! These are the errors the application matches on. Lower layers report
//! through [`keyfold_core::StorageError`] and [`keyfold_pgp::PgpError`];
//! this enum maps the cases with distinct user-facing meaning (bad import
//! input, missing identity, rejected recipient, failed decrypt) and wraps
//! the rest.

use keyfold_core::StorageError;
use keyfold_pgp::PgpError;
use thiserror::Error;

/// Errors surfaced by the identity service and its message operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Import input does not contain a PGP private key block at all.
    #[error("input is not a PGP private key block")]
    InvalidKeyFormat,

    /// A private key block was present but its material does not parse.
    #[error("private key does not parse: {reason}")]
    UnparsableKey {
        /// Parser-reported reason.
        reason: String,
    },

    /// Decrypt or sign was called while no identity is loaded.
    #[error("no active key is loaded")]
    NoActiveKey,

    /// The recipient key handed to encrypt was rejected.
    #[error("recipient key rejected: {reason}")]
    InvalidRecipientKey {
        /// Parse or capability failure reason.
        reason: String,
    },

    /// A ciphertext could not be decrypted with the active key.
    #[error("decryption failed: {reason}")]
    DecryptionFailed {
        /// Underlying failure reason.
        reason: String,
    },

    /// The storage adapter failed.
    #[error("storage error: {0}")]
    Storage(StorageError),

    /// An OpenPGP primitive failed outside the mapped cases above.
    #[error("pgp error: {0}")]
    Pgp(PgpError),
}

impl IdentityError {
    /// Returns true if the caller can continue with degraded output.
    ///
    /// Only decryption failures qualify: the expected fallback is showing
    /// the raw ciphertext. Everything else means the operation did not
    /// happen and must not be papered over.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DecryptionFailed { .. })
    }
}

/// Storage failures pass through typed; the service cannot do better.
impl From<StorageError> for IdentityError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

/// Primitive failures the service does not remap pass through typed.
impl From<PgpError> for IdentityError {
    fn from(err: PgpError) -> Self {
        Self::Pgp(err)
    }
}
