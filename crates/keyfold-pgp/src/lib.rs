//! Keyfold OpenPGP Backend
//!
//! Wraps `sequoia-openpgp` behind the handful of operations the identity
//! layer needs: key generation and parsing, canonical fingerprint
//! resolution, message encryption, and detached plus cleartext signatures.
//!
//! Everything here is synchronous and CPU-bound. Async callers run the
//! expensive operations (key generation in particular) on a blocking pool.
//!
//! The public surface deals in [`Cert`]s, byte slices, and armored
//! strings. No other `sequoia-openpgp` type appears in a signature, so the
//! rest of the workspace never touches packet-level APIs.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cipher;
pub mod error;
pub mod keys;
pub mod resolver;
pub mod sign;
pub mod verify;

pub use sequoia_openpgp::Cert;

pub use cipher::{decrypt, encrypt};
pub use error::PgpError;
pub use keys::{
    KeyAlgorithm, format_user_id, generate, parse_cert, parse_secret_cert, parse_user_id,
    primary_user_id, public_armor, secret_armor,
};
pub use resolver::{canonical_fingerprint, has_encryption_subkey, has_signing_subkey, key_id_hex};
pub use sign::{CLEARSIGN_HEADER, clear_sign, sign_detached};
pub use verify::{
    ClearsignedBlock, extract_clearsigned, issuer_key_id, verify_clearsigned, verify_detached,
};
