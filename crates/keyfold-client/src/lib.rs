//! Keyfold Client
//!
//! The identity service for a message-board client: a zero-or-one key
//! store over a pluggable storage port, message encryption and signing
//! with the active key, and tri-state signature verification against a
//! directory of author keys.
//!
//! # Components
//!
//! - [`IdentityService`]: owns the active identity, persists it, and
//!   carries the encrypt/decrypt/sign operations
//! - [`Verifier`]: signature verification over a [`Directory`]
//!
//! Construction is explicit: [`IdentityService::open`] takes the storage
//! adapter and [`Verifier::new`] takes the directory. Tests run against
//! the in-memory fakes from [`keyfold_core`]; applications wire real
//! backends behind the same traits.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cipher;
mod error;
mod service;
mod signing;
mod verify;

pub use error::IdentityError;
pub use keyfold_core::{
    Directory, FileStorage, KeyPair, KeyStorage, LookupError, MemoryStorage, PublicKeyRecord,
    StaticDirectory, StorageError, UserInfo, VerificationResult, is_canonical_fingerprint,
    short_fingerprint,
};
pub use keyfold_pgp::{ClearsignedBlock, KeyAlgorithm, extract_clearsigned, issuer_key_id};
pub use service::IdentityService;
pub use verify::Verifier;
