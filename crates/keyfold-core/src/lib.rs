//! Keyfold Core
//!
//! Domain model and ports for the keyfold identity layer. This crate knows
//! nothing about OpenPGP packet formats; it defines the shapes the rest of
//! the workspace agrees on:
//!
//! - the identity data model ([`KeyPair`], [`UserInfo`], [`PublicKeyRecord`],
//!   [`VerificationResult`]) and the canonical-fingerprint rules,
//! - armored-text normalization for key material pasted from mail clients,
//!   terminals, and HTML forms,
//! - the persistence port ([`KeyStorage`]) the identity store saves its
//!   single record through, with in-memory and file-backed adapters,
//! - the directory port ([`Directory`]) the verifier fetches author keys
//!   through, with a map-backed stub for tests and offline tooling.
//!
//! # Trust model
//!
//! A fingerprint carried inside a [`PublicKeyRecord`] is a *claim* used for
//! indexing. Every fingerprint this layer stores or displays is recomputed
//! from key material; trust derives only from signature verification against
//! the record's key bytes, never from the claimed fingerprint.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod armor;
pub mod directory;
pub mod identity;
pub mod storage;

pub use directory::{Directory, LookupError, StaticDirectory};
pub use identity::{
    KeyPair, PublicKeyRecord, UserInfo, VerificationResult, is_canonical_fingerprint,
    short_fingerprint,
};
pub use storage::{FileStorage, KeyStorage, MemoryStorage, StorageError};
