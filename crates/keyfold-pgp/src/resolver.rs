//! Canonical fingerprint resolution.
//!
//! A certificate carries several keys: a primary plus capability-scoped
//! subkeys. Peers and directories address the whole identity by a single
//! 16-hex-char key ID, so every component must pick the same key. The
//! rule, in order:
//!
//! 1. the first valid encryption-capable subkey (transport or storage),
//! 2. else the first valid signing-capable subkey,
//! 3. else the primary key.
//!
//! "First" means certificate order, which is stable for a given cert. The
//! `keyfold-fingerprint` binary exists to let other implementations check
//! their resolution against this one.

use sequoia_openpgp as openpgp;

use openpgp::policy::StandardPolicy;
use openpgp::{Cert, KeyID};

/// Canonical fingerprint of `cert`: 16 lowercase hex characters.
pub fn canonical_fingerprint(cert: &Cert) -> String {
    let policy = StandardPolicy::new();

    if let Some(key) = cert
        .keys()
        .with_policy(&policy, None)
        .supported()
        .alive()
        .revoked(false)
        .subkeys()
        .for_transport_encryption()
        .for_storage_encryption()
        .next()
    {
        return key_id_hex(key.key().keyid());
    }

    if let Some(key) = cert
        .keys()
        .with_policy(&policy, None)
        .supported()
        .alive()
        .revoked(false)
        .subkeys()
        .for_signing()
        .next()
    {
        return key_id_hex(key.key().keyid());
    }

    key_id_hex(cert.keyid())
}

/// Lowercase 16-hex-char form of a key ID.
pub fn key_id_hex(id: KeyID) -> String {
    id.to_hex().to_lowercase()
}

/// True if any valid subkey of `cert` carries an encryption capability.
pub fn has_encryption_subkey(cert: &Cert) -> bool {
    let policy = StandardPolicy::new();
    cert.keys()
        .with_policy(&policy, None)
        .supported()
        .alive()
        .revoked(false)
        .subkeys()
        .for_transport_encryption()
        .for_storage_encryption()
        .next()
        .is_some()
}

/// True if any valid subkey of `cert` carries the signing capability.
pub fn has_signing_subkey(cert: &Cert) -> bool {
    let policy = StandardPolicy::new();
    cert.keys()
        .with_policy(&policy, None)
        .supported()
        .alive()
        .revoked(false)
        .subkeys()
        .for_signing()
        .next()
        .is_some()
}
