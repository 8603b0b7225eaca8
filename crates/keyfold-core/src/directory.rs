//! Directory port for resolving peer public keys.
//!
//! Verification needs the claimed author's public key. Where that key comes
//! from (a bulletin board's user registry, a local contact list) is behind
//! [`Directory`]; the verifier only sees fingerprint in, record out.

use std::{collections::HashMap, sync::Arc};

use thiserror::Error;
use tokio::sync::Mutex;

use crate::identity::PublicKeyRecord;

/// Errors raised by directory lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No entry is filed under the fingerprint
    #[error("no key found for fingerprint {fingerprint}")]
    NotFound {
        /// Fingerprint that was looked up
        fingerprint: String,
    },

    /// The fingerprint is not in canonical form
    #[error("invalid fingerprint: {fingerprint}")]
    InvalidFingerprint {
        /// The rejected input
        fingerprint: String,
    },

    /// The backing service failed
    #[error("directory backend error: {0}")]
    Backend(String),
}

/// Resolves canonical fingerprints to public key records.
///
/// Implementations may be remote and slow; callers bound each lookup with
/// their own timeout. A returned record is a claim, not proof: the verifier
/// still checks the signature against the key material itself.
pub trait Directory: Clone + Send + Sync + 'static {
    /// Looks up the public key record filed under `fingerprint`.
    fn lookup(
        &self,
        fingerprint: &str,
    ) -> impl std::future::Future<Output = Result<PublicKeyRecord, LookupError>> + Send;
}

/// Fixed in-memory directory for tests and single-process setups.
#[derive(Clone, Default)]
pub struct StaticDirectory {
    entries: Arc<Mutex<HashMap<String, PublicKeyRecord>>>,
}

impl StaticDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Files `record` under its fingerprint, replacing any previous entry.
    pub async fn insert(&self, record: PublicKeyRecord) {
        self.entries.lock().await.insert(record.fingerprint.clone(), record);
    }
}

impl Directory for StaticDirectory {
    async fn lookup(&self, fingerprint: &str) -> Result<PublicKeyRecord, LookupError> {
        let entries = self.entries.lock().await;
        entries
            .get(fingerprint)
            .cloned()
            .ok_or_else(|| LookupError::NotFound { fingerprint: fingerprint.to_string() })
    }
}
