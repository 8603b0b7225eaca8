//! Signature verification against directory-resolved author keys.
//!
//! Outcomes are a strict tri-state, never an error: a check that passed,
//! a check that completed and failed, and the case where no check could
//! be attempted because the author's key never materialized. The caller
//! must render those differently; "could not fetch the key" is not an
//! accusation of forgery.

use std::time::Duration;

use keyfold_core::{Directory, VerificationResult, armor, is_canonical_fingerprint};
use keyfold_pgp::{Cert, ClearsignedBlock};

/// Verifies signatures against author keys resolved through a directory.
///
/// Holds no key state. Every failure on the way to the author's parsed
/// certificate (non-canonical fingerprint, lookup error, timeout,
/// unparsable candidate key) folds into [`VerificationResult::Unknown`];
/// once the certificate is in hand, any completed check that does not
/// pass is [`VerificationResult::Failed`].
#[derive(Clone)]
pub struct Verifier<D: Directory> {
    directory: D,
}

impl<D: Directory> Verifier<D> {
    /// Creates a verifier over `directory`.
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// Checks a detached signature over `data` against the claimed author.
    pub async fn verify_detached(
        &self,
        data: &[u8],
        signature_armored: &str,
        author_fingerprint: &str,
        timeout: Duration,
    ) -> VerificationResult {
        let Some(author) = self.author_cert(author_fingerprint, timeout).await else {
            return VerificationResult::Unknown;
        };
        match keyfold_pgp::verify_detached(&author, data, signature_armored) {
            Ok(()) => VerificationResult::Verified,
            Err(err) => {
                tracing::debug!("Signature check failed for {}: {}", author_fingerprint, err);
                VerificationResult::Failed
            }
        }
    }

    /// Checks a clearsigned block, returning the display text alongside
    /// the verification outcome.
    ///
    /// Extraction always succeeds independently of verification: a
    /// malformed block comes back as the input text with `Unknown`, a
    /// well-formed one as the unescaped framed text with whatever the
    /// signature check produced. Display never waits on, or varies with,
    /// the cryptography.
    pub async fn verify_clearsigned(
        &self,
        block: &str,
        author_fingerprint: &str,
        timeout: Duration,
    ) -> (String, VerificationResult) {
        let Some(extracted) = keyfold_pgp::extract_clearsigned(block) else {
            return (block.to_string(), VerificationResult::Unknown);
        };
        let Some(author) = self.author_cert(author_fingerprint, timeout).await else {
            return (extracted.text, VerificationResult::Unknown);
        };
        let result = match keyfold_pgp::verify_clearsigned(&author, &extracted) {
            Ok(()) => VerificationResult::Verified,
            Err(err) => {
                tracing::debug!("Clearsign check failed for {}: {}", author_fingerprint, err);
                VerificationResult::Failed
            }
        };
        let ClearsignedBlock { text, .. } = extracted;
        (text, result)
    }

    /// Resolves the claimed author's certificate within `timeout`.
    async fn author_cert(&self, fingerprint: &str, timeout: Duration) -> Option<Cert> {
        if !is_canonical_fingerprint(fingerprint) {
            tracing::debug!("Rejecting non-canonical author fingerprint {:?}", fingerprint);
            return None;
        }
        let lookup = self.directory.lookup(fingerprint);
        let record = match tokio::time::timeout(timeout, lookup).await {
            Ok(Ok(record)) => record,
            Ok(Err(err)) => {
                tracing::debug!("Directory lookup for {} failed: {}", fingerprint, err);
                return None;
            }
            Err(_elapsed) => {
                tracing::debug!("Directory lookup for {} timed out", fingerprint);
                return None;
            }
        };
        match keyfold_pgp::parse_cert(&armor::normalize(&record.public_key_armored)) {
            Ok(cert) => Some(cert),
            Err(err) => {
                tracing::debug!("Directory key for {} does not parse: {}", fingerprint, err);
                None
            }
        }
    }
}
