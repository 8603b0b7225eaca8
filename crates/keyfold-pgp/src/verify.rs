//! Signature verification and cleartext extraction.

use sequoia_openpgp as openpgp;

use openpgp::packet::Packet;
use openpgp::parse::Parse;
use openpgp::parse::stream::{
    DetachedVerifierBuilder, MessageLayer, MessageStructure, VerificationHelper,
};
use openpgp::policy::StandardPolicy;
use openpgp::{Cert, KeyHandle, KeyID, PacketPile};

use crate::error::PgpError;
use crate::resolver::key_id_hex;
use crate::sign::{CLEARSIGN_HEADER, SIGNATURE_FOOTER, SIGNATURE_HEADER, canonical_text};

/// A cleartext signed message, split into its two halves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearsignedBlock {
    /// The signed text, with dash-escaping removed.
    pub text: String,
    /// The armored signature block.
    pub signature_armored: String,
}

/// Verifies an armored detached signature over `data` against `cert`.
///
/// Succeeds only when the signature parses and at least one signature in
/// it checks out against a key of `cert`.
pub fn verify_detached(cert: &Cert, data: &[u8], signature_armored: &str) -> Result<(), PgpError> {
    let policy = &StandardPolicy::new();
    let helper = VerifyHelper { cert: cert.clone() };
    let mut verifier = DetachedVerifierBuilder::from_bytes(signature_armored.as_bytes())
        .map_err(|err| PgpError::Verify(format!("parse failed: {err}")))?
        .with_policy(policy, None, helper)
        .map_err(|err| PgpError::Verify(format!("verifier failed: {err}")))?;
    verifier
        .verify_bytes(data)
        .map_err(|err| PgpError::Verify(format!("signature invalid: {err}")))
}

/// Verifies an extracted cleartext block against `cert`.
///
/// The block's text is re-canonicalized before checking, so text that
/// crossed a transport which rewrote line endings still verifies.
pub fn verify_clearsigned(cert: &Cert, block: &ClearsignedBlock) -> Result<(), PgpError> {
    let canonical = canonical_text(&block.text);
    verify_detached(cert, canonical.as_bytes(), &block.signature_armored)
}

/// Splits a cleartext signed message into text and signature.
///
/// Returns `None` when the input is not a complete cleartext block: no
/// opening marker, no blank line ending the headers, or a missing or
/// unterminated signature. Extraction never needs key material.
pub fn extract_clearsigned(block: &str) -> Option<ClearsignedBlock> {
    let mut lines = block.lines();

    lines.by_ref().find(|line| line.trim_end() == CLEARSIGN_HEADER)?;

    // Skip framing headers (Hash: ...) up to the blank separator line.
    loop {
        let line = lines.next()?;
        if line.trim().is_empty() {
            break;
        }
    }

    let mut text_lines: Vec<&str> = Vec::new();
    let mut found_signature = false;
    for line in lines.by_ref() {
        if line.trim_end() == SIGNATURE_HEADER {
            found_signature = true;
            break;
        }
        text_lines.push(line);
    }
    if !found_signature {
        return None;
    }

    let mut signature = String::from(SIGNATURE_HEADER);
    signature.push('\n');
    let mut terminated = false;
    for line in lines {
        signature.push_str(line);
        signature.push('\n');
        if line.trim_end() == SIGNATURE_FOOTER {
            terminated = true;
            break;
        }
    }
    if !terminated {
        return None;
    }

    let text = text_lines
        .iter()
        .map(|line| line.strip_prefix("- ").unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n");

    Some(ClearsignedBlock { text, signature_armored: signature })
}

/// Key ID of the signature's issuer, as 16 lowercase hex characters.
///
/// Reads the issuer subpackets of the first signature packet. Returns
/// `None` when the armor does not parse or no signature names an issuer.
/// Useful for telling a user *whose* key to fetch before verification.
pub fn issuer_key_id(signature_armored: &str) -> Option<String> {
    let pile = PacketPile::from_bytes(signature_armored.as_bytes()).ok()?;
    for packet in pile.into_children() {
        if let Packet::Signature(signature) = packet {
            if let Some(handle) = signature.get_issuers().into_iter().next() {
                let id = match handle {
                    KeyHandle::KeyID(id) => id,
                    KeyHandle::Fingerprint(fingerprint) => KeyID::from(&fingerprint),
                };
                return Some(key_id_hex(id));
            }
        }
    }
    None
}

struct VerifyHelper {
    cert: Cert,
}

impl VerificationHelper for VerifyHelper {
    fn get_certs(&mut self, _ids: &[KeyHandle]) -> openpgp::Result<Vec<Cert>> {
        Ok(vec![self.cert.clone()])
    }

    fn check(&mut self, structure: MessageStructure) -> openpgp::Result<()> {
        for layer in structure {
            if let MessageLayer::SignatureGroup { results } = layer {
                if results.iter().any(Result::is_ok) {
                    return Ok(());
                }
            }
        }
        Err(openpgp::Error::InvalidOperation("no matching signature".to_string()).into())
    }
}
