//! Detached and cleartext signatures.

use std::io::Write;

use sequoia_openpgp as openpgp;

use openpgp::Cert;
use openpgp::armor::Kind as ArmorKind;
use openpgp::policy::StandardPolicy;
use openpgp::serialize::stream::{Armorer, Message, Signer};

use crate::error::PgpError;

/// Marker opening a cleartext signed message.
pub const CLEARSIGN_HEADER: &str = "-----BEGIN PGP SIGNED MESSAGE-----";

pub(crate) const SIGNATURE_HEADER: &str = "-----BEGIN PGP SIGNATURE-----";
pub(crate) const SIGNATURE_FOOTER: &str = "-----END PGP SIGNATURE-----";

/// Signs `data` with the certificate's signing key, producing an armored
/// detached signature.
pub fn sign_detached(cert: &Cert, data: &[u8]) -> Result<String, PgpError> {
    let keypair = signing_keypair(cert)?;

    let mut sink = Vec::new();
    let message = Message::new(&mut sink);
    let message = Armorer::new(message)
        .kind(ArmorKind::Signature)
        .build()
        .map_err(|err| PgpError::Sign(format!("armor failed: {err}")))?;
    let mut message = Signer::new(message, keypair)
        .map_err(|err| PgpError::Sign(format!("signer failed: {err}")))?
        .detached()
        .build()
        .map_err(|err| PgpError::Sign(format!("signer build failed: {err}")))?;
    message
        .write_all(data)
        .map_err(|err| PgpError::Sign(format!("write failed: {err}")))?;
    message
        .finalize()
        .map_err(|err| PgpError::Sign(format!("finalize failed: {err}")))?;

    String::from_utf8(sink).map_err(|err| PgpError::Sign(format!("armor not utf-8: {err}")))
}

/// Signs `text` as a cleartext signed message.
///
/// The text is canonicalized first (LF line endings, per-line trailing
/// whitespace dropped, no trailing newline) and the signature covers
/// exactly those canonical bytes. Lines starting with a dash are
/// dash-escaped in the framed output; [`crate::verify::extract_clearsigned`]
/// undoes the escaping.
pub fn clear_sign(cert: &Cert, text: &str) -> Result<String, PgpError> {
    let canonical = canonical_text(text);
    let signature = sign_detached(cert, canonical.as_bytes())?;

    let mut framed = String::with_capacity(canonical.len() + signature.len() + 64);
    framed.push_str(CLEARSIGN_HEADER);
    framed.push_str("\nHash: SHA256\n\n");
    framed.push_str(&dash_escape(&canonical));
    framed.push('\n');
    framed.push_str(&signature);
    Ok(framed)
}

/// Canonical form of a text for signing: LF line endings, per-line
/// trailing whitespace dropped, no trailing newline. Idempotent, so
/// verification can re-apply it to extracted text without drift.
pub(crate) fn canonical_text(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = unified.split('\n').map(str::trim_end).collect();
    let joined = lines.join("\n");
    joined.trim_end_matches('\n').to_string()
}

fn dash_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if line.starts_with('-') {
            out.push_str("- ");
        }
        out.push_str(line);
    }
    out
}

fn signing_keypair(cert: &Cert) -> Result<openpgp::crypto::KeyPair, PgpError> {
    let policy = StandardPolicy::new();
    let key = cert
        .keys()
        .secret()
        .with_policy(&policy, None)
        .supported()
        .alive()
        .revoked(false)
        .for_signing()
        .next()
        .ok_or_else(|| PgpError::Sign("no signing-capable secret key".to_string()))?;
    key.key()
        .clone()
        .into_keypair()
        .map_err(|err| PgpError::Sign(format!("keypair failed: {err}")))
}
