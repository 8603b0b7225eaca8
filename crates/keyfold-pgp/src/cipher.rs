//! Message encryption and decryption.

use std::io::{Read, Write};

use sequoia_openpgp as openpgp;

use openpgp::crypto::SessionKey;
use openpgp::packet::{PKESK, SKESK};
use openpgp::parse::Parse;
use openpgp::parse::stream::{
    DecryptionHelper, DecryptorBuilder, MessageStructure, VerificationHelper,
};
use openpgp::policy::StandardPolicy;
use openpgp::serialize::stream::{Armorer, Encryptor, LiteralWriter, Message, Recipient};
use openpgp::types::SymmetricAlgorithm;
use openpgp::{Cert, KeyHandle};

use crate::error::PgpError;

/// Encrypts `plaintext` to `recipient`, producing an armored message.
///
/// The recipient's first valid encryption-capable key is used. Fails with
/// [`PgpError::NoEncryptionKey`] when the certificate has none.
pub fn encrypt(recipient: &Cert, plaintext: &[u8]) -> Result<String, PgpError> {
    let policy = StandardPolicy::new();
    let key = recipient
        .keys()
        .with_policy(&policy, None)
        .supported()
        .alive()
        .revoked(false)
        .for_transport_encryption()
        .for_storage_encryption()
        .next()
        .ok_or(PgpError::NoEncryptionKey)?;
    let recipients: Vec<Recipient<'_>> = vec![key.into()];

    let mut sink = Vec::new();
    let message = Message::new(&mut sink);
    let message = Armorer::new(message)
        .build()
        .map_err(|err| PgpError::Encrypt(format!("armor failed: {err}")))?;
    let message = Encryptor::for_recipients(message, recipients)
        .build()
        .map_err(|err| PgpError::Encrypt(format!("encryptor failed: {err}")))?;
    let mut message = LiteralWriter::new(message)
        .build()
        .map_err(|err| PgpError::Encrypt(format!("literal writer failed: {err}")))?;
    message
        .write_all(plaintext)
        .map_err(|err| PgpError::Encrypt(format!("write failed: {err}")))?;
    message
        .finalize()
        .map_err(|err| PgpError::Encrypt(format!("finalize failed: {err}")))?;

    String::from_utf8(sink).map_err(|err| PgpError::Encrypt(format!("armor not utf-8: {err}")))
}

/// Decrypts an armored message with the certificate's secret keys.
///
/// Signatures inside the message, if any, are not checked here; encrypted
/// bulletin posts carry their authorship claim out of band.
pub fn decrypt(cert: &Cert, armored: &str) -> Result<Vec<u8>, PgpError> {
    let policy = &StandardPolicy::new();
    let helper = DecryptHelper { cert: cert.clone() };
    let mut decryptor = DecryptorBuilder::from_bytes(armored.as_bytes())
        .map_err(|err| PgpError::Decrypt(format!("parse failed: {err}")))?
        .with_policy(policy, None, helper)
        .map_err(|err| PgpError::Decrypt(format!("decryptor failed: {err}")))?;

    let mut plaintext = Vec::new();
    decryptor
        .read_to_end(&mut plaintext)
        .map_err(|err| PgpError::Decrypt(format!("read failed: {err}")))?;
    Ok(plaintext)
}

struct DecryptHelper {
    cert: Cert,
}

impl VerificationHelper for DecryptHelper {
    fn get_certs(&mut self, _ids: &[KeyHandle]) -> openpgp::Result<Vec<Cert>> {
        Ok(vec![self.cert.clone()])
    }

    fn check(&mut self, _structure: MessageStructure) -> openpgp::Result<()> {
        // Decryption does not require the message to be signed.
        Ok(())
    }
}

impl DecryptionHelper for DecryptHelper {
    fn decrypt(
        &mut self,
        pkesks: &[PKESK],
        _skesks: &[SKESK],
        sym_algo: Option<SymmetricAlgorithm>,
        decrypt: &mut dyn FnMut(Option<SymmetricAlgorithm>, &SessionKey) -> bool,
    ) -> openpgp::Result<Option<Cert>> {
        let policy = StandardPolicy::new();
        for pkesk in pkesks {
            for key in self
                .cert
                .keys()
                .secret()
                .with_policy(&policy, None)
                .supported()
                .for_transport_encryption()
                .for_storage_encryption()
            {
                let mut keypair = key.key().clone().into_keypair()?;
                if let Some((algo, sk)) = pkesk.decrypt(&mut keypair, sym_algo) {
                    if decrypt(algo, &sk) {
                        return Ok(Some(self.cert.clone()));
                    }
                }
            }
        }
        Ok(None)
    }
}
