//! Detached and cleartext signing with the active identity.

use keyfold_core::KeyStorage;

use crate::error::IdentityError;
use crate::service::IdentityService;

impl<S: KeyStorage> IdentityService<S> {
    /// Produces an armored detached signature over `data`.
    pub async fn sign_detached(&self, data: &[u8]) -> Result<String, IdentityError> {
        let cert = self.active_cert().await.ok_or(IdentityError::NoActiveKey)?;
        Ok(keyfold_pgp::sign_detached(&cert, data)?)
    }

    /// Wraps `text` in a clearsigned block signed by the active identity.
    ///
    /// The text is canonicalized (line endings, trailing whitespace)
    /// before signing, so the block survives transports that rewrite
    /// whitespace.
    pub async fn clear_sign(&self, text: &str) -> Result<String, IdentityError> {
        let cert = self.active_cert().await.ok_or(IdentityError::NoActiveKey)?;
        Ok(keyfold_pgp::clear_sign(&cert, text)?)
    }
}
