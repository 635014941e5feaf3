//! The signature gate authorizing record writes.
//!
//! A write of `link` under `identifier` is authorized only when `signature`
//! verifies over the exact bytes of `link` against the public key embedded
//! in `identifier`. The identifier itself is not signed, so a signature
//! only says "this key endorses this link"; it cannot be replayed under a
//! different key because verification always uses the identifier's own key.

use vns_types::Identifier;

use crate::signer::{Signature, SignatureError, VerifyingKey};

/// Hex-decode an identifier's key segment and parse it as SPKI DER.
pub fn decode_public_key(key_hex: &str) -> Result<VerifyingKey, SignatureError> {
    let der = hex::decode(key_hex).map_err(|e| SignatureError::InvalidKeyHex(e.to_string()))?;
    VerifyingKey::from_spki_der(&der)
}

/// Stateless verifier for proposed record updates.
#[derive(Clone, Copy, Debug, Default)]
pub struct SignatureGate;

impl SignatureGate {
    /// Check `signature` over `message`. No side effects.
    ///
    /// A signature of the wrong length fails like any other bad signature.
    pub fn verify(key: &VerifyingKey, message: &[u8], signature: &[u8]) -> bool {
        match Signature::from_slice(signature) {
            Ok(sig) => key.verify(message, &sig).is_ok(),
            Err(_) => false,
        }
    }

    /// Decode the identifier's key and verify `signature` over `link`.
    ///
    /// Returns the verifying key on success. Key decoding failures are
    /// reported as such; every verification failure is
    /// [`SignatureError::InvalidSignature`].
    pub fn authorize(
        identifier: &Identifier,
        link: &str,
        signature: &[u8],
    ) -> Result<VerifyingKey, SignatureError> {
        let key = VerifyingKey::from_spki_der(identifier.public_key())?;
        if Self::verify(&key, link.as_bytes(), signature) {
            Ok(key)
        } else {
            Err(SignatureError::InvalidSignature)
        }
    }
}
