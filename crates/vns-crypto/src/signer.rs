use ed25519_dalek::pkcs8::{DecodePublicKey, EncodePublicKey};
use serde::{Deserialize, Serialize};
use vns_types::Identifier;

/// Length of an Ed25519 signature in bytes.
pub const SIGNATURE_LENGTH: usize = ed25519_dalek::SIGNATURE_LENGTH;

/// Ed25519 signing key (private).
pub struct SigningKey(ed25519_dalek::SigningKey);

/// Ed25519 verifying key (public).
#[derive(Clone, PartialEq, Eq)]
pub struct VerifyingKey(ed25519_dalek::VerifyingKey);

/// Ed25519 signature.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(#[serde(with = "signature_serde")] ed25519_dalek::Signature);

impl SigningKey {
    /// Generate a new random signing key.
    pub fn generate() -> Self {
        let mut csprng = rand::thread_rng();
        Self(ed25519_dalek::SigningKey::generate(&mut csprng))
    }

    /// Create from raw 32-byte secret.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(ed25519_dalek::SigningKey::from_bytes(&bytes))
    }

    /// Parse a 64-character hex secret.
    pub fn from_hex(s: &str) -> Result<Self, SignatureError> {
        let bytes =
            hex::decode(s.trim()).map_err(|e| SignatureError::InvalidKeyHex(e.to_string()))?;
        let arr: [u8; 32] = bytes.try_into().map_err(|b: Vec<u8>| {
            SignatureError::InvalidKeyEncoding(format!("expected 32-byte secret, got {}", b.len()))
        })?;
        Ok(Self::from_bytes(arr))
    }

    /// The corresponding public verifying key.
    pub fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey(self.0.verifying_key())
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Signature {
        use ed25519_dalek::Signer;
        Signature(self.0.sign(message))
    }

    /// Raw secret key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Hex of the raw secret.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.as_bytes())
    }
}

impl VerifyingKey {
    /// Verify a signature on a message.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), SignatureError> {
        use ed25519_dalek::Verifier;
        self.0
            .verify(message, &signature.0)
            .map_err(|_| SignatureError::InvalidSignature)
    }

    /// Parse a DER-encoded SubjectPublicKeyInfo (RFC 8410).
    pub fn from_spki_der(der: &[u8]) -> Result<Self, SignatureError> {
        let key = ed25519_dalek::VerifyingKey::from_public_key_der(der)
            .map_err(|e| SignatureError::InvalidKeyEncoding(e.to_string()))?;
        Ok(Self(key))
    }

    /// DER-encoded SubjectPublicKeyInfo bytes.
    pub fn to_spki_der(&self) -> Result<Vec<u8>, SignatureError> {
        let doc = self
            .0
            .to_public_key_der()
            .map_err(|e| SignatureError::InvalidKeyEncoding(e.to_string()))?;
        Ok(doc.as_bytes().to_vec())
    }

    /// Lowercase hex of the SubjectPublicKeyInfo bytes, as embedded in
    /// identifiers.
    pub fn to_spki_hex(&self) -> Result<String, SignatureError> {
        Ok(hex::encode(self.to_spki_der()?))
    }

    /// Build the identifier `name:hex(spki)` for this key.
    pub fn identifier(&self, name: &str) -> Result<Identifier, SignatureError> {
        Identifier::new(name, self.to_spki_der()?)
            .map_err(|e| SignatureError::InvalidKeyEncoding(e.to_string()))
    }

    /// Raw public key bytes.
    pub fn as_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }
}

impl Signature {
    /// Parse the standard 64-byte `R || S` encoding.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SignatureError> {
        let arr: [u8; SIGNATURE_LENGTH] = bytes
            .try_into()
            .map_err(|_| SignatureError::InvalidSignatureEncoding(bytes.len()))?;
        Ok(Self(ed25519_dalek::Signature::from_bytes(&arr)))
    }

    /// Raw signature bytes.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        self.0.to_bytes()
    }

    /// Hex of the raw signature bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.to_bytes())
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SigningKey(<redacted>)")
    }
}

impl std::fmt::Debug for VerifyingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VerifyingKey({})", hex::encode(self.0.to_bytes()))
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Signature({}...)",
            hex::encode(&self.0.to_bytes()[..8])
        )
    }
}

/// Errors from key handling and verification.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("invalid signature encoding: expected {SIGNATURE_LENGTH} bytes, got {0}")]
    InvalidSignatureEncoding(usize),
    #[error("invalid key hex: {0}")]
    InvalidKeyHex(String),
    #[error("invalid public key encoding: {0}")]
    InvalidKeyEncoding(String),
}

mod signature_serde {
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(sig: &ed25519_dalek::Signature, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(sig.to_bytes()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<ed25519_dalek::Signature, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        let arr: [u8; 64] = bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("expected 64-byte signature"))?;
        Ok(ed25519_dalek::Signature::from_bytes(&arr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify() {
        let sk = SigningKey::generate();
        let vk = sk.verifying_key();
        let message = b"ipfs://Qm1";
        let sig = sk.sign(message);
        assert!(vk.verify(message, &sig).is_ok());
    }

    #[test]
    fn verify_fails_on_wrong_message() {
        let sk = SigningKey::generate();
        let vk = sk.verifying_key();
        let sig = sk.sign(b"ipfs://Qm1");
        assert!(vk.verify(b"ipfs://Qm2", &sig).is_err());
    }

    #[test]
    fn verify_fails_with_wrong_key() {
        let sk1 = SigningKey::generate();
        let sk2 = SigningKey::generate();
        let sig = sk1.sign(b"message");
        assert!(sk2.verifying_key().verify(b"message", &sig).is_err());
    }

    #[test]
    fn spki_roundtrip() {
        let vk = SigningKey::generate().verifying_key();
        let der = vk.to_spki_der().unwrap();
        // RFC 8410: 12-byte algorithm header followed by the 32-byte key.
        assert_eq!(der.len(), 44);
        assert_eq!(&der[12..], &vk.as_bytes());
        assert_eq!(VerifyingKey::from_spki_der(&der).unwrap(), vk);
    }

    #[test]
    fn raw_key_is_not_spki() {
        let vk = SigningKey::generate().verifying_key();
        let err = VerifyingKey::from_spki_der(&vk.as_bytes()).unwrap_err();
        assert!(matches!(err, SignatureError::InvalidKeyEncoding(_)));
    }

    #[test]
    fn identifier_embeds_spki_hex() {
        let vk = SigningKey::generate().verifying_key();
        let id = vk.identifier("alice").unwrap();
        assert_eq!(id.to_canonical(), format!("alice:{}", vk.to_spki_hex().unwrap()));
    }

    #[test]
    fn secret_hex_roundtrip() {
        let sk = SigningKey::generate();
        let sk2 = SigningKey::from_hex(&sk.to_hex()).unwrap();
        assert_eq!(sk.verifying_key(), sk2.verifying_key());
    }

    #[test]
    fn secret_hex_wrong_length() {
        assert!(matches!(
            SigningKey::from_hex("abcd").unwrap_err(),
            SignatureError::InvalidKeyEncoding(_)
        ));
    }

    #[test]
    fn signature_from_slice_checks_length() {
        assert_eq!(
            Signature::from_slice(&[0u8; 10]).unwrap_err(),
            SignatureError::InvalidSignatureEncoding(10)
        );
        let sig = SigningKey::generate().sign(b"x");
        assert_eq!(Signature::from_slice(&sig.to_bytes()).unwrap(), sig);
    }

    #[test]
    fn signature_serde_roundtrip() {
        let sk = SigningKey::generate();
        let sig = sk.sign(b"test");
        let json = serde_json::to_string(&sig).unwrap();
        assert_eq!(json, format!("\"{}\"", sig.to_hex()));
        let parsed: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(sig, parsed);
    }

    #[test]
    fn debug_redacts_signing_key() {
        let sk = SigningKey::generate();
        let debug = format!("{sk:?}");
        assert!(debug.contains("redacted"));
    }
}
