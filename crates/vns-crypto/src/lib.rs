//! Cryptographic primitives for the Verified Name Store.
//!
//! Identifiers embed an Ed25519 public key as DER SubjectPublicKeyInfo
//! (RFC 8410). Writes are authorized by the [`SignatureGate`], which checks
//! a standard 64-byte Ed25519 signature over the link being stored.
//!
//! All crypto operations wrap established libraries.

pub mod gate;
pub mod signer;

pub use gate::{decode_public_key, SignatureGate};
pub use signer::{Signature, SignatureError, SigningKey, VerifyingKey, SIGNATURE_LENGTH};
