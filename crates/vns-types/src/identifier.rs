//! Self-certifying identifiers.
//!
//! An identifier binds a human-chosen name to a public key and is written
//! `name:hex(public key)`. The first `:` is the boundary between the two;
//! names may not contain a `:` themselves, but need not be hex. Key hex
//! casing is not significant: the canonical form is lowercase.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IdentifierError;

/// Separator between the name and the hex-encoded public key.
pub const SEPARATOR: char = ':';

/// Characters that would break the one-record-per-line table format.
const FORBIDDEN_NAME_CHARS: &[char] = &['\t', '\n', '\r'];

/// The raw pieces of an identifier string, located by [`split`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Split<'a> {
    /// Byte index just past the first `:`.
    pub boundary: usize,
    /// Everything up to and including the `:`.
    pub name_prefix: &'a str,
    /// Everything after the `:`, not yet decoded.
    pub key_hex: &'a str,
}

impl Split<'_> {
    /// The name without its trailing separator.
    pub fn name(&self) -> &str {
        &self.name_prefix[..self.boundary - SEPARATOR.len_utf8()]
    }
}

/// Locate the first `:` in `identifier`.
///
/// ```
/// use vns_types::identifier::split;
///
/// let parts = split("alice:0a0b").unwrap();
/// assert_eq!(parts.boundary, 6);
/// assert_eq!(parts.name_prefix, "alice:");
/// assert_eq!(parts.key_hex, "0a0b");
/// assert!(split("no-separator").is_err());
/// ```
pub fn split(identifier: &str) -> Result<Split<'_>, IdentifierError> {
    let pos = identifier
        .find(SEPARATOR)
        .ok_or_else(|| IdentifierError::MissingSeparator {
            identifier: identifier.to_string(),
        })?;
    let boundary = pos + SEPARATOR.len_utf8();
    Ok(Split {
        boundary,
        name_prefix: &identifier[..boundary],
        key_hex: &identifier[boundary..],
    })
}

/// Parse `identifier` and re-encode its key as lowercase hex.
pub fn canonicalize(identifier: &str) -> Result<String, IdentifierError> {
    Ok(Identifier::parse(identifier)?.to_canonical())
}

/// Validate a name for use in an identifier.
pub fn validate_name(name: &str) -> Result<(), IdentifierError> {
    if name.is_empty() {
        return Err(IdentifierError::EmptyName);
    }
    if name.contains(SEPARATOR) {
        return Err(IdentifierError::InvalidName {
            name: name.to_string(),
            reason: "must not contain ':'".into(),
        });
    }
    for ch in FORBIDDEN_NAME_CHARS {
        if name.contains(*ch) {
            return Err(IdentifierError::InvalidName {
                name: name.to_string(),
                reason: format!("contains forbidden character: {ch:?}"),
            });
        }
    }
    Ok(())
}

/// A parsed `name:hex(public key)` identifier.
///
/// The key is held as raw bytes; whether those bytes form a usable public
/// key is decided by the signature layer, not here. Two identifiers are
/// equal when their names and key bytes are equal, whatever hex casing
/// they were written with.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier {
    name: String,
    public_key: Vec<u8>,
}

impl Identifier {
    /// Build an identifier from a name and raw public key bytes.
    pub fn new(name: impl Into<String>, public_key: Vec<u8>) -> Result<Self, IdentifierError> {
        let name = name.into();
        validate_name(&name)?;
        if public_key.is_empty() {
            return Err(IdentifierError::EmptyKey);
        }
        Ok(Self { name, public_key })
    }

    /// Parse the external `name:hex` form. Hex may be any casing.
    pub fn parse(s: &str) -> Result<Self, IdentifierError> {
        let parts = split(s)?;
        validate_name(parts.name())?;
        if parts.key_hex.is_empty() {
            return Err(IdentifierError::EmptyKey);
        }
        let public_key =
            hex::decode(parts.key_hex).map_err(|e| IdentifierError::InvalidKeyHex(e.to_string()))?;
        Ok(Self {
            name: parts.name().to_string(),
            public_key,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw (decoded) public key bytes.
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Lowercase hex of the public key.
    pub fn key_hex(&self) -> String {
        hex::encode(&self.public_key)
    }

    /// Byte index just past the separator in the canonical form.
    pub fn boundary(&self) -> usize {
        self.name.len() + SEPARATOR.len_utf8()
    }

    /// The canonical `name:lowercasehex` form.
    pub fn to_canonical(&self) -> String {
        format!("{}{SEPARATOR}{}", self.name, self.key_hex())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.name, self.key_hex())
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.key_hex();
        let short = &hex[..hex.len().min(16)];
        write!(f, "Identifier({}{SEPARATOR}{short}...)", self.name)
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = IdentifierError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.to_canonical()
    }
}
