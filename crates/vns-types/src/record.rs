//! A record binds an identifier to a content link.
//!
//! On disk a record is one line:
//!
//! ```text
//! <name>:<lowercase-hex-pubkey>\t<link>\n
//! ```

use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::identifier::Identifier;

/// Separator between the identifier and the link in a record line.
pub const FIELD_SEPARATOR: char = '\t';

/// Characters a link may not carry without breaking the line format.
const FORBIDDEN_LINK_CHARS: &[char] = &['\t', '\n', '\r'];

/// A persisted binding of an identifier to a content link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub identifier: Identifier,
    pub link: String,
}

impl Record {
    /// Build a record, validating the link.
    pub fn new(identifier: Identifier, link: impl Into<String>) -> Result<Self, RecordError> {
        let link = link.into();
        validate_link(&link)?;
        Ok(Self { identifier, link })
    }

    /// The canonical line, including its trailing newline.
    pub fn to_line(&self) -> String {
        format!(
            "{}{FIELD_SEPARATOR}{}\n",
            self.identifier.to_canonical(),
            self.link
        )
    }

    /// Parse one line. `line` must not include the trailing newline.
    ///
    /// The stored key may be any hex casing; it is decoded, so the parsed
    /// record always reports the canonical identifier.
    pub fn parse_line(line: &str) -> Result<Self, RecordError> {
        let (identifier, link) = line
            .split_once(FIELD_SEPARATOR)
            .ok_or(RecordError::MissingLink)?;
        let identifier = Identifier::parse(identifier)?;
        Self::new(identifier, link)
    }
}

/// Validate a link for storage.
pub fn validate_link(link: &str) -> Result<(), RecordError> {
    if link.is_empty() {
        return Err(RecordError::EmptyLink);
    }
    for ch in FORBIDDEN_LINK_CHARS {
        if link.contains(*ch) {
            return Err(RecordError::InvalidLink(format!(
                "contains forbidden character: {ch:?}"
            )));
        }
    }
    Ok(())
}
