use thiserror::Error;

/// Errors produced while parsing or building an identifier.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("identifier has no ':' separator: {identifier:?}")]
    MissingSeparator { identifier: String },

    #[error("identifier name must not be empty")]
    EmptyName,

    #[error("invalid identifier name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("identifier public key segment is empty")]
    EmptyKey,

    #[error("invalid public key hex: {0}")]
    InvalidKeyHex(String),
}

/// Errors produced while parsing or building a record line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("record line has no tab separator")]
    MissingLink,

    #[error("record link must not be empty")]
    EmptyLink,

    #[error("invalid record link: {0}")]
    InvalidLink(String),

    #[error(transparent)]
    Identifier(#[from] IdentifierError),
}
