use std::path::PathBuf;

use thiserror::Error;
use vns_crypto::SignatureError;
use vns_table::TableError;
use vns_types::{IdentifierError, RecordError};

/// Errors returned by [`RecordStore`](crate::RecordStore) operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("malformed identifier: {0}")]
    MalformedIdentifier(#[from] IdentifierError),

    #[error("invalid public key encoding: {0}")]
    InvalidPublicKeyEncoding(String),

    #[error("malformed link: {0}")]
    MalformedLink(String),

    /// Verification failed. Nothing was written.
    #[error("signature does not verify against the identifier's public key")]
    SignatureInvalid,

    #[error("storage unavailable at {}: {source}", path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no record for {identifier}")]
    RecordNotFound { identifier: String },

    #[error("corrupt record on line {line}: {reason}")]
    CorruptLine { line: usize, reason: String },

    #[error("content fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid request: {0}")]
    Request(#[from] RequestError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<SignatureError> for StoreError {
    fn from(e: SignatureError) -> Self {
        match e {
            SignatureError::InvalidSignature | SignatureError::InvalidSignatureEncoding(_) => {
                StoreError::SignatureInvalid
            }
            SignatureError::InvalidKeyHex(_) | SignatureError::InvalidKeyEncoding(_) => {
                StoreError::InvalidPublicKeyEncoding(e.to_string())
            }
        }
    }
}

impl From<RecordError> for StoreError {
    fn from(e: RecordError) -> Self {
        match e {
            RecordError::Identifier(inner) => StoreError::MalformedIdentifier(inner),
            other => StoreError::MalformedLink(other.to_string()),
        }
    }
}

impl From<TableError> for StoreError {
    fn from(e: TableError) -> Self {
        match e {
            TableError::Unavailable { path, source } => {
                StoreError::StorageUnavailable { path, source }
            }
            TableError::CorruptLine { line, reason } => StoreError::CorruptLine { line, reason },
            other @ TableError::LineOutOfRange { .. } => StoreError::Internal(other.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from the content-fetch collaborator.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("content not found: {0}")]
    NotFound(String),

    #[error("invalid link {link:?}: {reason}")]
    InvalidLink { link: String, reason: String },

    #[error("content for {link} hashes to {computed}")]
    HashMismatch { link: String, computed: String },

    #[error("no content fetcher configured")]
    NotConfigured,

    #[error("content backend unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors loading a [`StoreConfig`](crate::StoreConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config: {0}")]
    Parse(String),

    #[error("cannot serialize config: {0}")]
    Serialize(String),
}

/// Errors validating a command-surface request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("unknown request type {0:?} (expected name-record-get or name-record-set)")]
    UnknownRequestType(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("use {0} only if request type is name-record-set")]
    UnexpectedField(&'static str),

    #[error("signature is not valid hex: {0}")]
    InvalidSignatureHex(String),
}
