//! Error types for record table operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or rewriting the table.
#[derive(Debug, Error)]
pub enum TableError {
    /// The table file could not be created, opened, read, or written.
    #[error("storage unavailable at {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored line does not split or decode as a record.
    #[error("corrupt record on line {line}: {reason}")]
    CorruptLine { line: usize, reason: String },

    /// A line index outside the table was requested.
    #[error("line {line} out of range (table has {total} lines)")]
    LineOutOfRange { line: usize, total: usize },
}

/// Convenience type alias for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
