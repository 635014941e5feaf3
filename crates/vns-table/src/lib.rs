//! Flat-file record table for the Verified Name Store.
//!
//! The table is a plain text file with one record per line:
//!
//! ```text
//! <name>:<lowercase-hex-pubkey>\t<link>\n
//! ```
//!
//! There is no header and no index. Lookups scan the file front to back;
//! updates remove the old line by compaction and append the new one, so the
//! file holds at most one line per identifier.
//!
//! # Modules
//!
//! - [`lines`]: byte-level line skipping shared by lookup and compaction
//! - [`config`]: [`MatchMode`], [`Compaction`], [`TableConfig`]
//! - [`table`]: [`RecordTable`] itself
//! - [`error`]: [`TableError`]

pub mod config;
pub mod error;
pub mod lines;
pub mod table;

pub use config::{Compaction, MatchMode, TableConfig};
pub use error::{Result, TableError};
pub use lines::{count_lines, skip_lines};
pub use table::{Lookup, RecordTable, Upsert};
