//! The verified record store.
//!
//! Composes the identifier codec, the signature gate, and the record table
//! into two operations:
//!
//! - `set(identifier, link, signature)`: verify that `signature` over
//!   `link` was made by the key embedded in `identifier`, then replace the
//!   identifier's record with the new link.
//! - `get(identifier)`: return the stored link.
//!
//! `resolve` additionally hands the link to a [`ContentFetcher`].
//!
//! # Design Rules
//!
//! 1. Verification precedes and gates every write. A rejected write does no
//!    file I/O.
//! 2. Delete-then-append keeps at most one record per identifier.
//! 3. All settings come from a [`StoreConfig`] passed in at construction.
//! 4. One writer at a time per table file; nothing locks across processes.

pub mod config;
pub mod error;
pub mod fetch;
pub mod request;
pub mod store;

pub use config::{StoreConfig, DEFAULT_TABLE_PATH};
pub use error::{ConfigError, FetchError, RequestError, StoreError, StoreResult};
pub use fetch::{content_link, ContentFetcher, DirectoryContentStore, InMemoryContentStore};
pub use request::{Request, RequestKind, RequestOptions, GET_REQUEST, SET_REQUEST};
pub use store::{Outcome, RecordStore, SetOutcome};
