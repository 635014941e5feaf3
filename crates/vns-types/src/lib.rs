//! Foundation types for the Verified Name Store (VNS).
//!
//! VNS binds self-certifying identifiers to links into a content-addressed
//! store. This crate holds the pieces every other VNS crate shares.
//!
//! # Key Types
//!
//! - [`Identifier`]: `name:hex(public key)`, compared in canonical form
//! - [`Record`]: an identifier bound to a link, one line on disk

pub mod error;
pub mod identifier;
pub mod record;

pub use error::{IdentifierError, RecordError};
pub use identifier::{canonicalize, split, Identifier, Split, SEPARATOR};
pub use record::{validate_link, Record, FIELD_SEPARATOR};
