//! The content-fetch collaborator.
//!
//! A record's link points into a content-addressed store. The record store
//! never interprets content; it hands the link to a [`ContentFetcher`] and
//! returns whatever bytes come back.
//!
//! Links take the form `scheme://key` or a bare `key`. Objects are stored
//! per scheme: `ipfs://X`, `b3://X` and `X` are three distinct objects. For
//! the `b3` scheme the key is the BLAKE3 hash of the content, and fetched
//! bytes are re-hashed before being returned.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::FetchError;

/// Scheme of links produced by [`content_link`].
pub const BLAKE3_SCHEME: &str = "b3";

/// Directory holding objects of bare (scheme-less) links. Not a valid
/// scheme, so it cannot collide with one.
const BARE_DIR: &str = "_";

/// Resolves a link to content bytes.
pub trait ContentFetcher: Send + Sync {
    /// Fetch the content behind `link`.
    ///
    /// Returns [`FetchError::NotFound`] when the backend has no such object.
    fn fetch(&self, link: &str) -> Result<Vec<u8>, FetchError>;
}

/// The content-addressed link for `data`: `b3://<hex blake3>`.
pub fn content_link(data: &[u8]) -> String {
    format!("{BLAKE3_SCHEME}://{}", blake3::hash(data).to_hex())
}

/// A link split into its optional scheme and object key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkParts<'a> {
    pub scheme: Option<&'a str>,
    pub key: &'a str,
}

impl LinkParts<'_> {
    /// The link rebuilt from its parts; the key objects are stored under.
    pub fn object_name(&self) -> String {
        match self.scheme {
            Some(scheme) => format!("{scheme}://{}", self.key),
            None => self.key.to_string(),
        }
    }
}

/// Split a link and check that its scheme and key are safe to use as path
/// components. Schemes follow RFC 3986: a letter, then letters, digits,
/// `+`, `-` or `.`.
pub fn parse_link(link: &str) -> Result<LinkParts<'_>, FetchError> {
    let (scheme, key) = match link.split_once("://") {
        Some((scheme, key)) => (Some(scheme), key),
        None => (None, link),
    };
    let invalid = |reason: &str| FetchError::InvalidLink {
        link: link.to_string(),
        reason: reason.to_string(),
    };
    if let Some(scheme) = scheme {
        let mut chars = scheme.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if !valid {
            return Err(invalid("invalid scheme"));
        }
    }
    if key.is_empty() {
        return Err(invalid("empty object key"));
    }
    if key.contains(['/', '\\']) || key == "." || key == ".." {
        return Err(invalid("object key must be a single path component"));
    }
    Ok(LinkParts { scheme, key })
}

/// Reject content whose BLAKE3 hash does not match a `b3://` link.
fn verify_content(link: &str, parts: LinkParts<'_>, data: &[u8]) -> Result<(), FetchError> {
    if parts.scheme != Some(BLAKE3_SCHEME) {
        return Ok(());
    }
    let computed = blake3::hash(data).to_hex();
    if !computed.as_str().eq_ignore_ascii_case(parts.key) {
        return Err(FetchError::HashMismatch {
            link: link.to_string(),
            computed: computed.to_string(),
        });
    }
    Ok(())
}

/// In-memory, HashMap-based content store.
///
/// Intended for tests and embedding. Objects are keyed by link key and
/// cloned on read and write.
pub struct InMemoryContentStore {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Store `data` under its content address and return the link.
    pub fn put(&self, data: &[u8]) -> Result<String, FetchError> {
        let link = content_link(data);
        self.insert(&link, data)?;
        Ok(link)
    }

    /// Store `data` under an explicit link such as `ipfs://Qm...`.
    pub fn insert(&self, link: &str, data: &[u8]) -> Result<(), FetchError> {
        let parts = parse_link(link)?;
        let mut map = self.objects.write().map_err(poisoned)?;
        map.insert(parts.object_name(), data.to_vec());
        Ok(())
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentFetcher for InMemoryContentStore {
    fn fetch(&self, link: &str) -> Result<Vec<u8>, FetchError> {
        let parts = parse_link(link)?;
        let map = self.objects.read().map_err(poisoned)?;
        let data = map
            .get(&parts.object_name())
            .cloned()
            .ok_or_else(|| FetchError::NotFound(link.to_string()))?;
        verify_content(link, parts, &data)?;
        Ok(data)
    }
}

impl std::fmt::Debug for InMemoryContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryContentStore")
            .field("object_count", &self.len())
            .finish()
    }
}

fn poisoned<T>(e: std::sync::PoisonError<T>) -> FetchError {
    FetchError::Unavailable(format!("lock poisoned: {e}"))
}

/// Content store backed by one file per object under a root directory.
#[derive(Clone, Debug)]
pub struct DirectoryContentStore {
    root: PathBuf,
}

impl DirectoryContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<scheme>/<key>`, or `<root>/_/<key>` for a bare link.
    fn object_path(&self, parts: LinkParts<'_>) -> PathBuf {
        self.root
            .join(parts.scheme.unwrap_or(BARE_DIR))
            .join(parts.key)
    }

    /// Store `data` under its content address and return the link.
    pub fn put(&self, data: &[u8]) -> Result<String, FetchError> {
        let link = content_link(data);
        self.insert(&link, data)?;
        Ok(link)
    }

    /// Store `data` under an explicit link. The object file is written to a
    /// temporary name and renamed into place.
    pub fn insert(&self, link: &str, data: &[u8]) -> Result<(), FetchError> {
        let parts = parse_link(link)?;
        let path = self.object_path(parts);
        let dir = path.parent().unwrap_or(&self.root);
        fs::create_dir_all(dir)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(data)?;
        tmp.flush()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        debug!(link, bytes = data.len(), root = %self.root.display(), "stored content object");
        Ok(())
    }
}

impl ContentFetcher for DirectoryContentStore {
    fn fetch(&self, link: &str) -> Result<Vec<u8>, FetchError> {
        let parts = parse_link(link)?;
        let path = self.object_path(parts);
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(FetchError::NotFound(link.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        verify_content(link, parts, &data)?;
        debug!(link, bytes = data.len(), "fetched content object");
        Ok(data)
    }
}
