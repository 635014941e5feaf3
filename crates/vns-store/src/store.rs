use serde::Serialize;
use tracing::{debug, info, warn};
use vns_crypto::SignatureGate;
use vns_table::{Lookup, RecordTable, Upsert};
use vns_types::{Identifier, Record};

use crate::config::StoreConfig;
use crate::error::{FetchError, StoreError, StoreResult};
use crate::fetch::{ContentFetcher, DirectoryContentStore};
use crate::request::Request;

/// Result of a successful [`RecordStore::set`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SetOutcome {
    pub record: Record,
    /// The line the previous record for this identifier occupied, if any.
    pub replaced_line: Option<usize>,
}

/// Result of [`RecordStore::execute`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "kebab-case")]
pub enum Outcome {
    Found { identifier: String, link: String },
    Stored(SetOutcome),
}

/// The verified record store.
///
/// Writes pass through the [`SignatureGate`] before the table is touched:
/// a rejected signature performs no file I/O at all, so a missing table is
/// not created and an existing one is left byte-for-byte unchanged.
///
/// [`set`](Self::set) takes `&mut self`, which serializes writers sharing
/// one store. Separate processes writing the same table are not
/// coordinated and must not run concurrently.
pub struct RecordStore {
    config: StoreConfig,
    table: RecordTable,
    fetcher: Option<Box<dyn ContentFetcher>>,
}

impl RecordStore {
    /// Build a store from `config`.
    ///
    /// When `content_root` is set, links are resolved through a
    /// [`DirectoryContentStore`] rooted there.
    pub fn new(config: StoreConfig) -> Self {
        let table = RecordTable::new(config.table_path.clone(), config.table.clone());
        let fetcher = config
            .content_root
            .clone()
            .map(|root| Box::new(DirectoryContentStore::new(root)) as Box<dyn ContentFetcher>);
        Self {
            config,
            table,
            fetcher,
        }
    }

    /// Replace the content fetcher.
    pub fn with_fetcher(mut self, fetcher: impl ContentFetcher + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    /// Bind `identifier` to `link`, authorized by `signature` over `link`.
    ///
    /// Any earlier record for the identifier is removed before the new one
    /// is appended.
    pub fn set(&mut self, identifier: &str, link: &str, signature: &[u8]) -> StoreResult<SetOutcome> {
        let identifier = Identifier::parse(identifier)?;

        if let Err(e) = SignatureGate::authorize(&identifier, link, signature) {
            warn!(identifier = %identifier, error = %e, "rejected record update");
            return Err(e.into());
        }
        debug!(identifier = %identifier, "signature verified");

        let record = Record::new(identifier, link)?;
        let replaced_line = match self.table.upsert(&record)? {
            Upsert::Inserted => None,
            Upsert::Replaced { line, previous } => {
                debug!(line, previous = %previous.link, "removed stale record");
                Some(line)
            }
        };

        info!(
            identifier = %record.identifier,
            link = %record.link,
            replaced = replaced_line.is_some(),
            "record stored"
        );
        Ok(SetOutcome {
            record,
            replaced_line,
        })
    }

    /// The record stored under `identifier`.
    pub fn lookup(&self, identifier: &str) -> StoreResult<Record> {
        let identifier = Identifier::parse(identifier)?;
        match self.table.find(&identifier)? {
            Lookup::Found { record, .. } => Ok(record),
            Lookup::Absent { scanned } => {
                debug!(identifier = %identifier, scanned, "record not found");
                Err(StoreError::RecordNotFound {
                    identifier: identifier.to_canonical(),
                })
            }
        }
    }

    /// The link stored under `identifier`.
    ///
    /// Hex casing of the query does not matter. A table that does not exist
    /// yet holds no records.
    pub fn get(&self, identifier: &str) -> StoreResult<String> {
        Ok(self.lookup(identifier)?.link)
    }

    /// Look up the link and fetch its content.
    pub fn resolve(&self, identifier: &str) -> StoreResult<Vec<u8>> {
        let link = self.get(identifier)?;
        let fetcher = self.fetcher.as_ref().ok_or(FetchError::NotConfigured)?;
        let content = fetcher.fetch(&link)?;
        debug!(link = %link, bytes = content.len(), "resolved record content");
        Ok(content)
    }

    /// Every record, in table order.
    pub fn list(&self) -> StoreResult<Vec<Record>> {
        Ok(self.table.records()?)
    }

    /// Run a validated command-surface request.
    pub fn execute(&mut self, request: Request) -> StoreResult<Outcome> {
        match request {
            Request::Get { identifier } => {
                let record = self.lookup(&identifier)?;
                Ok(Outcome::Found {
                    identifier: record.identifier.to_canonical(),
                    link: record.link,
                })
            }
            Request::Set {
                identifier,
                link,
                signature,
            } => Ok(Outcome::Stored(self.set(&identifier, &link, &signature)?)),
        }
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("table", &self.table.path())
            .field("has_fetcher", &self.fetcher.is_some())
            .finish()
    }
}
