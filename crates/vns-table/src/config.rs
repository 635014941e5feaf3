use serde::{Deserialize, Serialize};

/// How a stored line is matched against a query identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Canonical identifier equality.
    #[default]
    Exact,
    /// Reads tables that mix legacy lines with canonical ones. A legacy line
    /// stores the key as hex of the identifier's hex text; it matches when
    /// its name prefix plus decoded key contains the query text. Canonical
    /// lines match by equality. Can match the wrong record when one
    /// identifier's text is contained in another's. Writes are always
    /// canonical, so replacing a legacy line migrates it.
    LegacySubstring,
}

/// How a line is removed from the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Compaction {
    /// Write the surviving bytes to a temporary file beside the table and
    /// rename it into place. The table is replaced with a new inode.
    #[default]
    AtomicRename,
    /// Truncate the table at the deleted line and rewrite the tail in
    /// place. A crash between the two steps loses the tail.
    InPlace,
}

/// Configuration for a [`RecordTable`](crate::RecordTable).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TableConfig {
    pub match_mode: MatchMode,
    pub compaction: Compaction,
    /// `fsync` after every append and compaction.
    pub sync_on_write: bool,
}
