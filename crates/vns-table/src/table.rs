use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};
use vns_types::{Identifier, Record};

use crate::config::{Compaction, MatchMode, TableConfig};
use crate::error::{Result, TableError};
use crate::lines::{count_lines, lines, skip_lines};

/// Result of scanning the table for an identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// The record was found on `line` (1-based).
    Found { line: usize, record: Record },
    /// No line matched; `scanned` lines were read.
    Absent { scanned: usize },
}

impl Lookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found { .. })
    }

    /// The matching line, or the number of lines scanned when absent.
    pub fn line(&self) -> usize {
        match self {
            Lookup::Found { line, .. } => *line,
            Lookup::Absent { scanned } => *scanned,
        }
    }

    pub fn into_record(self) -> Option<Record> {
        match self {
            Lookup::Found { record, .. } => Some(record),
            Lookup::Absent { .. } => None,
        }
    }
}

/// Outcome of [`RecordTable::upsert`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Upsert {
    /// No prior record existed for the identifier.
    Inserted,
    /// The record previously on `line` was removed before appending.
    Replaced { line: usize, previous: Record },
}

/// A newline-delimited flat file of records.
///
/// The table holds no open handles between calls; every operation opens
/// the file, runs to completion, and closes it. A missing file is an empty
/// table. Nothing serializes writers across processes: two processes
/// updating the same file at once can interleave and lose lines, so only
/// one writer may use a table at a time.
#[derive(Clone, Debug)]
pub struct RecordTable {
    path: PathBuf,
    config: TableConfig,
}

impl RecordTable {
    pub fn new(path: impl Into<PathBuf>, config: TableConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    /// Path to the table file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Whether the table file exists yet.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Scan for the record stored under `identifier`.
    ///
    /// A missing file yields `Absent { scanned: 0 }` and is not created.
    pub fn find(&self, identifier: &Identifier) -> Result<Lookup> {
        let Some(data) = self.read_bytes()? else {
            return Ok(Lookup::Absent { scanned: 0 });
        };
        let lookup = scan(&data, identifier, self.config.match_mode)?;
        debug!(
            identifier = %identifier,
            found = lookup.is_found(),
            line = lookup.line(),
            "table lookup"
        );
        Ok(lookup)
    }

    /// All records in file order.
    pub fn records(&self) -> Result<Vec<Record>> {
        let Some(data) = self.read_bytes()? else {
            return Ok(Vec::new());
        };
        lines(&data)
            .enumerate()
            .map(|(idx, raw)| parse_record(idx + 1, raw))
            .collect()
    }

    /// Number of lines in the table (0 if the file is missing).
    pub fn line_count(&self) -> Result<usize> {
        Ok(self.read_bytes()?.map_or(0, |data| count_lines(&data)))
    }

    /// Remove exactly one line (1-based), keeping every other line's bytes
    /// and order.
    ///
    /// The file shrinks by the length of the removed line including its
    /// newline, if it had one.
    pub fn delete_line(&self, line: usize) -> Result<()> {
        let data = fs::read(&self.path).map_err(|e| self.unavailable(e))?;
        let (start, tail) = locate_line(&data, line)?;

        match self.config.compaction {
            Compaction::InPlace => self.rewrite_in_place(start as u64, tail),
            Compaction::AtomicRename => self.rewrite_atomic(&[&data[..start], tail]),
        }
        .map_err(|e| self.unavailable(e))?;

        debug!(
            line,
            removed = data.len() - start - tail.len(),
            compaction = ?self.config.compaction,
            path = %self.path.display(),
            "deleted table line"
        );
        Ok(())
    }

    /// Append a record as the new last line, creating the file if needed.
    ///
    /// Returns the byte offset the line was written at.
    pub fn append(&self, record: &Record) -> Result<u64> {
        self.append_line(record.to_line().as_bytes())
            .map_err(|e| self.unavailable(e))
    }

    /// Remove any record stored under the same identifier, then append.
    ///
    /// Deleting before appending keeps at most one line per identifier.
    /// With [`Compaction::AtomicRename`] the removal and the new last line
    /// land in a single rename, so a failed write leaves the old record in
    /// place.
    pub fn upsert(&self, record: &Record) -> Result<Upsert> {
        let Lookup::Found { line, record: previous } = self.find(&record.identifier)? else {
            self.append(record)?;
            return Ok(Upsert::Inserted);
        };
        match self.config.compaction {
            Compaction::AtomicRename => self.replace_line(line, record)?,
            Compaction::InPlace => {
                self.delete_line(line)?;
                self.append(record)?;
            }
        }
        Ok(Upsert::Replaced { line, previous })
    }

    fn replace_line(&self, line: usize, record: &Record) -> Result<()> {
        let data = fs::read(&self.path).map_err(|e| self.unavailable(e))?;
        let (start, tail) = locate_line(&data, line)?;
        let separator: &[u8] = if tail.is_empty() || tail.ends_with(b"\n") {
            b""
        } else {
            b"\n"
        };
        let new_line = record.to_line();
        self.rewrite_atomic(&[&data[..start], tail, separator, new_line.as_bytes()])
            .map_err(|e| self.unavailable(e))?;

        debug!(line, path = %self.path.display(), "replaced table line");
        Ok(())
    }

    fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.unavailable(e)),
        }
    }

    fn append_line(&self, line: &[u8]) -> io::Result<u64> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;

        let mut offset = file.metadata()?.len();
        let mut missing_newline = false;
        if offset > 0 {
            file.seek(SeekFrom::End(-1))?;
            let mut last = [0u8; 1];
            file.read_exact(&mut last)?;
            missing_newline = last[0] != b'\n';
        }

        let mut writer = BufWriter::new(file);
        if missing_newline {
            // Terminate a hand-edited last line so it stays intact.
            writer.write_all(b"\n")?;
            offset += 1;
        }
        writer.write_all(line)?;
        writer.flush()?;
        if self.config.sync_on_write {
            writer.get_ref().sync_all()?;
        }

        debug!(offset, len = line.len(), path = %self.path.display(), "appended table line");
        Ok(offset)
    }

    fn rewrite_in_place(&self, start: u64, tail: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new().write(true).open(&self.path)?;
        file.set_len(start)?;
        if !tail.is_empty() {
            file.seek(SeekFrom::Start(start))?;
            file.write_all(tail)?;
        }
        if self.config.sync_on_write {
            file.sync_all()?;
        }
        Ok(())
    }

    fn rewrite_atomic(&self, parts: &[&[u8]]) -> io::Result<()> {
        let mut tmp = NamedTempFile::new_in(parent_dir(&self.path))?;
        for part in parts {
            tmp.write_all(part)?;
        }
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        let permissions = fs::metadata(&self.path)?.permissions();
        fs::set_permissions(tmp.path(), permissions)?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn unavailable(&self, source: io::Error) -> TableError {
        TableError::Unavailable {
            path: self.path.clone(),
            source,
        }
    }
}

/// Byte offset where 1-based `line` starts, and everything after it.
fn locate_line(data: &[u8], line: usize) -> Result<(usize, &[u8])> {
    let total = count_lines(data);
    if line == 0 || line > total {
        return Err(TableError::LineOutOfRange { line, total });
    }
    let from_target = skip_lines(data, line - 1);
    let tail = skip_lines(from_target, 1);
    Ok((data.len() - from_target.len(), tail))
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn scan(data: &[u8], query: &Identifier, mode: MatchMode) -> Result<Lookup> {
    let mut scanned = 0;
    for (idx, raw) in lines(data).enumerate() {
        let line = idx + 1;
        let found = match mode {
            MatchMode::Exact => {
                let record = parse_record(line, raw)?;
                (record.identifier == *query).then_some(record)
            }
            MatchMode::LegacySubstring => {
                let record = parse_record(line, raw)?;
                if legacy_contains(raw, query) {
                    Some(Record {
                        identifier: query.clone(),
                        link: record.link,
                    })
                } else {
                    (record.identifier == *query).then_some(record)
                }
            }
        };
        if let Some(record) = found {
            return Ok(Lookup::Found { line, record });
        }
        scanned = line;
    }
    Ok(Lookup::Absent { scanned })
}

fn parse_record(line: usize, raw: &[u8]) -> Result<Record> {
    let text = std::str::from_utf8(raw).map_err(|e| corrupt(line, e))?;
    Record::parse_line(text).map_err(|e| corrupt(line, e))
}

fn corrupt(line: usize, reason: impl std::fmt::Display) -> TableError {
    warn!(line, %reason, "corrupt table line");
    TableError::CorruptLine {
        line,
        reason: reason.to_string(),
    }
}

/// Split `raw` at the query's boundary, decode the stored key segment, and
/// test whether the result contains the query's canonical text.
///
/// Legacy writers stored the key as uppercase hex of the identifier's hex
/// text, so decoding it yields `name:<hex>` again. Decoded hex is folded to
/// lowercase before comparing. Lines shorter than the boundary never match.
fn legacy_contains(raw: &[u8], query: &Identifier) -> bool {
    let boundary = query.boundary();
    if raw.len() < boundary {
        return false;
    }
    let (prefix, rest) = raw.split_at(boundary);
    let key_segment = rest.split(|&b| b == b'\t').next().unwrap_or_default();

    let mut decoded = decode_hex_prefix(key_segment);
    decoded.make_ascii_lowercase();
    let mut haystack = prefix.to_vec();
    haystack.extend(decoded);
    let needle = query.to_canonical();
    haystack
        .windows(needle.len())
        .any(|w| w == needle.as_bytes())
}

/// Decode the leading run of hex digit pairs, ignoring whatever follows.
fn decode_hex_prefix(segment: &[u8]) -> Vec<u8> {
    let digits = segment.iter().take_while(|b| b.is_ascii_hexdigit()).count();
    hex::decode(&segment[..digits - digits % 2]).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, link: &str) -> Record {
        Record::new(Identifier::parse(id).unwrap(), link).unwrap()
    }

    fn table_in(dir: &tempfile::TempDir, config: TableConfig) -> RecordTable {
        RecordTable::new(dir.path().join("storage.txt"), config)
    }

    fn both_compactions() -> [TableConfig; 2] {
        [
            TableConfig {
                compaction: Compaction::AtomicRename,
                ..TableConfig::default()
            },
            TableConfig {
                compaction: Compaction::InPlace,
                ..TableConfig::default()
            },
        ]
    }

    #[test]
    fn append_and_find() {
        let dir = tempfile::tempdir().unwrap();
        let table = table_in(&dir, TableConfig::default());
        let alice = record("alice:0a0b", "ipfs://Qm1");

        assert_eq!(table.append(&alice).unwrap(), 0);
        let lookup = table.find(&alice.identifier).unwrap();
        assert_eq!(
            lookup,
            Lookup::Found {
                line: 1,
                record: alice
            }
        );
    }

    #[test]
    fn find_on_missing_file_does_not_create_it() {
        let dir = tempfile::tempdir().unwrap();
        let table = table_in(&dir, TableConfig::default());
        let lookup = table.find(&Identifier::parse("alice:0a").unwrap()).unwrap();
        assert_eq!(lookup, Lookup::Absent { scanned: 0 });
        assert!(!table.exists());
    }

    #[test]
    fn absent_reports_lines_scanned() {
        let dir = tempfile::tempdir().unwrap();
        let table = table_in(&dir, TableConfig::default());
        table.append(&record("alice:0a", "l1")).unwrap();
        table.append(&record("bob:0b", "l2")).unwrap();

        let lookup = table.find(&Identifier::parse("carol:0c").unwrap()).unwrap();
        assert_eq!(lookup, Lookup::Absent { scanned: 2 });
        assert_eq!(lookup.line(), 2);
    }

    #[test]
    fn lookup_ignores_stored_hex_casing() {
        let dir = tempfile::tempdir().unwrap();
        let table = table_in(&dir, TableConfig::default());
        fs::write(table.path(), "alice:0A0B\tipfs://Qm1\n").unwrap();

        let found = table
            .find(&Identifier::parse("alice:0a0b").unwrap())
            .unwrap()
            .into_record()
            .unwrap();
        assert_eq!(found.link, "ipfs://Qm1");
    }

    #[test]
    fn delete_middle_line_keeps_neighbours() {
        for config in both_compactions() {
            let dir = tempfile::tempdir().unwrap();
            let table = table_in(&dir, config.clone());
            let a = "alice:0a\tipfs://A\n";
            let b = "bob:0b\tipfs://B\n";
            let c = "carol:0c\tipfs://C\n";
            fs::write(table.path(), format!("{a}{b}{c}")).unwrap();
            let before = fs::metadata(table.path()).unwrap().len();

            table.delete_line(2).unwrap();

            let after = fs::read_to_string(table.path()).unwrap();
            assert_eq!(after, format!("{a}{c}"), "compaction {:?}", config.compaction);
            assert_eq!(after.len() as u64, before - b.len() as u64);
        }
    }

    #[test]
    fn delete_first_and_last_lines() {
        for config in both_compactions() {
            let dir = tempfile::tempdir().unwrap();
            let table = table_in(&dir, config);
            fs::write(table.path(), "a:0a\tA\nb:0b\tB\nc:0c\tC\n").unwrap();

            table.delete_line(1).unwrap();
            assert_eq!(fs::read_to_string(table.path()).unwrap(), "b:0b\tB\nc:0c\tC\n");

            table.delete_line(2).unwrap();
            assert_eq!(fs::read_to_string(table.path()).unwrap(), "b:0b\tB\n");

            table.delete_line(1).unwrap();
            assert_eq!(fs::read(table.path()).unwrap(), b"");
        }
    }

    #[test]
    fn delete_unterminated_last_line() {
        for config in both_compactions() {
            let dir = tempfile::tempdir().unwrap();
            let table = table_in(&dir, config);
            fs::write(table.path(), "a:0a\tA\nb:0b\tB").unwrap();

            table.delete_line(2).unwrap();
            assert_eq!(fs::read_to_string(table.path()).unwrap(), "a:0a\tA\n");
        }
    }

    #[test]
    fn delete_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let table = table_in(&dir, TableConfig::default());
        table.append(&record("alice:0a", "l")).unwrap();

        for line in [0, 2] {
            let err = table.delete_line(line).unwrap_err();
            assert!(
                matches!(err, TableError::LineOutOfRange { total: 1, .. }),
                "expected LineOutOfRange, got: {err}"
            );
        }
    }

    #[test]
    fn delete_on_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let table = table_in(&dir, TableConfig::default());
        assert!(matches!(
            table.delete_line(1).unwrap_err(),
            TableError::Unavailable { .. }
        ));
    }

    #[test]
    fn upsert_inserts_then_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let table = table_in(&dir, TableConfig::default());
        table.append(&record("bob:0b", "ipfs://B")).unwrap();

        let first = record("alice:0a", "ipfs://Qm1");
        assert_eq!(table.upsert(&first).unwrap(), Upsert::Inserted);
        assert_eq!(table.line_count().unwrap(), 2);

        let second = record("alice:0A", "ipfs://Qm2");
        assert_eq!(
            table.upsert(&second).unwrap(),
            Upsert::Replaced {
                line: 2,
                previous: first
            }
        );
        assert_eq!(table.line_count().unwrap(), 2);
        assert_eq!(
            fs::read_to_string(table.path()).unwrap(),
            "bob:0b\tipfs://B\nalice:0a\tipfs://Qm2\n"
        );
    }

    #[test]
    fn upsert_replace_is_identical_under_both_compactions() {
        for config in both_compactions() {
            let dir = tempfile::tempdir().unwrap();
            let table = table_in(&dir, config.clone());
            // Unterminated last line after the replaced one.
            fs::write(table.path(), "alice:0a\tA1\nbob:0b\tB").unwrap();

            let outcome = table.upsert(&record("alice:0a", "A2")).unwrap();
            assert!(matches!(outcome, Upsert::Replaced { line: 1, .. }));
            assert_eq!(
                fs::read_to_string(table.path()).unwrap(),
                "bob:0b\tB\nalice:0a\tA2\n",
                "compaction {:?}",
                config.compaction
            );
        }
    }

    #[test]
    fn atomic_upsert_of_last_line() {
        let dir = tempfile::tempdir().unwrap();
        let table = table_in(&dir, TableConfig::default());
        fs::write(table.path(), "bob:0b\tB\nalice:0a\tA1").unwrap();

        table.upsert(&record("alice:0a", "A2")).unwrap();
        assert_eq!(
            fs::read_to_string(table.path()).unwrap(),
            "bob:0b\tB\nalice:0a\tA2\n"
        );
    }

    #[test]
    fn replaced_record_moves_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let table = table_in(&dir, TableConfig::default());
        table.upsert(&record("alice:0a", "A1")).unwrap();
        table.upsert(&record("bob:0b", "B1")).unwrap();
        table.upsert(&record("alice:0a", "A2")).unwrap();

        let links: Vec<String> = table.records().unwrap().into_iter().map(|r| r.link).collect();
        assert_eq!(links, vec!["B1", "A2"]);
    }

    #[test]
    fn corrupt_line_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let table = table_in(&dir, TableConfig::default());
        fs::write(table.path(), "alice:0a\tA\ngarbage without tab\n").unwrap();

        let err = table.find(&Identifier::parse("bob:0b").unwrap()).unwrap_err();
        assert!(
            matches!(err, TableError::CorruptLine { line: 2, .. }),
            "expected CorruptLine, got: {err}"
        );
    }

    #[test]
    fn exact_match_found_before_later_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let table = table_in(&dir, TableConfig::default());
        fs::write(table.path(), "alice:0a\tA\nnot a record\n").unwrap();

        let lookup = table.find(&Identifier::parse("alice:0a").unwrap()).unwrap();
        assert!(lookup.is_found());
    }

    #[test]
    fn exact_match_has_no_prefix_false_positive() {
        let dir = tempfile::tempdir().unwrap();
        let table = table_in(&dir, TableConfig::default());
        table.append(&record("a:0b0c", "long")).unwrap();

        let lookup = table.find(&Identifier::parse("a:0b").unwrap()).unwrap();
        assert_eq!(lookup, Lookup::Absent { scanned: 1 });
    }

    fn legacy_table(dir: &tempfile::TempDir) -> RecordTable {
        let config = TableConfig {
            match_mode: MatchMode::LegacySubstring,
            ..TableConfig::default()
        };
        table_in(dir, config)
    }

    #[test]
    fn legacy_finds_double_hex_line() {
        let dir = tempfile::tempdir().unwrap();
        let table = legacy_table(&dir);
        // Key written as uppercase hex of the text "0a0b".
        fs::write(table.path(), "alice:30613062\tipfs://Qm1\n").unwrap();

        let query = Identifier::parse("alice:0a0b").unwrap();
        let lookup = table.find(&query).unwrap();
        assert_eq!(
            lookup,
            Lookup::Found {
                line: 1,
                record: Record::new(query, "ipfs://Qm1").unwrap(),
            }
        );
    }

    #[test]
    fn legacy_folds_key_casing() {
        let dir = tempfile::tempdir().unwrap();
        let table = legacy_table(&dir);
        // Written from "alice:0A0B".
        fs::write(table.path(), "alice:30413042\tipfs://Qm1\n").unwrap();

        let lookup = table.find(&Identifier::parse("alice:0a0b").unwrap()).unwrap();
        assert_eq!(lookup.line(), 1);
        assert!(lookup.is_found());
    }

    #[test]
    fn legacy_matches_contained_identifier() {
        let dir = tempfile::tempdir().unwrap();
        let table = legacy_table(&dir);
        // Double-hex line for "a:0b0c"; the text "a:0b" is a substring.
        fs::write(table.path(), "a:30623063\tlong\n").unwrap();

        let lookup = table.find(&Identifier::parse("a:0b").unwrap()).unwrap();
        assert!(lookup.is_found());
    }

    #[test]
    fn legacy_also_matches_canonical_lines() {
        let dir = tempfile::tempdir().unwrap();
        let table = legacy_table(&dir);
        fs::write(table.path(), "bob:30623062\tB-old\n").unwrap();
        table.append(&record("alice:0a", "A")).unwrap();

        let found = table
            .find(&Identifier::parse("alice:0A").unwrap())
            .unwrap();
        assert_eq!(found.line(), 2);
        assert_eq!(found.into_record().unwrap().link, "A");

        let bob = table.find(&Identifier::parse("bob:0b0b").unwrap()).unwrap();
        assert_eq!(bob.line(), 1);
    }

    #[test]
    fn legacy_upsert_rewrites_line_canonically() {
        let dir = tempfile::tempdir().unwrap();
        let table = legacy_table(&dir);
        fs::write(
            table.path(),
            "alice:30613062\tipfs://Qm1\nbob:0b\tB\n",
        )
        .unwrap();

        let outcome = table.upsert(&record("alice:0a0b", "ipfs://Qm2")).unwrap();
        assert!(matches!(outcome, Upsert::Replaced { line: 1, .. }));
        assert_eq!(
            fs::read_to_string(table.path()).unwrap(),
            "bob:0b\tB\nalice:0a0b\tipfs://Qm2\n"
        );
        let again = table.find(&Identifier::parse("alice:0a0b").unwrap()).unwrap();
        assert_eq!(again.line(), 2);
    }

    #[test]
    fn legacy_short_line_is_not_a_match() {
        let dir = tempfile::tempdir().unwrap();
        let table = legacy_table(&dir);
        table.append(&record("b:0b", "B")).unwrap();

        let lookup = table
            .find(&Identifier::parse("alice-long:0a").unwrap())
            .unwrap();
        assert_eq!(lookup, Lookup::Absent { scanned: 1 });
    }

    #[test]
    fn decode_hex_prefix_stops_at_non_hex() {
        assert_eq!(decode_hex_prefix(b"0a0bzz"), vec![0x0a, 0x0b]);
        assert_eq!(decode_hex_prefix(b"0a0"), vec![0x0a]);
        assert!(decode_hex_prefix(b"").is_empty());
    }

    #[test]
    fn append_terminates_unterminated_last_line() {
        let dir = tempfile::tempdir().unwrap();
        let table = table_in(&dir, TableConfig::default());
        fs::write(table.path(), "alice:0a\tA").unwrap();

        let offset = table.append(&record("bob:0b", "B")).unwrap();
        assert_eq!(offset, 11);
        assert_eq!(
            fs::read_to_string(table.path()).unwrap(),
            "alice:0a\tA\nbob:0b\tB\n"
        );
    }

    #[test]
    fn append_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let table = RecordTable::new(
            dir.path().join("nested/deeper/storage.txt"),
            TableConfig::default(),
        );
        table.append(&record("alice:0a", "A")).unwrap();
        assert!(table.exists());
    }

    #[test]
    fn sync_on_write_mode() {
        let dir = tempfile::tempdir().unwrap();
        let config = TableConfig {
            sync_on_write: true,
            ..TableConfig::default()
        };
        let table = table_in(&dir, config);
        table.upsert(&record("alice:0a", "A1")).unwrap();
        table.upsert(&record("alice:0a", "A2")).unwrap();
        assert_eq!(table.records().unwrap(), vec![record("alice:0a", "A2")]);
    }
}
