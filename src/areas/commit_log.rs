//! Commit log
//!
//! The authoritative history: `<root>/commit_log.txt`, one `ck1` record per
//! line in append order.
//!
//! Reads go through [`CommitLog::scan`], a lazy pass over the file that can be
//! restarted at will. Lookups use a [`LogIndex`] built from one scan and kept
//! until the next append.

use crate::artifacts::core::atomic;
use crate::artifacts::hash::content_hash::ContentHash;
use crate::artifacts::log::commit_record::{CommitRecord, FileEntry};
use crate::errors::KeeperError;
use anyhow::Context;
use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

pub const LOG_FILE: &str = "commit_log.txt";

/// Shortest commit id prefix accepted by [`CommitLog::find_by_id`]
pub const MIN_ID_PREFIX: usize = 4;

#[derive(Debug)]
pub struct CommitLog {
    path: Box<Path>,
    index: RefCell<Option<LogIndex>>,
}

/// One line of the log, as seen by a raw scan
#[derive(Debug)]
pub enum LogLine {
    Record(CommitRecord),
    Corrupt(KeeperError),
}

/// Lazy pass over the log file
pub struct LogScan {
    lines: Option<std::io::Split<BufReader<File>>>,
    number: usize,
}

impl Iterator for LogScan {
    type Item = anyhow::Result<LogLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let lines = self.lines.as_mut()?;
            let raw = match lines.next()? {
                Ok(raw) => raw,
                Err(err) => {
                    self.lines = None;
                    return Some(Err(anyhow::Error::new(err).context("Unable to read commit log")));
                }
            };
            self.number += 1;

            let line = match String::from_utf8(raw) {
                Ok(line) => line,
                Err(_) => {
                    return Some(Ok(LogLine::Corrupt(KeeperError::CorruptRecord {
                        line: self.number,
                        detail: "line is not valid UTF-8".to_string(),
                    })));
                }
            };
            let line = line.strip_suffix('\r').unwrap_or(&line);

            if line.trim().is_empty() {
                continue;
            }

            return Some(Ok(match CommitRecord::parse_line(line) {
                Ok(record) => LogLine::Record(record),
                Err(err) => LogLine::Corrupt(KeeperError::CorruptRecord {
                    line: self.number,
                    detail: format!("{:#}", err),
                }),
            }));
        }
    }
}

/// A tracked file's most recent entry, with the commit that recorded it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedEntry {
    pub commit_id: ContentHash,
    pub entry: FileEntry,
}

/// Lookup tables derived from one scan of the log
#[derive(Debug, Default)]
pub struct LogIndex {
    records: Vec<CommitRecord>,
    by_id: HashMap<ContentHash, usize>,
    latest_by_message: HashMap<String, usize>,
    latest_by_path: HashMap<PathBuf, usize>,
}

impl LogIndex {
    fn insert(&mut self, record: CommitRecord) {
        if self.by_id.contains_key(record.id()) {
            warn!(id = %record.id(), "duplicate commit id in log, keeping the first record");
            return;
        }

        let position = self.records.len();
        self.by_id.insert(record.id().clone(), position);
        self.latest_by_message
            .insert(record.message().to_string(), position);
        for entry in record.entries() {
            self.latest_by_path
                .insert(entry.original_path.clone(), position);
        }

        self.records.push(record);
    }

    pub fn records(&self) -> &[CommitRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&CommitRecord> {
        self.records.last()
    }

    pub fn by_id(&self, id: &ContentHash) -> Option<&CommitRecord> {
        self.by_id.get(id).map(|&position| &self.records[position])
    }

    pub fn by_message(&self, message: &str) -> Option<&CommitRecord> {
        self.latest_by_message
            .get(message)
            .map(|&position| &self.records[position])
    }

    pub fn latest_entry_for(&self, original_path: &Path) -> Option<TrackedEntry> {
        let record = &self.records[*self.latest_by_path.get(original_path)?];

        record.entry_for(original_path).map(|entry| TrackedEntry {
            commit_id: record.id().clone(),
            entry: entry.clone(),
        })
    }

    /// Records whose id starts with `prefix`
    pub fn by_prefix(&self, prefix: &str) -> Vec<&CommitRecord> {
        self.records
            .iter()
            .filter(|record| record.id().matches_prefix(prefix))
            .collect()
    }
}

impl CommitLog {
    pub fn new(path: Box<Path>) -> Self {
        CommitLog {
            path,
            index: RefCell::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Create an empty log unless one already exists
    pub fn create(&self) -> anyhow::Result<()> {
        if !self.exists() {
            atomic::write_bytes_atomically(&self.path, b"")?;
        }

        Ok(())
    }

    /// Every line in append order, corrupt ones included
    pub fn scan(&self) -> anyhow::Result<LogScan> {
        if !self.exists() {
            return Ok(LogScan {
                lines: None,
                number: 0,
            });
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Unable to open commit log {}", self.path.display()))?;

        Ok(LogScan {
            lines: Some(BufReader::new(file).split(b'\n')),
            number: 0,
        })
    }

    /// Well-formed records in append order; corrupt lines are skipped with a
    /// warning
    pub fn records(&self) -> anyhow::Result<impl Iterator<Item = anyhow::Result<CommitRecord>>> {
        Ok(self.scan()?.filter_map(|line| match line {
            Ok(LogLine::Record(record)) => Some(Ok(record)),
            Ok(LogLine::Corrupt(err)) => {
                warn!("skipping log line: {}", err);
                None
            }
            Err(err) => Some(Err(err)),
        }))
    }

    pub fn index(&self) -> anyhow::Result<Ref<'_, LogIndex>> {
        if self.index.borrow().is_none() {
            let mut index = LogIndex::default();
            for record in self.records()? {
                index.insert(record?);
            }
            debug!(records = index.records.len(), "commit log indexed");

            *self.index.borrow_mut() = Some(index);
        }

        Ref::filter_map(self.index.borrow(), Option::as_ref)
            .map_err(|_| anyhow::anyhow!("commit log index unavailable"))
    }

    pub fn latest(&self) -> anyhow::Result<Option<CommitRecord>> {
        Ok(self.index()?.latest().cloned())
    }

    /// Most recent record carrying exactly `message`
    pub fn find_by_message(&self, message: &str) -> anyhow::Result<CommitRecord> {
        self.index()?
            .by_message(message)
            .cloned()
            .ok_or_else(|| KeeperError::not_found("commit with message", message).into())
    }

    /// Record whose id is `id`, or starts with it when at least
    /// [`MIN_ID_PREFIX`] hex digits are given
    pub fn find_by_id(&self, id: &str) -> anyhow::Result<CommitRecord> {
        let id = id.trim().to_ascii_lowercase();
        if id.len() < MIN_ID_PREFIX || !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(KeeperError::invalid_input(format!(
                "commit id '{}' must be at least {} hex digits",
                id, MIN_ID_PREFIX
            ))
            .into());
        }

        let index = self.index()?;
        if let Ok(full) = ContentHash::try_parse(&id)
            && let Some(record) = index.by_id(&full)
        {
            return Ok(record.clone());
        }

        match index.by_prefix(&id).as_slice() {
            [record] => Ok((*record).clone()),
            [] => Err(KeeperError::not_found("commit", id).into()),
            matches => Err(KeeperError::invalid_input(format!(
                "commit id '{}' is ambiguous ({} matches)",
                id,
                matches.len()
            ))
            .into()),
        }
    }

    pub fn latest_entry_for(&self, original_path: &Path) -> anyhow::Result<Option<TrackedEntry>> {
        Ok(self.index()?.latest_entry_for(original_path))
    }

    /// Append one record as the last durable write of a commit
    ///
    /// The whole log is rewritten to a temp file and renamed over the old one,
    /// so readers never see a partial line. Callers hold the repository lock.
    #[instrument(skip_all, fields(id = %record.id().to_short()))]
    pub fn append(&self, record: &CommitRecord) -> anyhow::Result<()> {
        let mut existing = Vec::new();
        if self.exists() {
            File::open(&self.path)
                .and_then(|mut file| file.read_to_end(&mut existing))
                .with_context(|| format!("Unable to read commit log {}", self.path.display()))?;
        }

        atomic::write_atomically(&self.path, |file| {
            file.write_all(&existing)?;
            if !existing.is_empty() && !existing.ends_with(b"\n") {
                file.write_all(b"\n")?;
            }
            file.write_all(record.to_line().as_bytes())?;
            file.write_all(b"\n")?;
            Ok(())
        })
        .with_context(|| format!("Unable to append to commit log {}", self.path.display()))?;

        *self.index.borrow_mut() = None;
        debug!("commit record appended");

        Ok(())
    }
}
