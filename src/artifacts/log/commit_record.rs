//! Commit record
//!
//! A commit record describes one set of snapshots taken together.
//!
//! ## Format
//!
//! One line of the commit log:
//! ```text
//! ck1|<id>|<parent>|<timestamp>|<message>|<n>|<path>|<hash>|<version>|...
//! ```
//!
//! `<n>` is the number of file entries and the line carries exactly `6 + 3n`
//! fields. The id is the digest of the canonical form
//! `ck1|<parent>|<timestamp>|<message>|<n>|<path>|<hash>|...`; version paths
//! are derived from the id and therefore not part of it.

use crate::artifacts::hash::content_hash::ContentHash;
use crate::artifacts::hash::hasher::Hasher;
use crate::artifacts::log::TIMESTAMP_FORMAT;
use crate::artifacts::log::codec::{FORMAT_MARKER, join_fields, split_fields};
use crate::artifacts::log::version_path::VersionPath;
use anyhow::Context;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

const HEADER_FIELDS: usize = 6;
const ENTRY_FIELDS: usize = 3;

/// One file captured by a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub original_path: PathBuf,
    pub content_hash: ContentHash,
    pub version_path: VersionPath,
}

/// A commit before its snapshots are written
///
/// The draft carries everything the identity depends on, so the id (and with
/// it the version file names) is known before any snapshot is taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitDraft {
    parent: Option<ContentHash>,
    timestamp: NaiveDateTime,
    message: String,
    files: Vec<(PathBuf, ContentHash)>,
}

impl CommitDraft {
    pub fn new(
        parent: Option<ContentHash>,
        timestamp: NaiveDateTime,
        message: String,
        files: Vec<(PathBuf, ContentHash)>,
    ) -> Self {
        CommitDraft {
            parent,
            timestamp,
            message,
            files,
        }
    }

    pub fn id(&self) -> ContentHash {
        let files = self
            .files
            .iter()
            .map(|(path, hash)| (path.as_path(), hash))
            .collect::<Vec<_>>();
        canonical_id(self.parent.as_ref(), self.timestamp, &self.message, &files)
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn files(&self) -> &[(PathBuf, ContentHash)] {
        &self.files
    }

    /// Attach the version paths, one per file and in file order
    pub fn into_record(self, version_paths: Vec<VersionPath>) -> anyhow::Result<CommitRecord> {
        if version_paths.len() != self.files.len() {
            anyhow::bail!(
                "expected {} version paths, got {}",
                self.files.len(),
                version_paths.len()
            );
        }

        let id = self.id();
        let entries = self
            .files
            .into_iter()
            .zip(version_paths)
            .map(|((original_path, content_hash), version_path)| FileEntry {
                original_path,
                content_hash,
                version_path,
            })
            .collect::<Vec<_>>();

        if let Some(entry) = entries.iter().find(|entry| !entry.version_path.belongs_to(&id)) {
            anyhow::bail!(
                "version path {} was not generated for commit {}",
                entry.version_path,
                id.to_short()
            );
        }

        Ok(CommitRecord {
            id,
            parent: self.parent,
            timestamp: self.timestamp,
            message: self.message,
            entries,
        })
    }
}

/// One logical commit, as stored in the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    id: ContentHash,
    parent: Option<ContentHash>,
    timestamp: NaiveDateTime,
    message: String,
    entries: Vec<FileEntry>,
}

impl CommitRecord {
    pub fn id(&self) -> &ContentHash {
        &self.id
    }

    pub fn parent(&self) -> Option<&ContentHash> {
        self.parent.as_ref()
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the message, for one-line output
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn entry_for(&self, original_path: &Path) -> Option<&FileEntry> {
        self.entries
            .iter()
            .find(|entry| entry.original_path == original_path)
    }

    /// Serialize to a single log line (without the trailing newline)
    pub fn to_line(&self) -> String {
        let mut fields = vec![
            FORMAT_MARKER.to_string(),
            self.id.to_string(),
            self.parent.as_ref().map(ToString::to_string).unwrap_or_default(),
            self.readable_timestamp(),
            self.message.clone(),
            self.entries.len().to_string(),
        ];

        for entry in &self.entries {
            fields.push(entry.original_path.to_string_lossy().to_string());
            fields.push(entry.content_hash.to_string());
            fields.push(entry.version_path.to_string());
        }

        join_fields(fields)
    }

    /// Parse a log line, verifying its structure and its id
    pub fn parse_line(line: &str) -> anyhow::Result<Self> {
        let fields = split_fields(line)?;

        if fields[0] != FORMAT_MARKER {
            anyhow::bail!("unsupported record format marker '{}'", fields[0]);
        }
        if fields.len() < HEADER_FIELDS {
            anyhow::bail!(
                "expected at least {} fields, found {}",
                HEADER_FIELDS,
                fields.len()
            );
        }

        let id = ContentHash::try_parse(&fields[1]).context("invalid commit id")?;
        let parent = match fields[2].as_str() {
            "" => None,
            parent => Some(ContentHash::try_parse(parent).context("invalid parent id")?),
        };
        let timestamp = NaiveDateTime::parse_from_str(&fields[3], TIMESTAMP_FORMAT)
            .with_context(|| format!("invalid timestamp '{}'", fields[3]))?;
        let message = fields[4].clone();
        let count = fields[5]
            .parse::<usize>()
            .with_context(|| format!("invalid entry count '{}'", fields[5]))?;

        let expected = count
            .checked_mul(ENTRY_FIELDS)
            .and_then(|n| n.checked_add(HEADER_FIELDS))
            .context("entry count overflows")?;
        if fields.len() != expected {
            anyhow::bail!(
                "entry count {} requires {} fields, found {}",
                count,
                expected,
                fields.len()
            );
        }

        let entries = fields[HEADER_FIELDS..]
            .chunks_exact(ENTRY_FIELDS)
            .map(|chunk| -> anyhow::Result<FileEntry> {
                Ok(FileEntry {
                    original_path: PathBuf::from(&chunk[0]),
                    content_hash: ContentHash::try_parse(&chunk[1])
                        .with_context(|| format!("invalid content hash for {}", chunk[0]))?,
                    version_path: VersionPath::try_parse(&chunk[2])?,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let files = entries
            .iter()
            .map(|entry| (entry.original_path.as_path(), &entry.content_hash))
            .collect::<Vec<_>>();
        let expected_id = canonical_id(parent.as_ref(), timestamp, &message, &files);
        if expected_id != id {
            anyhow::bail!("id {} does not match record contents", id.to_short());
        }

        if let Some(entry) = entries.iter().find(|entry| !entry.version_path.belongs_to(&id)) {
            anyhow::bail!("version path {} does not belong to this commit", entry.version_path);
        }

        Ok(CommitRecord {
            id,
            parent,
            timestamp,
            message,
            entries,
        })
    }
}

fn canonical_id(
    parent: Option<&ContentHash>,
    timestamp: NaiveDateTime,
    message: &str,
    files: &[(&Path, &ContentHash)],
) -> ContentHash {
    let mut fields = vec![
        FORMAT_MARKER.to_string(),
        parent.map(ToString::to_string).unwrap_or_default(),
        timestamp.format(TIMESTAMP_FORMAT).to_string(),
        message.to_string(),
        files.len().to_string(),
    ];

    for (path, hash) in files {
        fields.push(path.to_string_lossy().to_string());
        fields.push(hash.to_string());
    }

    Hasher::digest(join_fields(fields).as_bytes())
}
