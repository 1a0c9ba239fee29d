use crate::areas::repository::Repository;
use crate::artifacts::core::batch_report::BatchReport;
use crate::artifacts::hash::content_hash::ContentHash;
use crate::artifacts::hash::hasher::Hasher;
use crate::artifacts::log::commit_record::{CommitDraft, CommitRecord};
use crate::artifacts::log::version_path::VersionPath;
use crate::errors::KeeperError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// A file considered for a commit
struct Candidate {
    /// How the file was named by the user (or its staged name)
    argument: String,
    /// Path recorded in the log
    original: PathBuf,
    /// Where the bytes are read from: the working file or its staged copy
    source: PathBuf,
}

impl Repository {
    /// Snapshot files and record them as one commit
    ///
    /// A non-empty staging area takes precedence over `files`. The log record
    /// is written only after every snapshot is in place.
    #[instrument(skip_all)]
    pub fn commit(&self, message: &str, files: &[String]) -> anyhow::Result<BatchReport> {
        if message.trim().is_empty() {
            return Err(KeeperError::invalid_input("commit message cannot be empty").into());
        }

        let _lock = self.lock()?;
        let mut staging = self.staging()?;
        let mut report = BatchReport::default();

        let from_staging = !staging.is_empty();
        let candidates = if from_staging {
            if !files.is_empty() {
                writeln!(
                    self.writer(),
                    "Staging area is not empty; committing staged files only."
                )?;
                files.iter().for_each(|file| report.ignore(file));
            }

            staging
                .entries()
                .iter()
                .map(|entry| Candidate {
                    argument: entry.name.clone(),
                    original: entry.source.clone(),
                    source: staging.copy_path(entry),
                })
                .collect::<Vec<_>>()
        } else {
            files
                .iter()
                .map(|file| {
                    let resolved = self.workspace().resolve(Path::new(file));
                    Candidate {
                        argument: file.clone(),
                        original: resolved.clone(),
                        source: resolved,
                    }
                })
                .collect::<Vec<_>>()
        };

        let included = self.hash_candidates(candidates, &mut report)?;
        if included.is_empty() {
            return Err(KeeperError::invalid_input(format!(
                "nothing to commit ({})",
                report
            ))
            .into());
        }

        let record = self.record_commit(message, &included)?;

        if from_staging {
            staging.clear()?;
        }
        included
            .iter()
            .for_each(|(candidate, _)| report.succeed(candidate.argument.clone()));

        info!(id = %record.id(), files = included.len(), "commit recorded");
        writeln!(
            self.writer(),
            "[{}] {}",
            record.id().to_short(),
            record.short_message()
        )?;
        writeln!(self.writer(), " {} file(s) committed", included.len())?;

        Ok(report)
    }

    /// Drop ignored, missing and duplicate candidates and digest the rest
    fn hash_candidates(
        &self,
        candidates: Vec<Candidate>,
        report: &mut BatchReport,
    ) -> anyhow::Result<Vec<(Candidate, ContentHash)>> {
        let bypass = self.bypass()?;
        let mut seen = HashSet::new();
        let mut included = Vec::new();

        for candidate in candidates {
            if bypass.is_ignored(&candidate.argument, &candidate.original) {
                writeln!(self.writer(), "Skipping ignored file: {}", candidate.argument)?;
                report.ignore(candidate.argument);
                continue;
            }

            if !seen.insert(candidate.original.clone()) {
                report.ignore(candidate.argument);
                continue;
            }

            if !candidate.source.is_file() {
                warn!(file = %candidate.argument, "skipping missing file");
                report.skip(
                    candidate.argument.clone(),
                    KeeperError::not_found("file", &candidate.argument),
                );
                continue;
            }

            match Hasher::digest_file(&candidate.source) {
                Ok(hash) => included.push((candidate, hash)),
                Err(err) => report.skip(candidate.argument, format!("{:#}", err)),
            }
        }

        Ok(included)
    }

    /// Write the snapshots, then append the record
    fn record_commit(
        &self,
        message: &str,
        included: &[(Candidate, ContentHash)],
    ) -> anyhow::Result<CommitRecord> {
        let latest = self.log().latest()?;

        // timestamps never go backwards, even if the clock does
        let mut timestamp = self.clock().now();
        if let Some(latest) = &latest
            && latest.timestamp() > timestamp
        {
            timestamp = latest.timestamp();
        }

        let draft = CommitDraft::new(
            latest.map(|record| record.id().clone()),
            timestamp,
            message.to_string(),
            included
                .iter()
                .map(|(candidate, hash)| (candidate.original.clone(), hash.clone()))
                .collect(),
        );
        let id = draft.id();

        let mut version_paths = Vec::with_capacity(included.len());
        for (position, (candidate, hash)) in included.iter().enumerate() {
            let version = VersionPath::for_snapshot(&id, timestamp, position, &candidate.original);
            self.versions().snapshot(&version, &candidate.source, hash)?;
            version_paths.push(version);
        }

        let record = draft.into_record(version_paths)?;
        self.log().append(&record)?;

        Ok(record)
    }
}
