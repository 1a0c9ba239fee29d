use crate::areas::commit_log::TrackedEntry;
use crate::areas::repository::Repository;
use crate::artifacts::hash::content_hash::ContentHash;
use crate::artifacts::hash::hasher::Hasher;
use crate::errors::KeeperError;
use derive_new::new;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Compares working files with their most recently recorded versions
///
/// Read-only: nothing here touches the working directory, the log or the
/// version store.
#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl<'r> Inspector<'r> {
    /// Whether the working copy of `path` differs from the version recorded
    /// for it by the latest commit that touched it
    ///
    /// Untracked and missing files are never in conflict.
    pub fn has_conflict(&self, path: &Path) -> anyhow::Result<bool> {
        match self.repository.log().latest_entry_for(path)? {
            Some(tracked) => self.differs_from_version(path, &tracked),
            None => Ok(false),
        }
    }

    /// Files of the most recent commit whose working copy has diverged
    pub fn list_conflicts(&self) -> anyhow::Result<BTreeSet<PathBuf>> {
        let mut conflicts = BTreeSet::new();

        let Some(latest) = self.repository.log().latest()? else {
            return Ok(conflicts);
        };

        for entry in latest.entries() {
            let tracked = TrackedEntry {
                commit_id: latest.id().clone(),
                entry: entry.clone(),
            };
            if self.differs_from_version(&entry.original_path, &tracked)? {
                conflicts.insert(entry.original_path.clone());
            }
        }

        Ok(conflicts)
    }

    /// Whether a tracked file's working copy differs from its recorded hash
    ///
    /// Cheaper than [`Self::has_conflict`]: the version file is not read.
    pub fn is_modified(&self, path: &Path, tracked: &TrackedEntry) -> anyhow::Result<bool> {
        if !path.is_file() {
            return Ok(false);
        }

        Ok(Hasher::digest_file(path)? != tracked.entry.content_hash)
    }

    fn differs_from_version(&self, path: &Path, tracked: &TrackedEntry) -> anyhow::Result<bool> {
        if !path.is_file() {
            return Ok(false);
        }

        let working = Hasher::digest_file(path)?;
        let recorded = self.recorded_digest(tracked)?;

        Ok(working != recorded)
    }

    fn recorded_digest(&self, tracked: &TrackedEntry) -> anyhow::Result<ContentHash> {
        match self.repository.versions().digest(&tracked.entry.version_path) {
            Ok(digest) => Ok(digest),
            Err(err) if matches!(
                err.downcast_ref::<KeeperError>(),
                Some(KeeperError::NotFound { .. })
            ) =>
            {
                warn!(
                    version = %tracked.entry.version_path,
                    "version file is missing, comparing against the recorded hash"
                );
                Ok(tracked.entry.content_hash.clone())
            }
            Err(err) => Err(err),
        }
    }
}
