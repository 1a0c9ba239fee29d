use crate::areas::repository::Repository;
use crate::artifacts::log::commit_record::FileEntry;
use crate::errors::KeeperError;
use std::path::Path;
use tracing::info;

impl Repository {
    /// Restore `target` from its latest recorded version, or from the commit
    /// `commit_id` when one is given
    pub fn rollback(&self, target: &str, commit_id: Option<&str>) -> anyhow::Result<()> {
        let _lock = self.lock()?;
        let destination = self.workspace().resolve(Path::new(target));

        let entry = match commit_id {
            Some(commit_id) => {
                let record = self.log().find_by_id(commit_id)?;
                Self::match_entry(record.entries(), &destination)
                    .cloned()
                    .ok_or_else(|| {
                        KeeperError::not_found(
                            "file in commit",
                            format!("{} in {}", target, record.id().to_short()),
                        )
                    })?
            }
            None => {
                self.log()
                    .latest_entry_for(&destination)?
                    .ok_or_else(|| KeeperError::not_found("committed version of", target))?
                    .entry
            }
        };

        self.versions()
            .restore(&entry.version_path, &destination, &entry.content_hash)?;

        info!(target = %destination.display(), version = %entry.version_path, "rolled back");
        writeln!(
            self.writer(),
            "Rolled back {} to version: {}",
            target,
            entry.version_path
        )?;

        Ok(())
    }

    /// Entry recorded under `destination`, else the only one sharing its
    /// basename
    fn match_entry<'e>(entries: &'e [FileEntry], destination: &Path) -> Option<&'e FileEntry> {
        if let Some(entry) = entries
            .iter()
            .find(|entry| entry.original_path == destination)
        {
            return Some(entry);
        }

        let name = destination.file_name()?;
        let mut matches = entries
            .iter()
            .filter(|entry| entry.original_path.file_name() == Some(name));

        match (matches.next(), matches.next()) {
            (Some(entry), None) => Some(entry),
            _ => None,
        }
    }
}
