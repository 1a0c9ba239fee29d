use crate::areas::repository::Repository;
use crate::artifacts::status::file_change::FileChangeType;
use derive_new::new;
use std::collections::BTreeSet;
use std::path::PathBuf;

pub type FileSet = BTreeSet<PathBuf>;

/// One point-in-time view of the working directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    /// Staged source paths, in staging order
    pub staged: Vec<PathBuf>,
    pub modified: FileSet,
    pub untracked: FileSet,
}

impl StatusInfo {
    /// Sections in display order, each with its (possibly empty) files
    pub fn sections(&self) -> Vec<(FileChangeType, Vec<&PathBuf>)> {
        vec![
            (FileChangeType::Staged, self.staged.iter().collect()),
            (FileChangeType::Modified, self.modified.iter().collect()),
            (FileChangeType::Untracked, self.untracked.iter().collect()),
        ]
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self) -> anyhow::Result<StatusInfo> {
        let staged = self
            .repository
            .staging()?
            .entries()
            .iter()
            .map(|entry| entry.source.clone())
            .collect::<Vec<_>>();
        let staged_set = staged.iter().collect::<BTreeSet<_>>();

        let inspector = self.repository.inspector();
        let mut modified = FileSet::new();
        let mut untracked = FileSet::new();

        for file in self.repository.workspace().list_files()? {
            if staged_set.contains(&file) {
                continue;
            }

            match self.repository.log().latest_entry_for(&file)? {
                Some(tracked) => {
                    if inspector.is_modified(&file, &tracked)? {
                        modified.insert(file);
                    }
                }
                None => {
                    untracked.insert(file);
                }
            }
        }

        Ok(StatusInfo {
            staged,
            modified,
            untracked,
        })
    }
}
