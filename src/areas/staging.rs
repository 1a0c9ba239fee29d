//! Staging area
//!
//! Files queued for the next commit. Each staged file is copied to
//! `<root>/.staging/<basename>`; `.staging/.manifest` remembers where every copy
//! came from and in which order it was staged.
//!
//! ## Manifest format
//!
//! One line per staged file, `<basename>|<source path>`, both fields escaped
//! like commit log fields.

use crate::artifacts::core::atomic;
use crate::artifacts::log::codec::{join_fields, split_fields};
use crate::errors::KeeperError;
use anyhow::Context;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

pub const STAGING_DIR: &str = ".staging";
const MANIFEST_FILE: &str = ".manifest";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    /// Basename, also the name of the staged copy
    pub name: String,
    /// Absolute path the file was staged from
    pub source: PathBuf,
}

#[derive(Debug)]
pub struct StagingArea {
    path: Box<Path>,
    entries: Vec<StagedFile>,
    changed: bool,
}

impl StagingArea {
    pub fn new(path: Box<Path>) -> Self {
        StagingArea {
            path,
            entries: Vec::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn manifest_path(&self) -> PathBuf {
        self.path.join(MANIFEST_FILE)
    }

    pub fn copy_path(&self, entry: &StagedFile) -> PathBuf {
        self.path.join(&entry.name)
    }

    /// Load the manifest from disk
    ///
    /// Lines that cannot be parsed, and entries whose staged copy has gone
    /// missing, are dropped with a warning.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.entries.clear();
        self.changed = false;

        let manifest_path = self.manifest_path();
        if !manifest_path.exists() {
            return Ok(());
        }

        let manifest = std::fs::File::open(&manifest_path)
            .with_context(|| format!("Unable to open {}", manifest_path.display()))?;

        for (number, line) in std::io::BufReader::new(manifest).lines().enumerate() {
            let line = line.with_context(|| format!("Unable to read {}", manifest_path.display()))?;
            if line.is_empty() {
                continue;
            }

            let entry = match split_fields(&line).ok().as_deref() {
                Some([name, source]) => StagedFile {
                    name: name.clone(),
                    source: PathBuf::from(source),
                },
                _ => {
                    warn!(line = number + 1, "skipping malformed staging manifest line");
                    self.changed = true;
                    continue;
                }
            };

            if !self.copy_path(&entry).is_file() {
                warn!(name = %entry.name, "staged copy is missing, unstaging it");
                self.changed = true;
                continue;
            }

            self.entries.push(entry);
        }

        Ok(())
    }

    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let manifest_path = self.manifest_path();
        atomic::write_atomically(&manifest_path, |file| {
            for entry in &self.entries {
                let source = entry.source.to_string_lossy();
                writeln!(file, "{}", join_fields([entry.name.as_str(), &*source]))?;
            }
            Ok(())
        })?;

        self.changed = false;
        Ok(())
    }

    /// Copy `source` into the staging area
    ///
    /// A file with the same basename is replaced in place and keeps its
    /// position.
    pub fn add(&mut self, source: &Path) -> anyhow::Result<StagedFile> {
        let name = source
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| {
                KeeperError::invalid_input(format!("{} is not a file", source.display()))
            })?;
        if name == MANIFEST_FILE {
            return Err(KeeperError::invalid_input(format!(
                "{} cannot be staged: the name is reserved",
                name
            ))
            .into());
        }

        let entry = StagedFile {
            name,
            source: source.to_path_buf(),
        };
        atomic::copy_atomically(source, &self.copy_path(&entry))?;

        match self.entries.iter_mut().find(|staged| staged.name == entry.name) {
            Some(staged) => {
                if staged.source != entry.source {
                    warn!(
                        name = %entry.name,
                        previous = %staged.source.display(),
                        "replacing staged file with the same name"
                    );
                }
                *staged = entry.clone();
            }
            None => self.entries.push(entry.clone()),
        }
        self.changed = true;

        Ok(entry)
    }

    /// Unstage the entry called `name`, deleting its copy
    pub fn remove(&mut self, name: &str) -> anyhow::Result<Option<StagedFile>> {
        let Some(position) = self.entries.iter().position(|entry| entry.name == name) else {
            return Ok(None);
        };

        let entry = self.entries.remove(position);
        let copy_path = self.copy_path(&entry);
        match std::fs::remove_file(&copy_path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Unable to remove {}", copy_path.display()));
            }
        }
        self.changed = true;

        Ok(Some(entry))
    }

    /// Find a staged entry by the path it was staged from, falling back to
    /// its basename
    pub fn find(&self, source: &Path) -> Option<&StagedFile> {
        self.entries
            .iter()
            .find(|entry| entry.source == source)
            .or_else(|| {
                let name = source.file_name()?.to_string_lossy();
                self.entries.iter().find(|entry| entry.name == name)
            })
    }

    pub fn entries(&self) -> &[StagedFile] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every staged copy; called once a commit has been recorded
    pub fn clear(&mut self) -> anyhow::Result<()> {
        for entry in std::mem::take(&mut self.entries) {
            let copy_path = self.copy_path(&entry);
            if let Err(err) = std::fs::remove_file(&copy_path)
                && err.kind() != std::io::ErrorKind::NotFound
            {
                return Err(err)
                    .with_context(|| format!("Unable to remove {}", copy_path.display()));
            }
        }
        self.changed = true;

        self.write_updates()
    }
}
