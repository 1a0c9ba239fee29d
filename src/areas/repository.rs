use crate::areas::branches::Branches;
use crate::areas::commit_log::{CommitLog, LOG_FILE};
use crate::areas::staging::{STAGING_DIR, StagingArea};
use crate::areas::version_store::VersionStore;
use crate::areas::workspace::{REPO_POINTER_FILE, Workspace};
use crate::artifacts::core::clock::Clock;
use crate::artifacts::log::version_path::VERSIONS_DIR;
use crate::artifacts::status::bypass::{BYPASS_FILE, BypassList};
use crate::artifacts::status::inspector::Inspector;
use crate::artifacts::status::status_info::Status;
use crate::errors::KeeperError;
use anyhow::Context;
use file_guard::{FileGuard, Lock};
use std::cell::{RefCell, RefMut};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const LOCK_FILE: &str = ".lock";

/// Everything an operation needs: the repository root, the user's working
/// directory, the stores, the clock and the output writer
pub struct Repository {
    root: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    workspace: Workspace,
    versions: VersionStore,
    log: CommitLog,
    staging: RefCell<StagingArea>,
    branches: Branches,
    clock: Box<dyn Clock>,
}

/// Exclusive hold on `<root>/.lock`, released on drop
pub struct RepositoryLock {
    _guard: FileGuard<Box<File>>,
}

impl Repository {
    pub fn new(
        root: &Path,
        work_dir: &Path,
        clock: Box<dyn Clock>,
        writer: Box<dyn std::io::Write>,
    ) -> anyhow::Result<Self> {
        let root = root
            .canonicalize()
            .with_context(|| format!("Unable to resolve repository root {}", root.display()))?;
        let work_dir = work_dir.canonicalize().with_context(|| {
            format!("Unable to resolve working directory {}", work_dir.display())
        })?;

        Ok(Repository {
            writer: RefCell::new(writer),
            workspace: Workspace::new(
                work_dir.into_boxed_path(),
                root.clone().into_boxed_path(),
            ),
            versions: VersionStore::new(root.clone().into_boxed_path()),
            log: CommitLog::new(root.join(LOG_FILE).into_boxed_path()),
            staging: RefCell::new(StagingArea::new(root.join(STAGING_DIR).into_boxed_path())),
            branches: Branches::new(root.clone().into_boxed_path()),
            clock,
            root: root.into_boxed_path(),
        })
    }

    /// Open the repository a working directory points to through its
    /// `.repo_path` file
    pub fn open(
        work_dir: &Path,
        clock: Box<dyn Clock>,
        writer: Box<dyn std::io::Write>,
    ) -> anyhow::Result<Self> {
        let root = Self::read_pointer(work_dir)?;

        if !root.join(VERSIONS_DIR).is_dir() || !root.join(LOG_FILE).is_file() {
            return Err(KeeperError::NotInitialized(format!(
                "{} has no version store or commit log",
                root.display()
            ))
            .into());
        }

        debug!(root = %root.display(), "opening repository");
        Self::new(&root, work_dir, clock, writer)
    }

    fn read_pointer(work_dir: &Path) -> anyhow::Result<PathBuf> {
        let pointer = work_dir.join(REPO_POINTER_FILE);
        if !pointer.is_file() {
            return Err(KeeperError::NotInitialized(format!(
                "no {} in {}",
                REPO_POINTER_FILE,
                work_dir.display()
            ))
            .into());
        }

        let content = std::fs::read_to_string(&pointer)
            .with_context(|| format!("Unable to read {}", pointer.display()))?;
        let root = content.trim();
        if root.is_empty() {
            return Err(KeeperError::NotInitialized(format!("{} is empty", pointer.display())).into());
        }

        Ok(PathBuf::from(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn versions(&self) -> &VersionStore {
        &self.versions
    }

    pub fn log(&self) -> &CommitLog {
        &self.log
    }

    /// Staging area, freshly loaded from disk
    pub fn staging(&self) -> anyhow::Result<RefMut<'_, StagingArea>> {
        let mut staging = self.staging.borrow_mut();
        staging.rehydrate()?;
        Ok(staging)
    }

    pub fn branches(&self) -> &Branches {
        &self.branches
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn bypass(&self) -> anyhow::Result<BypassList> {
        BypassList::load(&self.root.join(BYPASS_FILE))
    }

    pub fn working_status(&'_ self) -> Status<'_> {
        Status::new(self)
    }

    pub fn inspector(&'_ self) -> Inspector<'_> {
        Inspector::new(self)
    }

    /// Take the repository's exclusive lock
    ///
    /// Held across every mutating operation so two processes never interleave
    /// snapshots, log appends or staging updates.
    pub fn lock(&self) -> anyhow::Result<RepositoryLock> {
        let path = self.root.join(LOCK_FILE);
        let file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .with_context(|| format!("Unable to open lock file {}", path.display()))?;

        let guard = file_guard::lock(Box::new(file), Lock::Exclusive, 0, 1)
            .with_context(|| format!("Unable to lock {}", path.display()))?;

        Ok(RepositoryLock { _guard: guard })
    }
}
