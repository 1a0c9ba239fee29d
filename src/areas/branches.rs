//! Branch store
//!
//! A branch is a plain directory `<root>/branches/<name>/` holding a set of
//! files. Switching copies the branch's regular files over the working
//! directory; the active branch name is remembered in `<root>/.current_branch`.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::atomic;
use crate::errors::KeeperError;
use anyhow::Context;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const BRANCHES_DIR: &str = "branches";
pub const CURRENT_BRANCH_FILE: &str = ".current_branch";

#[derive(Debug)]
pub struct Branches {
    /// Repository root
    root: Box<Path>,
}

impl Branches {
    pub fn new(root: Box<Path>) -> Self {
        Branches { root }
    }

    pub fn branches_path(&self) -> PathBuf {
        self.root.join(BRANCHES_DIR)
    }

    pub fn branch_path(&self, name: &BranchName) -> PathBuf {
        self.branches_path().join(name.as_ref())
    }

    pub fn exists(&self, name: &BranchName) -> bool {
        self.branch_path(name).is_dir()
    }

    pub fn create(&self, name: &BranchName) -> anyhow::Result<PathBuf> {
        let path = self.branch_path(name);
        if path.exists() {
            return Err(KeeperError::already_exists("branch", name).into());
        }

        std::fs::create_dir_all(&path)
            .with_context(|| format!("Unable to create branch directory {}", path.display()))?;

        Ok(path)
    }

    /// Directory of an existing branch
    pub fn require(&self, name: &BranchName) -> anyhow::Result<PathBuf> {
        if !self.exists(name) {
            return Err(KeeperError::not_found("branch", name).into());
        }

        Ok(self.branch_path(name))
    }

    /// All branches, sorted by name
    pub fn list(&self) -> anyhow::Result<Vec<BranchName>> {
        let path = self.branches_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut branches = Vec::new();
        for entry in WalkDir::new(&path).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Unable to list {}", path.display()))?;
            if !entry.file_type().is_dir() {
                continue;
            }

            // directories created by hand may not be valid branch names
            if let Ok(name) = BranchName::try_parse(entry.file_name().to_string_lossy().to_string())
            {
                branches.push(name);
            }
        }

        Ok(branches)
    }

    /// Regular files directly inside a branch directory, sorted by name
    pub fn files(&self, name: &BranchName) -> anyhow::Result<Vec<PathBuf>> {
        let path = self.require(name)?;

        let mut files = Vec::new();
        for entry in WalkDir::new(&path).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Unable to list {}", path.display()))?;
            let is_temp = entry.file_name().to_string_lossy().starts_with(".tmp-");
            if entry.file_type().is_file() && !is_temp {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    pub fn current(&self) -> anyhow::Result<Option<BranchName>> {
        let path = self.root.join(CURRENT_BRANCH_FILE);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Unable to read {}", path.display()))?;
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }

        Ok(BranchName::try_parse(content.to_string()).ok())
    }

    pub fn set_current(&self, name: &BranchName) -> anyhow::Result<()> {
        atomic::write_bytes_atomically(
            &self.root.join(CURRENT_BRANCH_FILE),
            name.as_ref().as_bytes(),
        )
    }
}
