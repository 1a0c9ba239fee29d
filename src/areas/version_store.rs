//! Version store
//!
//! Immutable full copies of committed files, kept under `<root>/versions/`.
//! A version file is written exactly once, at commit time, and only read
//! afterwards.

use crate::artifacts::core::atomic;
use crate::artifacts::hash::content_hash::ContentHash;
use crate::artifacts::hash::hasher::Hasher;
use crate::artifacts::log::version_path::{VERSIONS_DIR, VersionPath};
use crate::errors::KeeperError;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

#[derive(Debug)]
pub struct VersionStore {
    /// Repository root; version paths are relative to it
    root: Box<Path>,
}

impl VersionStore {
    pub fn new(root: Box<Path>) -> Self {
        VersionStore { root }
    }

    pub fn versions_path(&self) -> PathBuf {
        self.root.join(VERSIONS_DIR)
    }

    pub fn path_of(&self, version: &VersionPath) -> PathBuf {
        version.resolve(&self.root)
    }

    pub fn contains(&self, version: &VersionPath) -> bool {
        self.path_of(version).is_file()
    }

    /// Copy `source` into the store under `version`
    ///
    /// The bytes written must digest to `expected`; a file that changed since
    /// it was hashed is rejected before anything lands in the store.
    #[instrument(skip_all, fields(version = %version))]
    pub fn snapshot(
        &self,
        version: &VersionPath,
        source: &Path,
        expected: &ContentHash,
    ) -> anyhow::Result<()> {
        let destination = self.path_of(version);
        if destination.exists() {
            return Err(KeeperError::already_exists("version", version).into());
        }

        atomic::copy_verified(source, &destination, expected).with_context(|| {
            format!("{} changed while it was being committed", source.display())
        })?;

        debug!(source = %source.display(), "snapshot written");
        Ok(())
    }

    /// Copy a version back to `destination`, atomically
    ///
    /// `destination` is only replaced when the stored bytes still digest to
    /// `expected`.
    #[instrument(skip_all, fields(version = %version))]
    pub fn restore(
        &self,
        version: &VersionPath,
        destination: &Path,
        expected: &ContentHash,
    ) -> anyhow::Result<()> {
        let source = self.path_of(version);
        if !source.is_file() {
            return Err(KeeperError::not_found("version", version).into());
        }

        atomic::copy_verified(&source, destination, expected)
            .with_context(|| format!("Unable to restore {}", destination.display()))?;

        debug!(destination = %destination.display(), "version restored");
        Ok(())
    }

    pub fn digest(&self, version: &VersionPath) -> anyhow::Result<ContentHash> {
        let source = self.path_of(version);
        if !source.is_file() {
            return Err(KeeperError::not_found("version", version).into());
        }

        Hasher::digest_file(&source)
    }
}
