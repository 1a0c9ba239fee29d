use crate::artifacts::core::atomic;
use crate::artifacts::hash::content_hash::ContentHash;
use anyhow::Context;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Pointer file linking a working directory to its repository root
pub const REPO_POINTER_FILE: &str = ".repo_path";

/// The user's working directory
///
/// Paths handed to the engine are resolved against it, and the files the
/// engine writes back (restores, branch switches) land in it.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
    /// Repository root, skipped when the root lives inside the working tree
    repository_root: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>, repository_root: Box<Path>) -> Self {
        Workspace {
            path,
            repository_root,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute, normalised form of a user-supplied path
    ///
    /// Existing files are canonicalised; for missing files the parent is
    /// canonicalised when it exists, so a deleted file still resolves to the
    /// same path it was committed under.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.path.join(path)
        };
        let absolute = normalize(&absolute);

        if let Ok(canonical) = absolute.canonicalize() {
            return canonical;
        }

        match (absolute.parent(), absolute.file_name()) {
            (Some(parent), Some(name)) => parent
                .canonicalize()
                .map(|parent| parent.join(name))
                .unwrap_or(absolute),
            _ => absolute,
        }
    }

    /// Path relative to the working directory when it lies inside it
    pub fn display_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.path)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }

    /// Every visible regular file under the working directory, sorted
    ///
    /// Hidden entries (names starting with `.`) and the repository root are
    /// skipped.
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.path)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                !Self::is_hidden(&entry.file_name().to_string_lossy())
                    && entry.path() != self.repository_root.as_ref()
            });

        for entry in walker {
            let entry = entry
                .with_context(|| format!("Unable to list {}", self.path.display()))?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    fn is_hidden(name: &str) -> bool {
        name.starts_with('.')
    }

    /// Replace a working file with `source`, atomically
    pub fn write_from(&self, source: &Path, destination: &Path) -> anyhow::Result<ContentHash> {
        atomic::copy_atomically(source, destination)
    }
}

/// Lexically remove `.` and `..` components
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    normalized
}
