//! Write-to-temp-then-rename helpers
//!
//! Every file the engine publishes (snapshots, restored working files, the
//! commit log, branch copies, merge output) is first written to a hidden
//! sibling and renamed into place, so an observer sees either the old file or
//! the complete new one.

use crate::artifacts::hash::content_hash::ContentHash;
use crate::artifacts::hash::hasher::HashingWriter;
use anyhow::Context;
use fake::rand;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

pub fn temp_path_for(destination: &Path) -> anyhow::Result<PathBuf> {
    let dir = destination
        .parent()
        .with_context(|| format!("Invalid destination path {}", destination.display()))?;
    let name = destination
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(dir.join(format!(".tmp-{}-{}", name, rand::random::<u32>())))
}

/// Run `write` against a fresh temp file and rename it over `destination`
///
/// The temp file is synced before the rename and removed if anything fails.
pub fn write_atomically<T>(
    destination: &Path,
    write: impl FnOnce(&mut File) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    if let Some(parent) = destination.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Unable to create directory {}", parent.display()))?;
    }

    let temp_path = temp_path_for(destination)?;
    let result = (|| -> anyhow::Result<T> {
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .with_context(|| format!("Unable to open temp file {}", temp_path.display()))?;

        let value = write(&mut file)?;
        file.sync_all()
            .with_context(|| format!("Unable to sync temp file {}", temp_path.display()))?;

        std::fs::rename(&temp_path, destination)
            .with_context(|| format!("Unable to rename temp file to {}", destination.display()))?;

        Ok(value)
    })();

    if result.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }

    result
}

pub fn write_bytes_atomically(destination: &Path, data: &[u8]) -> anyhow::Result<()> {
    write_atomically(destination, |file| {
        file.write_all(data)
            .with_context(|| format!("Unable to write {}", destination.display()))
    })
}

/// Copy `source` over `destination`, returning the digest of the copied bytes
pub fn copy_atomically(source: &Path, destination: &Path) -> anyhow::Result<ContentHash> {
    copy_checked(source, destination, None)
}

/// Like [`copy_atomically`], but the copy only replaces `destination` when
/// its digest equals `expected`
pub fn copy_verified(
    source: &Path,
    destination: &Path,
    expected: &ContentHash,
) -> anyhow::Result<ContentHash> {
    copy_checked(source, destination, Some(expected))
}

fn copy_checked(
    source: &Path,
    destination: &Path,
    expected: Option<&ContentHash>,
) -> anyhow::Result<ContentHash> {
    let input = File::open(source)
        .with_context(|| format!("Unable to open {} for copying", source.display()))?;
    let mut reader = BufReader::new(input);

    write_atomically(destination, |file| {
        let mut writer = HashingWriter::new(file);
        std::io::copy(&mut reader, &mut writer).with_context(|| {
            format!(
                "Unable to copy {} to {}",
                source.display(),
                destination.display()
            )
        })?;

        let (_, hash) = writer.into_parts();
        if let Some(expected) = expected
            && &hash != expected
        {
            anyhow::bail!(
                "{} does not match its recorded hash (expected {}, found {})",
                source.display(),
                expected.to_short(),
                hash.to_short()
            );
        }

        Ok(hash)
    })
}
