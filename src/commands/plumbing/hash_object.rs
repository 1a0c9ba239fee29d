use crate::artifacts::hash::content_hash::ContentHash;
use crate::artifacts::hash::hasher::Hasher;
use crate::errors::KeeperError;
use std::io::Write;
use std::path::Path;

/// Print the content digest of a file; works outside any repository
pub fn hash_object(
    work_dir: &Path,
    file: &str,
    writer: &mut dyn Write,
) -> anyhow::Result<ContentHash> {
    let path = work_dir.join(file);
    if !path.is_file() {
        return Err(KeeperError::not_found("file", file).into());
    }

    let hash = Hasher::digest_file(&path)?;
    writeln!(writer, "{}", hash)?;

    Ok(hash)
}
