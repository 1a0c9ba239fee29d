use crate::artifacts::hash::content_hash::ContentHash;
use crate::artifacts::log::TIMESTAMP_FORMAT;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Name of the version store directory inside a repository root
pub const VERSIONS_DIR: &str = "versions";

const NAME_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Store-relative path of a snapshot, e.g.
/// `versions/3f2a9c01b7de_20240101120000_0_notes.txt`
///
/// The name encodes the owning commit, the capture time, the position of the
/// entry inside the commit and the original basename, so two entries never
/// share a name even when their basenames collide. A `\` in the basename is
/// stored as `_`; the record keeps the original path verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionPath(String);

impl VersionPath {
    pub fn for_snapshot(
        commit_id: &ContentHash,
        captured_at: NaiveDateTime,
        position: usize,
        original: &Path,
    ) -> Self {
        let basename = original
            .file_name()
            .map(|name| name.to_string_lossy().replace('\\', "_"))
            .unwrap_or_else(|| String::from("unnamed"));

        VersionPath(format!(
            "{}/{}_{}_{}_{}",
            VERSIONS_DIR,
            commit_id.to_short(),
            captured_at.format(NAME_TIMESTAMP_FORMAT),
            position,
            basename
        ))
    }

    /// Parse a path read back from the log
    ///
    /// Only plain file names directly under `versions/` are accepted, so a
    /// record can never point outside the store.
    pub fn try_parse(raw: &str) -> anyhow::Result<Self> {
        let name = raw
            .strip_prefix(VERSIONS_DIR)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| anyhow::anyhow!("version path outside the store: {}", raw))?;

        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            anyhow::bail!("invalid version file name: {}", raw);
        }

        Ok(VersionPath(raw.to_string()))
    }

    pub fn file_name(&self) -> &str {
        &self.0[VERSIONS_DIR.len() + 1..]
    }

    /// Whether this name was generated for the given commit
    pub fn belongs_to(&self, commit_id: &ContentHash) -> bool {
        self.file_name()
            .strip_prefix(commit_id.to_short())
            .is_some_and(|rest| rest.starts_with('_'))
    }

    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(VERSIONS_DIR).join(self.file_name())
    }

    /// Capture time encoded in the name, if it is well-formed
    pub fn captured_at(&self) -> Option<NaiveDateTime> {
        let stamp = self.file_name().split('_').nth(1)?;
        NaiveDateTime::parse_from_str(stamp, NAME_TIMESTAMP_FORMAT).ok()
    }

    pub fn display_capture_time(&self) -> String {
        self.captured_at()
            .map(|at| at.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default()
    }
}

impl AsRef<str> for VersionPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VersionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
