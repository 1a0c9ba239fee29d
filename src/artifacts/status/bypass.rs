use anyhow::Context;
use std::path::Path;

pub const BYPASS_FILE: &str = ".bypass";

/// Header written into a fresh `.bypass` file
pub const BYPASS_TEMPLATE: &str = "# Add files or patterns to ignore\n";

/// Files `commit` skips, one entry per line; `#` starts a comment line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BypassList {
    entries: Vec<String>,
}

impl BypassList {
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(String::from)
            .collect();

        BypassList { entries }
    }

    /// Read the list, treating a missing file as empty
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read {}", path.display()))?;
        Ok(Self::parse(&content))
    }

    /// Whether a file named on the command line as `argument` is ignored,
    /// matching either the argument text or the file's basename
    pub fn is_ignored(&self, argument: &str, path: &Path) -> bool {
        let basename = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();

        self.entries
            .iter()
            .any(|entry| entry == argument || *entry == basename)
    }
}
