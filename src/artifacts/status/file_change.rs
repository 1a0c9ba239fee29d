use colored::{ColoredString, Colorize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileChangeType {
    /// Queued in the staging area
    Staged,
    /// Tracked, and the working copy differs from its latest version
    Modified,
    /// Never recorded and not staged
    Untracked,
}

impl FileChangeType {
    pub fn header(&self) -> &'static str {
        match self {
            FileChangeType::Staged => "Staged files:",
            FileChangeType::Modified => "Modified files:",
            FileChangeType::Untracked => "Untracked files:",
        }
    }

    pub fn colorize(&self, text: &str) -> ColoredString {
        match self {
            FileChangeType::Staged => text.green(),
            FileChangeType::Modified => text.yellow(),
            FileChangeType::Untracked => text.red(),
        }
    }
}
