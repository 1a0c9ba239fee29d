use crate::areas::repository::Repository;
use colored::Colorize;
use std::path::Path;

impl Repository {
    /// Report whether `file` (or, without one, any file of the latest commit)
    /// has diverged from its recorded version
    pub fn conflicts(&self, file: Option<&str>) -> anyhow::Result<()> {
        let inspector = self.inspector();

        if let Some(file) = file {
            let path = self.workspace().resolve(Path::new(file));

            if inspector.has_conflict(&path)? {
                writeln!(self.writer(), "Conflict detected in file: {}", file.red())?;
            } else {
                writeln!(self.writer(), "No conflicts detected in file: {}", file)?;
            }

            return Ok(());
        }

        let conflicts = inspector.list_conflicts()?;
        if conflicts.is_empty() {
            writeln!(self.writer(), "No conflicts detected.")?;
            return Ok(());
        }

        writeln!(self.writer(), "Conflicting files:")?;
        for path in conflicts {
            let display = self.workspace().display_path(&path);
            let display = display.to_string_lossy().to_string();
            writeln!(self.writer(), "  {}", display.as_str().red())?;
        }

        Ok(())
    }
}
