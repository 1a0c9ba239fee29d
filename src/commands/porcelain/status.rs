use crate::areas::repository::Repository;

impl Repository {
    /// Print staged, modified and untracked files, relative to the working
    /// directory
    pub fn status(&self) -> anyhow::Result<()> {
        let info = self.working_status().initialize()?;

        for (change, files) in info.sections() {
            writeln!(self.writer(), "{}", change.header())?;

            if files.is_empty() {
                writeln!(self.writer(), "  (none)")?;
            }
            for file in files {
                let display = self.workspace().display_path(file);
                writeln!(
                    self.writer(),
                    "  {}",
                    change.colorize(&display.to_string_lossy())
                )?;
            }
        }

        Ok(())
    }
}
