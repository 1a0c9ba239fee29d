use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use tracing::{debug, info, instrument};

impl Repository {
    /// Copy every file of branch `name` over the working directory and make
    /// it the active branch
    ///
    /// Same-named working files are overwritten; nothing is committed.
    #[instrument(skip(self))]
    pub fn switch(&self, name: &str) -> anyhow::Result<()> {
        let name = BranchName::try_parse(name.to_string())?;

        let _lock = self.lock()?;
        let files = self.branches().files(&name)?;

        for file in &files {
            let Some(file_name) = file.file_name() else {
                continue;
            };
            let destination = self.workspace().path().join(file_name);

            self.workspace().write_from(file, &destination)?;
            debug!(file = %destination.display(), "copied from branch");
        }

        self.branches().set_current(&name)?;

        info!(branch = %name, files = files.len(), "switched branch");
        writeln!(self.writer(), "Switched to branch '{}'.", name)?;

        Ok(())
    }
}
