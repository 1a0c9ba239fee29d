use crate::areas::repository::Repository;
use crate::errors::KeeperError;
use std::path::Path;

impl Repository {
    /// Replace `file` with the contents of `resolution`
    pub fn resolve(&self, file: &str, resolution: &str) -> anyhow::Result<()> {
        let _lock = self.lock()?;
        let destination = self.workspace().resolve(Path::new(file));
        let source = self.workspace().resolve(Path::new(resolution));

        if !source.is_file() {
            return Err(KeeperError::not_found("resolution file", resolution).into());
        }

        self.workspace().write_from(&source, &destination)?;
        writeln!(
            self.writer(),
            "Conflict resolved for {} using {}",
            file,
            resolution
        )?;

        Ok(())
    }
}
