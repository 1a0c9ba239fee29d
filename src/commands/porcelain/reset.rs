use crate::areas::repository::Repository;
use crate::artifacts::core::batch_report::BatchReport;
use std::path::Path;

impl Repository {
    /// Remove files from the staging area; files that are not staged are
    /// reported and left alone
    pub fn reset(&self, paths: &[String]) -> anyhow::Result<BatchReport> {
        let _lock = self.lock()?;
        let mut staging = self.staging()?;
        let mut report = BatchReport::default();

        for path in paths {
            let resolved = self.workspace().resolve(Path::new(path));
            let staged_name = staging.find(&resolved).map(|entry| entry.name.clone());

            match staged_name {
                Some(name) => {
                    staging.remove(&name)?;
                    writeln!(self.writer(), "Unstaged '{}'.", name)?;
                    report.succeed(path);
                }
                None => {
                    writeln!(self.writer(), "'{}' is not staged.", path)?;
                    report.ignore(path);
                }
            }
        }

        staging.write_updates()?;

        Ok(report)
    }
}
