use crate::areas::repository::Repository;
use crate::artifacts::core::batch_report::BatchReport;
use crate::errors::KeeperError;
use std::path::Path;
use tracing::warn;

impl Repository {
    /// Copy files into the staging area; missing files are skipped
    pub fn add(&self, paths: &[String]) -> anyhow::Result<BatchReport> {
        let _lock = self.lock()?;
        let mut staging = self.staging()?;
        let mut report = BatchReport::default();

        for path in paths {
            let resolved = self.workspace().resolve(Path::new(path));

            if !resolved.is_file() {
                warn!(path = %path, "not staging missing file");
                report.skip(path, KeeperError::not_found("file", path));
                continue;
            }

            match staging.add(&resolved) {
                Ok(entry) => {
                    writeln!(self.writer(), "Added '{}' to staging area.", entry.name)?;
                    report.succeed(path);
                }
                Err(err) => report.skip(path, format!("{:#}", err)),
            }
        }

        staging.write_updates()?;

        Ok(report)
    }
}
