use crate::areas::repository::Repository;
use crate::artifacts::core::batch_report::BatchReport;

impl Repository {
    /// Restore every file of the latest commit carrying `message` into the
    /// working directory, each under its basename
    pub fn retrieve(&self, message: &str) -> anyhow::Result<BatchReport> {
        let _lock = self.lock()?;
        let record = self.log().find_by_message(message)?;
        let mut report = BatchReport::default();

        for entry in record.entries() {
            let Some(name) = entry.original_path.file_name() else {
                report.skip(
                    entry.original_path.to_string_lossy(),
                    "recorded path has no file name",
                );
                continue;
            };
            let destination = self.workspace().path().join(name);

            match self
                .versions()
                .restore(&entry.version_path, &destination, &entry.content_hash)
            {
                Ok(()) => {
                    writeln!(
                        self.writer(),
                        "Retrieved {} from {}",
                        self.workspace().display_path(&destination).display(),
                        entry.version_path
                    )?;
                    report.succeed(name.to_string_lossy());
                }
                Err(err) => report.skip(name.to_string_lossy(), format!("{:#}", err)),
            }
        }

        Ok(report)
    }
}
