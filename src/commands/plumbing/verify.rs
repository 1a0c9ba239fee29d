use crate::areas::commit_log::LogLine;
use crate::areas::repository::Repository;
use crate::artifacts::core::batch_report::BatchReport;
use crate::errors::{KeeperError, keeper_error};
use colored::Colorize;
use tracing::{info, instrument};

impl Repository {
    /// Check every log line and every version file it references
    ///
    /// Each intact version counts as a success; corrupt lines, missing
    /// versions and versions whose bytes no longer match the recorded hash
    /// are reported as skipped items.
    #[instrument(skip_all)]
    pub fn verify(&self) -> anyhow::Result<BatchReport> {
        let mut report = BatchReport::default();
        let mut records = 0;

        for line in self.log().scan()? {
            let record = match line? {
                LogLine::Record(record) => record,
                LogLine::Corrupt(err) => {
                    writeln!(self.writer(), "{} {}", "corrupt:".red(), err)?;
                    report.skip("commit log", err);
                    continue;
                }
            };
            records += 1;

            for entry in record.entries() {
                let version = entry.version_path.to_string();

                match self.versions().digest(&entry.version_path) {
                    Ok(hash) if hash == entry.content_hash => report.succeed(version),
                    Ok(hash) => {
                        writeln!(
                            self.writer(),
                            "{} {} (expected {}, found {})",
                            "mismatch:".red(),
                            version,
                            entry.content_hash.to_short(),
                            hash.to_short()
                        )?;
                        report.skip(version, "content does not match the recorded hash");
                    }
                    Err(err) if matches!(keeper_error(&err), Some(KeeperError::NotFound { .. })) => {
                        writeln!(self.writer(), "{} {}", "missing:".red(), version)?;
                        report.skip(version, err);
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        info!(records, versions = report.succeeded().len(), "log verified");
        writeln!(
            self.writer(),
            "Checked {} record(s): {} version(s) intact, {} problem(s)",
            records,
            report.succeeded().len(),
            report.skipped().len()
        )?;

        Ok(report)
    }
}
