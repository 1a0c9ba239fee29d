use crate::areas::repository::Repository;
use crate::artifacts::log::commit_record::CommitRecord;
use colored::Colorize;

const SEPARATOR: &str = "------------------------";

impl Repository {
    /// Print every commit in log order
    pub fn history(&self) -> anyhow::Result<()> {
        let mut empty = true;

        for record in self.log().records()? {
            self.show_commit(&record?)?;
            empty = false;
        }

        if empty {
            writeln!(self.writer(), "No commits yet.")?;
        }

        Ok(())
    }

    fn show_commit(&self, record: &CommitRecord) -> anyhow::Result<()> {
        let id: &str = record.id().as_ref();
        writeln!(self.writer(), "Commit ID: {}", id.yellow())?;
        if let Some(parent) = record.parent() {
            writeln!(self.writer(), "Parent: {}", parent.to_short())?;
        }
        writeln!(self.writer(), "Message: {}", record.message())?;
        writeln!(self.writer(), "Timestamp: {}", record.readable_timestamp())?;
        writeln!(self.writer(), "Files:")?;
        for entry in record.entries() {
            let display = self.workspace().display_path(&entry.original_path);
            writeln!(
                self.writer(),
                "  - {} ({})",
                display.display(),
                entry.version_path
            )?;
        }
        writeln!(self.writer(), "{}", SEPARATOR)?;

        Ok(())
    }
}
