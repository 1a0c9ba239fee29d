use crate::areas::repository::Repository;
use crate::artifacts::branch::MERGED_FILE_PREFIX;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::merge::line_merge;
use crate::artifacts::merge::resolver::MarkerResolver;
use colored::Colorize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{info, instrument};

impl Repository {
    /// Merge every file the two branches share by name into
    /// `merged_<name>` inside the first branch
    ///
    /// Neither branch's own files are touched, and the merged output is not
    /// applied to the working directory.
    #[instrument(skip(self))]
    pub fn merge_branches(&self, first: &str, second: &str) -> anyhow::Result<()> {
        let first = BranchName::try_parse(first.to_string())?;
        let second = BranchName::try_parse(second.to_string())?;

        let _lock = self.lock()?;
        let first_files = self.mergeable_files(&first)?;
        let second_files = self.mergeable_files(&second)?;
        let first_path = self.branches().branch_path(&first);

        let mut merged = 0;
        for (name, first_file) in &first_files {
            let Some(second_file) = second_files.get(name) else {
                continue;
            };

            let output = first_path.join(format!("{}{}", MERGED_FILE_PREFIX, name));
            let mut resolver = MarkerResolver::new(format!("{}/{}", first, name));
            let summary =
                line_merge::merge_files(first_file, second_file, &output, &mut resolver)?;
            merged += 1;

            let conflicts = match summary.conflicts {
                0 => "no conflicts".green(),
                1 => "1 conflict".yellow(),
                count => format!("{} conflicts", count).as_str().yellow(),
            };
            writeln!(
                self.writer(),
                "Merged {} into {}{} ({})",
                name,
                MERGED_FILE_PREFIX,
                name,
                conflicts
            )?;
        }

        info!(first = %first, second = %second, files = merged, "branches merged");
        if merged == 0 {
            writeln!(self.writer(), "No common files to merge.")?;
        } else {
            writeln!(
                self.writer(),
                "Branch merge complete. Resolve conflicts in the merged files if necessary."
            )?;
        }

        Ok(())
    }

    /// A branch's files keyed by name, earlier merge outputs left out
    fn mergeable_files(&self, branch: &BranchName) -> anyhow::Result<BTreeMap<String, PathBuf>> {
        Ok(self
            .branches()
            .files(branch)?
            .into_iter()
            .filter_map(|path| {
                let name = path.file_name()?.to_string_lossy().to_string();
                (!name.starts_with(MERGED_FILE_PREFIX)).then_some((name, path))
            })
            .collect())
    }
}
