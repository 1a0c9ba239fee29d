use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use colored::Colorize;
use tracing::info;

impl Repository {
    /// Create the branch `name`, or list every branch when no name is given
    pub fn branch(&self, name: Option<&str>) -> anyhow::Result<()> {
        match name {
            Some(name) => self.create_branch(name),
            None => self.list_branches(),
        }
    }

    fn create_branch(&self, name: &str) -> anyhow::Result<()> {
        let name = BranchName::try_parse(name.to_string())?;

        let _lock = self.lock()?;
        let path = self.branches().create(&name)?;

        info!(branch = %name, path = %path.display(), "branch created");
        writeln!(self.writer(), "Branch '{}' created successfully.", name)?;

        Ok(())
    }

    fn list_branches(&self) -> anyhow::Result<()> {
        let branches = self.branches().list()?;
        if branches.is_empty() {
            writeln!(self.writer(), "No branches yet.")?;
            return Ok(());
        }

        let current = self.branches().current()?;
        for branch in branches {
            if current.as_ref() == Some(&branch) {
                writeln!(self.writer(), "* {}", branch.as_ref().green())?;
            } else {
                writeln!(self.writer(), "  {}", branch)?;
            }
        }

        Ok(())
    }
}
