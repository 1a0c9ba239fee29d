use crate::areas::branches::BRANCHES_DIR;
use crate::areas::commit_log::{CommitLog, LOG_FILE};
use crate::areas::repository::Repository;
use crate::areas::workspace::REPO_POINTER_FILE;
use crate::artifacts::branch::branch_name::ProjectName;
use crate::artifacts::core::atomic;
use crate::artifacts::log::version_path::VERSIONS_DIR;
use crate::artifacts::status::bypass::{BYPASS_FILE, BYPASS_TEMPLATE};
use crate::config::Settings;
use crate::errors::KeeperError;
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::info;

impl Repository {
    /// Create (or reopen) the repository for `project` under the keeper home
    /// and point `work_dir` at it
    ///
    /// An existing repository keeps its log and versions.
    pub fn init(
        work_dir: &Path,
        project: Option<&str>,
        settings: &Settings,
        writer: Box<dyn std::io::Write>,
    ) -> anyhow::Result<Self> {
        let work_dir = work_dir
            .canonicalize()
            .with_context(|| format!("Unable to resolve {}", work_dir.display()))?;

        let project = match project {
            Some(project) => project.to_string(),
            None => work_dir
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .ok_or_else(|| {
                    KeeperError::invalid_input("a project name is required at the filesystem root")
                })?,
        };
        let project = ProjectName::try_parse(project)?;

        let home = if settings.home.is_absolute() {
            settings.home.clone()
        } else {
            work_dir.join(&settings.home)
        };
        let root = home.join(project.as_ref());

        fs::create_dir_all(root.join(VERSIONS_DIR))
            .with_context(|| format!("Failed to create {}", root.join(VERSIONS_DIR).display()))?;
        fs::create_dir_all(root.join(BRANCHES_DIR))
            .with_context(|| format!("Failed to create {}", root.join(BRANCHES_DIR).display()))?;

        CommitLog::new(root.join(LOG_FILE).into_boxed_path())
            .create()
            .context("Failed to create the commit log")?;

        let bypass_path = root.join(BYPASS_FILE);
        if !bypass_path.exists() {
            atomic::write_bytes_atomically(&bypass_path, BYPASS_TEMPLATE.as_bytes())
                .context("Failed to create the bypass list")?;
        }

        let root = root
            .canonicalize()
            .with_context(|| format!("Unable to resolve {}", root.display()))?;
        atomic::write_bytes_atomically(
            &work_dir.join(REPO_POINTER_FILE),
            root.to_string_lossy().as_bytes(),
        )
        .with_context(|| format!("Failed to write {}", REPO_POINTER_FILE))?;

        info!(project = %project, root = %root.display(), "repository initialized");

        let repository = Repository::new(&root, &work_dir, settings.clock()?, writer)?;
        writeln!(
            repository.writer(),
            "Repository '{}' initialized successfully.",
            root.display()
        )?;

        Ok(repository)
    }
}
