use crate::common::command::{repository_dir, repository_root, run_keeper_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn init_creates_repository_layout(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_keeper_command(repository_dir.path(), &["init", "project"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^Repository '.+project' initialized successfully\.\n$",
        )?);

    let root = repository_root(repository_dir.path()).canonicalize()?;
    assert!(root.join("versions").is_dir());
    assert!(root.join("branches").is_dir());
    assert!(root.join("commit_log.txt").is_file());
    assert!(root.join(".bypass").is_file());

    let pointer = std::fs::read_to_string(repository_dir.path().join(".repo_path"))?;
    assert_eq!(pointer.trim(), root.to_string_lossy());

    Ok(())
}
