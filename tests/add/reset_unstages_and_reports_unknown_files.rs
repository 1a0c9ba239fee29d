use crate::common::command::{init_repository_dir, run_keeper_command, stdout_of};
use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn reset_unstages_and_reports_unknown_files(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child("a.txt").write_str("a")?;
    run_keeper_command(init_repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    run_keeper_command(init_repository_dir.path(), &["reset", "a.txt", "other.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unstaged 'a.txt'."))
        .stdout(predicate::str::contains("'other.txt' is not staged."));

    let status = stdout_of(init_repository_dir.path(), &["status"]);
    assert!(status.starts_with("Staged files:\n  (none)\n"));
    assert!(status.contains("Untracked files:\n  a.txt\n"));

    Ok(())
}
