use crate::common::command::{init_repository_dir, keeper_commit, run_keeper_command, stdout_of};
use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn staged_files_are_committed_after_reset(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    init_repository_dir.child("a.txt").write_str("a")?;
    init_repository_dir.child("b.txt").write_str("b")?;

    run_keeper_command(dir, &["add", "a.txt"]).assert().success();
    run_keeper_command(dir, &["add", "b.txt"]).assert().success();
    run_keeper_command(dir, &["reset", "a.txt"]).assert().success();

    keeper_commit(dir, "msg", &[])
        .assert()
        .success()
        .stdout(predicate::str::contains(" 1 file(s) committed"));

    let history = stdout_of(dir, &["history"]);
    let last = history.rsplit("Commit ID: ").next().unwrap_or_default();
    assert!(last.contains("Message: msg"));
    assert!(last.contains("  - b.txt ("));
    assert!(!last.contains("a.txt"));

    let status = stdout_of(dir, &["status"]);
    assert!(status.starts_with("Staged files:\n  (none)\n"));

    Ok(())
}

#[rstest]
fn explicit_files_are_ignored_while_staging_is_not_empty(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    init_repository_dir.child("staged.txt").write_str("staged")?;
    init_repository_dir.child("listed.txt").write_str("listed")?;
    run_keeper_command(dir, &["add", "staged.txt"]).assert().success();

    keeper_commit(dir, "precedence", &["listed.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Staging area is not empty; committing staged files only.",
        ));

    let history = stdout_of(dir, &["history"]);
    assert!(history.contains("  - staged.txt ("));
    assert!(!history.contains("listed.txt"));

    Ok(())
}
