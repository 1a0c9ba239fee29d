use crate::common::PROJECT;
use crate::common::command::{init_repository_dir, keeper_commit, repository_dir, repository_root, run_keeper_command, stdout_of};
use crate::common::file::read_file;
use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn commit_modify_rollback_restores_original_bytes(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_keeper_command(dir, &["init", "project"]).assert().success();
    repository_dir.child("a.txt").write_str("hello\n")?;

    keeper_commit(dir, "first", &["a.txt"]).assert().success();
    let history = stdout_of(dir, &["history"]);
    assert_eq!(history.matches("Commit ID: ").count(), 1);
    assert_eq!(history.matches("  - ").count(), 1);

    repository_dir.child("a.txt").write_str("garbage")?;
    run_keeper_command(dir, &["rollback", "a.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rolled back a.txt to version: versions/"));

    assert_eq!(read_file(&dir.join("a.txt")), "hello\n");

    let hash = stdout_of(dir, &["hash-object", "a.txt"]);
    let log = std::fs::read_to_string(dir.join(".home/project/commit_log.txt"))?;
    assert!(log.contains(hash.trim()));

    Ok(())
}

#[rstest]
fn rollback_restores_a_deleted_file(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    std::fs::remove_file(dir.join("a").join("2.txt")).unwrap();

    run_keeper_command(dir, &["rollback", "a/2.txt"]).assert().success();

    assert_eq!(read_file(&dir.join("a").join("2.txt")), "two");
}

#[rstest]
fn rollback_of_untracked_file_fails(init_repository_dir: TempDir) {
    run_keeper_command(init_repository_dir.path(), &["rollback", "never.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[cfg(unix)]
#[rstest]
fn file_with_backslash_in_its_name_round_trips(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_keeper_command(dir, &["init", "project"]).assert().success();
    repository_dir.child("a\\b.txt").write_str("slashed\n")?;

    keeper_commit(dir, "first", &["a\\b.txt"]).assert().success();
    let history = stdout_of(dir, &["history"]);
    assert_eq!(history.matches("Commit ID: ").count(), 1);

    repository_dir.child("a\\b.txt").write_str("changed")?;
    run_keeper_command(dir, &["rollback", "a\\b.txt"])
        .assert()
        .success();
    assert_eq!(read_file(&dir.join("a\\b.txt")), "slashed\n");

    run_keeper_command(dir, &["verify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 problem(s)"));

    Ok(())
}

#[rstest]
fn rollback_refuses_a_tampered_version(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_keeper_command(dir, &["init", PROJECT]).assert().success();
    repository_dir.child("a.txt").write_str("hello\n")?;
    keeper_commit(dir, "first", &["a.txt"]).assert().success();

    let versions = repository_root(dir).join("versions");
    for version in std::fs::read_dir(&versions)? {
        std::fs::write(version?.path(), "tampered\n")?;
    }
    repository_dir.child("a.txt").write_str("mine\n")?;

    run_keeper_command(dir, &["rollback", "a.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not match"));

    assert_eq!(read_file(&dir.join("a.txt")), "mine\n");
    let leftovers = std::fs::read_dir(dir)?
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(".tmp-"))
        .count();
    assert_eq!(leftovers, 0);

    Ok(())
}
