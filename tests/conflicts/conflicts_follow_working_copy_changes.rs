use crate::common::command::{init_repository_dir, keeper_commit, stdout_of};
use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn no_conflict_right_after_commit_then_conflict_after_edit(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    assert_eq!(
        stdout_of(dir, &["conflicts", "1.txt"]),
        "No conflicts detected in file: 1.txt\n"
    );
    assert_eq!(stdout_of(dir, &["conflicts"]), "No conflicts detected.\n");

    init_repository_dir.child("1.txt").write_str("one!")?;

    assert_eq!(
        stdout_of(dir, &["conflicts", "1.txt"]),
        "Conflict detected in file: 1.txt\n"
    );
    let listing = stdout_of(dir, &["conflicts"]);
    assert_eq!(listing, "Conflicting files:\n  1.txt\n");
    assert_eq!(stdout_of(dir, &["conflicts"]), listing);

    Ok(())
}

#[rstest]
fn untracked_and_deleted_files_are_not_conflicts(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    init_repository_dir.child("fresh.txt").write_str("fresh")?;
    std::fs::remove_file(dir.join("1.txt"))?;

    assert_eq!(
        stdout_of(dir, &["conflicts", "fresh.txt"]),
        "No conflicts detected in file: fresh.txt\n"
    );
    assert_eq!(stdout_of(dir, &["conflicts"]), "No conflicts detected.\n");

    Ok(())
}

#[rstest]
fn only_the_latest_commit_is_checked(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    init_repository_dir.child("b.txt").write_str("b")?;
    keeper_commit(dir, "only b", &["b.txt"]).assert().success();
    init_repository_dir.child("1.txt").write_str("edited")?;

    assert_eq!(stdout_of(dir, &["conflicts"]), "No conflicts detected.\n");
    assert_eq!(
        stdout_of(dir, &["conflicts", "1.txt"]),
        "Conflict detected in file: 1.txt\n"
    );

    Ok(())
}
