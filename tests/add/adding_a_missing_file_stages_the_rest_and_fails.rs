use crate::common::command::{init_repository_dir, repository_root, run_keeper_command, stdout_of};
use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use fake::Fake;
use fake::faker::lorem::en::Words;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn adding_a_missing_file_stages_the_rest_and_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = Words(5..10).fake::<Vec<String>>().join(" ");
    init_repository_dir.child("notes.txt").write_str(&content)?;

    run_keeper_command(init_repository_dir.path(), &["add", "notes.txt", "ghost.txt"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Added 'notes.txt' to staging area."))
        .stderr(predicate::str::contains("ghost.txt"))
        .stderr(predicate::str::contains("1 succeeded, 1 skipped, 0 ignored"));

    let staged = repository_root(init_repository_dir.path())
        .join(".staging")
        .join("notes.txt");
    assert_eq!(std::fs::read_to_string(staged)?, content);

    let status = stdout_of(init_repository_dir.path(), &["status"]);
    assert!(status.starts_with("Staged files:\n  notes.txt\n"));

    Ok(())
}
