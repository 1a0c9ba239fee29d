use crate::common::command::{init_repository_dir, repository_root, run_keeper_command};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn merge_branches_writes_merged_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_keeper_command(dir, &["branch", "one"]).assert().success();
    run_keeper_command(dir, &["branch", "two"]).assert().success();

    let branches = repository_root(dir).join("branches");
    std::fs::write(branches.join("one").join("notes.txt"), "x\ny\nz\n").unwrap();
    std::fs::write(branches.join("two").join("notes.txt"), "x\nY\nz\n").unwrap();
    std::fs::write(branches.join("one").join("only_one.txt"), "1").unwrap();

    run_keeper_command(dir, &["merge", "one", "two"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged notes.txt into merged_notes.txt (1 conflict)"))
        .stdout(predicate::str::contains("Branch merge complete."));

    let merged = read_file(&branches.join("one").join("merged_notes.txt"));
    assert!(merged.contains("<<<<<<< one/notes.txt\ny\n=======\nY\n>>>>>>>\n"));
    assert_eq!(read_file(&branches.join("one").join("notes.txt")), "x\ny\nz\n");
    assert_eq!(read_file(&branches.join("two").join("notes.txt")), "x\nY\nz\n");
    assert!(!branches.join("one").join("merged_only_one.txt").exists());
    assert!(!dir.join("merged_notes.txt").exists());

    run_keeper_command(dir, &["merge", "one", "two"]).assert().success();
    assert!(!branches.join("one").join("merged_merged_notes.txt").exists());
}

#[rstest]
fn merge_with_missing_branch_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_keeper_command(dir, &["branch", "one"]).assert().success();

    run_keeper_command(dir, &["merge", "one", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("branch not found: ghost"));
}
