use crate::common::command::{commit_ids, init_repository_dir, keeper_commit};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn commit_with_one_missing_file_records_the_rest(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    keeper_commit(dir, "partial", &["1.txt", "missing.txt"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(" 1 file(s) committed"))
        .stderr(predicate::str::contains("error: missing.txt: file not found"));

    assert_eq!(commit_ids(dir).len(), 2);
}
