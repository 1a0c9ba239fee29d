use crate::common::command::{commit_ids, init_repository_dir, keeper_commit};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case(&["missing.txt"])]
#[case(&[])]
fn commit_with_no_surviving_files_writes_nothing(
    init_repository_dir: TempDir,
    #[case] files: &[&str],
) {
    let dir = init_repository_dir.path();

    keeper_commit(dir, "nothing", files)
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to commit"));

    assert_eq!(commit_ids(dir).len(), 1);
}
