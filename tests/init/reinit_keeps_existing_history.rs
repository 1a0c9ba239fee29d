use crate::common::command::{commit_ids, init_repository_dir, run_keeper_command};
use crate::common::PROJECT;
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn reinit_keeps_existing_history(init_repository_dir: TempDir) {
    let before = commit_ids(init_repository_dir.path());

    run_keeper_command(init_repository_dir.path(), &["init", PROJECT])
        .assert()
        .success();

    assert_eq!(commit_ids(init_repository_dir.path()), before);
    assert_eq!(before.len(), 1);
}
