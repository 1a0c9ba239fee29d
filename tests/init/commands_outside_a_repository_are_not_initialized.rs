use crate::common::command::{repository_dir, run_keeper_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case(&["status"])]
#[case(&["history"])]
#[case(&["add", "a.txt"])]
#[case(&["commit", "message", "a.txt"])]
#[case(&["branch", "feature"])]
fn commands_outside_a_repository_are_not_initialized(
    repository_dir: TempDir,
    #[case] args: &[&str],
) {
    std::fs::write(repository_dir.path().join("a.txt"), "a").unwrap();

    run_keeper_command(repository_dir.path(), args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("repository not initialized"));
}
