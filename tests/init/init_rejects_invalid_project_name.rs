use crate::common::command::{repository_dir, run_keeper_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case("has space")]
#[case("../escape")]
#[case("dotted.name")]
fn init_rejects_invalid_project_name(repository_dir: TempDir, #[case] name: &str) {
    run_keeper_command(repository_dir.path(), &["init", name])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid input"));

    assert!(!repository_dir.path().join(".repo_path").exists());
}
