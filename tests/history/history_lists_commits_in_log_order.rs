use crate::common::command::{
    commit_ids, init_repository_dir, keeper_commit, repository_dir, repository_root,
    run_keeper_command, stdout_of,
};
use crate::common::FIXED_DATE;
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;
use std::io::Write;

#[rstest]
fn history_lists_commits_in_log_order(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    keeper_commit(dir, "second", &["1.txt"]).assert().success();

    let history = stdout_of(dir, &["history"]);
    let ids = commit_ids(dir);

    assert_eq!(ids.len(), 2);
    assert!(history.find("Message: Initial commit") < history.find("Message: second"));
    assert!(history.contains(&format!("Parent: {}", &ids[0][..12])));
    assert!(history.contains(&format!("Timestamp: {}", FIXED_DATE)));
    assert!(history.contains("  - a/2.txt (versions/"));
    assert_eq!(stdout_of(dir, &["history"]), history);
}

#[rstest]
fn history_of_empty_log(repository_dir: TempDir) {
    run_keeper_command(repository_dir.path(), &["init", "empty"])
        .assert()
        .success();

    assert_eq!(stdout_of(repository_dir.path(), &["history"]), "No commits yet.\n");
}

#[rstest]
fn warnings_on_a_piped_stderr_carry_no_colour_codes(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let mut log = std::fs::OpenOptions::new()
        .append(true)
        .open(repository_root(dir).join("commit_log.txt"))
        .unwrap();
    writeln!(log, "not a record").unwrap();

    run_keeper_command(dir, &["history"])
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping log line"))
        .stderr(predicate::str::contains("\u{1b}[").not());
}
