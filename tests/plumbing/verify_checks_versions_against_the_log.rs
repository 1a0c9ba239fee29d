use crate::common::command::{init_repository_dir, repository_root, run_keeper_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;
use std::io::Write;

#[rstest]
fn intact_repository_verifies(init_repository_dir: TempDir) {
    run_keeper_command(init_repository_dir.path(), &["verify"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Checked 1 record(s): 2 version(s) intact, 0 problem(s)",
        ));
}

#[rstest]
fn missing_tampered_and_corrupt_entries_are_reported(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let root = repository_root(dir);

    let mut versions = std::fs::read_dir(root.join("versions"))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect::<Vec<_>>();
    versions.sort();
    std::fs::remove_file(&versions[0]).unwrap();
    std::fs::write(&versions[1], "tampered").unwrap();

    let mut log = std::fs::OpenOptions::new()
        .append(true)
        .open(root.join("commit_log.txt"))
        .unwrap();
    writeln!(log, "not a record").unwrap();

    run_keeper_command(dir, &["verify"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("missing: versions/"))
        .stdout(predicate::str::contains("mismatch: versions/"))
        .stdout(predicate::str::contains("corrupt: corrupt commit record at line 2"))
        .stdout(predicate::str::contains("0 version(s) intact, 3 problem(s)"));
}
