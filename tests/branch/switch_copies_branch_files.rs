use crate::common::command::{init_repository_dir, repository_root, run_keeper_command, stdout_of};
use crate::common::file::{read_file, write_generated_files};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn switch_copies_branch_files(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_keeper_command(dir, &["branch", "feature"]).assert().success();

    let branch = repository_root(dir).join("branches").join("feature");
    std::fs::write(branch.join("1.txt"), "from feature").unwrap();
    let generated = write_generated_files(&branch, 3);

    run_keeper_command(dir, &["switch", "feature"])
        .assert()
        .success()
        .stdout("Switched to branch 'feature'.\n");

    assert_eq!(read_file(&dir.join("1.txt")), "from feature");
    for file in generated {
        let name = file.path.file_name().unwrap();
        assert_eq!(read_file(&dir.join(name)), file.content);
    }
    assert_eq!(read_file(&dir.join("a").join("2.txt")), "two");

    assert!(stdout_of(dir, &["branch"]).contains("* feature\n"));
    assert_eq!(stdout_of(dir, &["history"]).matches("Commit ID: ").count(), 1);
}

#[rstest]
fn switch_to_missing_branch_fails(init_repository_dir: TempDir) {
    run_keeper_command(init_repository_dir.path(), &["switch", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("branch not found: ghost"));
}
