use crate::common::file::{FileSpec, write_file};
use crate::common::{FIXED_DATE, PROJECT};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::{Path, PathBuf};

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A working directory with a repository and one commit holding `1.txt`
/// ("one") and `a/2.txt` ("two")
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_keeper_command(repository_dir.path(), &["init", PROJECT])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));

    keeper_commit(repository_dir.path(), "Initial commit", &["1.txt", "a/2.txt"])
        .assert()
        .success();

    repository_dir
}

pub fn run_keeper_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("codekeeper").expect("Failed to find codekeeper binary");
    cmd.envs(vec![
        ("CODEKEEPER_HOME", keeper_home(dir).to_string_lossy().to_string()),
        ("CODEKEEPER_DATE", FIXED_DATE.to_string()),
        ("NO_PAGER", "1".to_string()),
    ]);
    cmd.env_remove("CODEKEEPER_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn keeper_commit(dir: &Path, message: &str, files: &[&str]) -> Command {
    let mut args = vec!["commit", message];
    args.extend_from_slice(files);
    run_keeper_command(dir, &args)
}

/// Where repositories of a test working directory are created
pub fn keeper_home(dir: &Path) -> PathBuf {
    dir.join(".home")
}

/// Root of the fixture project's repository
pub fn repository_root(dir: &Path) -> PathBuf {
    keeper_home(dir).join(PROJECT)
}

/// Captured stdout of a successful command
pub fn stdout_of(dir: &Path, args: &[&str]) -> String {
    let output = run_keeper_command(dir, args)
        .output()
        .expect("Failed to run codekeeper");
    assert!(
        output.status.success(),
        "{:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).expect("stdout is not UTF-8")
}

/// Commit ids in log order, read from `history`
pub fn commit_ids(dir: &Path) -> Vec<String> {
    stdout_of(dir, &["history"])
        .lines()
        .filter_map(|line| line.strip_prefix("Commit ID: "))
        .map(|id| id.trim().to_string())
        .collect()
}
