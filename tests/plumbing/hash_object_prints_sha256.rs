use crate::common::command::{repository_dir, run_keeper_command};
use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use rstest::rstest;

#[rstest]
fn hash_object_prints_sha256(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    repository_dir.child("hello.txt").write_str("hello\n")?;

    run_keeper_command(repository_dir.path(), &["hash-object", "hello.txt"])
        .assert()
        .success()
        .stdout("5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03\n");

    Ok(())
}
