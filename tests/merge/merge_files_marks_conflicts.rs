use crate::common::command::{repository_dir, run_keeper_command};
use crate::common::file::read_file;
use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_files_marks_conflicts_without_a_repository(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    repository_dir.child("file1").write_str("x\ny\nz\n")?;
    repository_dir.child("file2").write_str("x\nY\nz\n")?;

    run_keeper_command(dir, &["merge-files", "file1", "file2", "out.txt"])
        .assert()
        .success();

    assert_eq!(
        read_file(&dir.join("out.txt")),
        "x\n<<<<<<< file1\ny\n=======\nY\n>>>>>>>\nz\n"
    );

    Ok(())
}

#[rstest]
fn interactive_merge_reads_choices_from_stdin(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    repository_dir.child("file1").write_str("a\nb\nc\n")?;
    repository_dir.child("file2").write_str("A\nb\nC\n")?;

    run_keeper_command(dir, &["merge-files", "file1", "file2", "out.txt", "--interactive"])
        .write_stdin("2\ne\ncustom\n")
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("out.txt")), "A\nb\ncustom\n");

    Ok(())
}
