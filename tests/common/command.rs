use crate::common::file::{write_file, FileSpec};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Repository with one commit containing `recipe.txt`.
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_nit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("recipe.txt"),
        "milk\nflour\neggs\n".to_string(),
    ));

    run_nit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    nit_commit(repository_dir.path(), "first").assert().success();

    repository_dir
}

pub fn run_nit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("nit").expect("Failed to find nit binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn nit_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_nit_command(dir, &["commit", "-m", message]);
    with_author_env(&mut cmd);
    cmd
}

pub fn nit_merge(dir: &Path, target: &str) -> Command {
    let mut cmd = run_nit_command(dir, &["merge", target]);
    with_author_env(&mut cmd);
    cmd
}

fn with_author_env(cmd: &mut Command) {
    cmd.envs(vec![
        ("NIT_AUTHOR_NAME", "fake_user"),
        ("NIT_AUTHOR_EMAIL", "fake_email@email.com"),
        ("NIT_AUTHOR_DATE", "2023-01-01 12:00:00 +0000"),
    ]);
}

/// Resolve HEAD by hand, following the symbolic ref if there is one.
pub fn get_head_commit_sha(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let head_content = std::fs::read_to_string(dir.join(".nit").join("HEAD"))?;
    let head_content = head_content.trim();

    match head_content.strip_prefix("ref: ") {
        Some(ref_path) => {
            let branch_content = std::fs::read_to_string(dir.join(".nit").join(ref_path))?;
            Ok(branch_content.trim().to_string())
        }
        None => Ok(head_content.to_string()),
    }
}

pub fn get_branch_sha(dir: &Path, branch: &str) -> Result<String, Box<dyn std::error::Error>> {
    let branch_content =
        std::fs::read_to_string(dir.join(".nit").join("refs").join("heads").join(branch))?;
    Ok(branch_content.trim().to_string())
}

/// Parent commit IDs of a commit, in order, read through cat-file.
pub fn get_commit_parents(
    dir: &Path,
    sha: &str,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let output = run_nit_command(dir, &["cat-file", sha]).output()?;
    let stdout = String::from_utf8(output.stdout)?;

    Ok(stdout
        .lines()
        .filter_map(|line| line.strip_prefix("parent "))
        .map(str::to_string)
        .collect())
}

/// Stage everything and commit, returning the resulting HEAD commit ID.
pub fn add_all_and_commit(
    dir: &Path,
    message: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    run_nit_command(dir, &["add", "."]).assert().success();
    nit_commit(dir, message).assert().success();
    get_head_commit_sha(dir)
}
