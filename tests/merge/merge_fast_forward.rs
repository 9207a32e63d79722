use crate::common::command::{
    add_all_and_commit, get_branch_sha, get_head_commit_sha, init_repository_dir, nit_merge,
    run_nit_command,
};
use crate::common::file::{read_file, write_file, FileSpec};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

/// HEAD is an ancestor of the target: the branch pointer moves forward, the
/// worktree picks up the target's files, and no merge commit is created.
#[rstest]
fn merging_a_descendant_fast_forwards(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_nit_command(dir.path(), &["branch", "topic"])
        .assert()
        .success();
    run_nit_command(dir.path(), &["checkout", "topic"])
        .assert()
        .success();

    write_file(FileSpec::new(
        dir.path().join("sauce.txt"),
        "tomato\nbasil\n".to_string(),
    ));
    let topic_sha = add_all_and_commit(dir.path(), "add sauce")?;

    run_nit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    assert!(!dir.path().join("sauce.txt").exists());

    nit_merge(dir.path(), "topic")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fast-forward"));

    // master now points at topic's tip; no new commit was created
    assert_eq!(get_branch_sha(dir.path(), "master")?, topic_sha);
    assert_eq!(get_head_commit_sha(dir.path())?, topic_sha);
    assert_eq!(read_file(&dir.path().join("sauce.txt")), "tomato\nbasil\n");

    Ok(())
}
