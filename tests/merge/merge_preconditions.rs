use crate::common::command::{
    get_head_commit_sha, init_repository_dir, nit_merge, repository_dir, run_nit_command,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn merging_an_unresolvable_target_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    nit_merge(dir.path(), "blah").assert().failure().stderr(
        predicate::str::contains("merge: blah - not something we can merge"),
    );

    Ok(())
}

#[rstest]
fn merging_outside_a_repository_fails(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    nit_merge(repository_dir.path(), "master")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a nit repository"));

    Ok(())
}

#[rstest]
fn merging_with_a_detached_head_is_unsupported(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let head_sha = get_head_commit_sha(dir.path())?;

    run_nit_command(dir.path(), &["checkout", &head_sha])
        .assert()
        .success();

    nit_merge(dir.path(), "master")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported"));

    Ok(())
}

#[rstest]
fn merging_a_non_commit_object_fails_with_its_type(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    // dig the tree's ID out of the HEAD commit
    let output = run_nit_command(dir.path(), &["cat-file", "HEAD"]).output()?;
    let stdout = String::from_utf8(output.stdout)?;
    let tree_sha = stdout
        .lines()
        .find_map(|line| line.strip_prefix("tree "))
        .expect("commit should have a tree line")
        .to_string();

    nit_merge(dir.path(), &tree_sha).assert().failure().stderr(
        predicate::str::contains(format!(
            "error: {tree_sha}: expected commit type, but the object dereferences to tree type"
        )),
    );

    Ok(())
}
