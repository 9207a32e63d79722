use crate::common::command::{
    add_all_and_commit, get_head_commit_sha, init_repository_dir, nit_merge,
};
use crate::common::file::{read_file, write_file, FileSpec};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn merging_the_current_head_is_up_to_date(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let head_sha = get_head_commit_sha(dir.path())?;

    nit_merge(dir.path(), &head_sha)
        .assert()
        .success()
        .stdout(predicate::str::contains("Already up-to-date."));

    // nothing moved
    assert_eq!(get_head_commit_sha(dir.path())?, head_sha);

    Ok(())
}

#[rstest]
fn merging_an_ancestor_is_up_to_date_and_mutates_nothing(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let first_sha = get_head_commit_sha(dir.path())?;

    write_file(FileSpec::new(
        dir.path().join("recipe.txt"),
        "milk\nflour\neggs\nbutter\n".to_string(),
    ));
    let second_sha = add_all_and_commit(dir.path(), "second")?;

    nit_merge(dir.path(), &first_sha)
        .assert()
        .success()
        .stdout(predicate::str::contains("Already up-to-date."));

    assert_eq!(get_head_commit_sha(dir.path())?, second_sha);
    assert_eq!(
        read_file(&dir.path().join("recipe.txt")),
        "milk\nflour\neggs\nbutter\n"
    );

    Ok(())
}
