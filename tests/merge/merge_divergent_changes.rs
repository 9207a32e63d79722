use crate::common::command::{
    add_all_and_commit, get_commit_parents, get_head_commit_sha, init_repository_dir, nit_merge,
    run_nit_command,
};
use crate::common::file::{read_file, write_file, FileSpec};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

/// Both branches add their own file: the merge takes both sides and records
/// a two-parent commit, with no conflicts.
#[rstest]
fn merging_changes_to_different_files_is_clean(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_nit_command(dir.path(), &["branch", "topic"])
        .assert()
        .success();

    // master adds a topping
    write_file(FileSpec::new(
        dir.path().join("topping.txt"),
        "sugar\n".to_string(),
    ));
    let master_sha = add_all_and_commit(dir.path(), "add topping")?;

    // topic adds a sauce
    run_nit_command(dir.path(), &["checkout", "topic"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("sauce.txt"),
        "tomato\nbasil\n".to_string(),
    ));
    let topic_sha = add_all_and_commit(dir.path(), "add sauce")?;

    nit_merge(dir.path(), "master")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Merge made by the three-way strategy.",
        ));

    // both sides' files are present, untouched base file included
    assert_eq!(read_file(&dir.path().join("topping.txt")), "sugar\n");
    assert_eq!(read_file(&dir.path().join("sauce.txt")), "tomato\nbasil\n");
    assert_eq!(
        read_file(&dir.path().join("recipe.txt")),
        "milk\nflour\neggs\n"
    );

    // the merge commit has both tips as parents, ours first
    let merge_sha = get_head_commit_sha(dir.path())?;
    assert_ne!(merge_sha, master_sha);
    assert_ne!(merge_sha, topic_sha);
    assert_eq!(
        get_commit_parents(dir.path(), &merge_sha)?,
        vec![topic_sha, master_sha]
    );

    Ok(())
}

/// One branch edits a file the other never touched: the edited version wins
/// without any line merging.
#[rstest]
fn merging_a_one_sided_edit_takes_the_changed_side(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_nit_command(dir.path(), &["branch", "topic"])
        .assert()
        .success();

    // master leaves recipe.txt alone, adds another file
    write_file(FileSpec::new(
        dir.path().join("notes.txt"),
        "serve warm\n".to_string(),
    ));
    add_all_and_commit(dir.path(), "add notes")?;

    // topic rewrites the recipe
    run_nit_command(dir.path(), &["checkout", "topic"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("recipe.txt"),
        "milk\nflour\neggs\nbutter\n".to_string(),
    ));
    add_all_and_commit(dir.path(), "add butter")?;

    nit_merge(dir.path(), "master").assert().success();

    assert_eq!(
        read_file(&dir.path().join("recipe.txt")),
        "milk\nflour\neggs\nbutter\n"
    );
    assert_eq!(read_file(&dir.path().join("notes.txt")), "serve warm\n");

    Ok(())
}
