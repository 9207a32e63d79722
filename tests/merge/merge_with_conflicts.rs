use crate::common::command::{
    add_all_and_commit, get_commit_parents, get_head_commit_sha, init_repository_dir, nit_merge,
    run_nit_command,
};
use crate::common::file::{read_file, write_file, FileSpec};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

/// Both branches rewrite the same line: the worktree gets conflict markers,
/// ours first, and the merge commit is still recorded with both parents.
#[rstest]
fn conflicting_edits_leave_markers_and_still_commit(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_nit_command(dir.path(), &["branch", "topic"])
        .assert()
        .success();

    // master swaps flour for cornmeal
    write_file(FileSpec::new(
        dir.path().join("recipe.txt"),
        "milk\ncornmeal\neggs\n".to_string(),
    ));
    let master_sha = add_all_and_commit(dir.path(), "use cornmeal")?;

    // topic swaps flour for rice
    run_nit_command(dir.path(), &["checkout", "topic"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("recipe.txt"),
        "milk\nrice\neggs\n".to_string(),
    ));
    let topic_sha = add_all_and_commit(dir.path(), "use rice")?;

    nit_merge(dir.path(), "master")
        .assert()
        .success()
        .stdout(predicate::str::contains("conflict"));

    assert_eq!(
        read_file(&dir.path().join("recipe.txt")),
        "milk\n<<<<<<< HEAD\nrice\n=======\ncornmeal\n>>>>>>> master\neggs\n"
    );

    let merge_sha = get_head_commit_sha(dir.path())?;
    assert_eq!(
        get_commit_parents(dir.path(), &merge_sha)?,
        vec![topic_sha, master_sha]
    );

    Ok(())
}

/// A file edited on one side and deleted on the other conflicts against
/// empty content.
#[rstest]
fn edit_against_delete_conflicts(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_nit_command(dir.path(), &["branch", "topic"])
        .assert()
        .success();

    // master rewrites the recipe entirely
    write_file(FileSpec::new(
        dir.path().join("recipe.txt"),
        "water\nyeast\n".to_string(),
    ));
    add_all_and_commit(dir.path(), "new recipe")?;

    // topic deletes it; keep another change so histories diverge
    run_nit_command(dir.path(), &["checkout", "topic"])
        .assert()
        .success();
    std::fs::remove_file(dir.path().join("recipe.txt"))?;
    write_file(FileSpec::new(
        dir.path().join("notes.txt"),
        "recipe retired\n".to_string(),
    ));

    // stage the deletion by rewriting the index from scratch
    std::fs::write(dir.path().join(".nit").join("index"), "")?;
    add_all_and_commit(dir.path(), "retire recipe")?;

    nit_merge(dir.path(), "master").assert().success();

    let recipe = read_file(&dir.path().join("recipe.txt"));
    assert!(recipe.contains("<<<<<<< HEAD"));
    assert!(recipe.contains("water"));
    assert!(recipe.contains(">>>>>>> master"));

    Ok(())
}
