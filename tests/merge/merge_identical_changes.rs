use crate::common::command::{
    add_all_and_commit, get_head_commit_sha, init_repository_dir, nit_merge, run_nit_command,
};
use crate::common::file::{read_file, write_file, FileSpec};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

/// Both branches make the same edit: the merge takes it once, silently.
#[rstest]
fn identical_changes_on_both_sides_merge_without_conflict(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;

    run_nit_command(dir.path(), &["branch", "topic"])
        .assert()
        .success();

    // master swaps flour for cornmeal, and adds a file so histories diverge
    write_file(FileSpec::new(
        dir.path().join("recipe.txt"),
        "milk\ncornmeal\neggs\n".to_string(),
    ));
    write_file(FileSpec::new(
        dir.path().join("notes.txt"),
        "gluten free\n".to_string(),
    ));
    add_all_and_commit(dir.path(), "swap flour on master")?;

    // topic makes the very same recipe edit
    run_nit_command(dir.path(), &["checkout", "topic"])
        .assert()
        .success();
    write_file(FileSpec::new(
        dir.path().join("recipe.txt"),
        "milk\ncornmeal\neggs\n".to_string(),
    ));
    add_all_and_commit(dir.path(), "swap flour on topic")?;

    nit_merge(dir.path(), "master")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Merge made by the three-way strategy.",
        ));

    let recipe = read_file(&dir.path().join("recipe.txt"));
    assert_eq!(recipe, "milk\ncornmeal\neggs\n");
    assert!(!recipe.contains("<<<<<<<"));

    // a merge commit was still recorded
    let merge_sha = get_head_commit_sha(dir.path())?;
    let output = run_nit_command(dir.path(), &["cat-file", &merge_sha]).output()?;
    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(stdout.matches("parent ").count(), 2);

    Ok(())
}
