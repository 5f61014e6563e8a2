use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn norf(tmp: &Path, root: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("norf");
    cmd.current_dir(tmp)
        .env("NORF_ROOT", root)
        .env("NORF_CONFIG_PATH", tmp.join("organizer.toml"));
    cmd
}

fn dir_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read dir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
        .filter(|n| !n.starts_with('.'))
        .collect();
    names.sort();
    names
}

#[test]
fn init_creates_the_default_layout() {
    let tmp = tempdir().expect("tempdir");
    let root = tmp.path().join("Norfeusz");

    norf(tmp.path(), &root).arg("init").assert().success();

    assert!(root.join("Robocze").is_dir());
    assert!(root.join("Sortownia").is_dir());
}

#[test]
fn manual_number_shifts_existing_projects_up() {
    let tmp = tempdir().expect("tempdir");
    let root = tmp.path().join("Norfeusz");
    norf(tmp.path(), &root).arg("init").assert().success();

    norf(tmp.path(), &root)
        .args(["project-create", "pierwszy"])
        .assert()
        .success();
    norf(tmp.path(), &root)
        .args(["project-create", "drugi"])
        .assert()
        .success();
    norf(tmp.path(), &root)
        .args(["project-create", "wcisk", "--number", "2"])
        .assert()
        .success();

    assert_eq!(
        dir_names(&root.join("Robocze")),
        vec!["01 - pierwszy", "02 - wcisk", "03 - drugi"]
    );
}

#[test]
fn assign_number_numbers_an_unnumbered_project() {
    let tmp = tempdir().expect("tempdir");
    let root = tmp.path().join("Norfeusz");
    norf(tmp.path(), &root).arg("init").assert().success();

    norf(tmp.path(), &root)
        .args(["project-create", "luzem", "--no-number"])
        .assert()
        .success();
    norf(tmp.path(), &root)
        .args(["assign-number", "Robocze", "luzem", "1"])
        .assert()
        .success();

    assert_eq!(dir_names(&root.join("Robocze")), vec!["01 - luzem"]);
}

#[test]
fn renumber_applies_a_batch_mapping() {
    let tmp = tempdir().expect("tempdir");
    let root = tmp.path().join("Norfeusz");
    norf(tmp.path(), &root).arg("init").assert().success();

    norf(tmp.path(), &root)
        .args(["project-create", "a"])
        .assert()
        .success();
    norf(tmp.path(), &root)
        .args(["project-create", "b"])
        .assert()
        .success();
    norf(tmp.path(), &root)
        .args(["renumber", "Robocze", "01 - a=2", "02 - b=1"])
        .assert()
        .success();

    assert_eq!(
        dir_names(&root.join("Robocze")),
        vec!["01 - b", "02 - a"]
    );
}

#[test]
fn deleting_to_staging_evacuates_files_first() {
    let tmp = tempdir().expect("tempdir");
    let root = tmp.path().join("Norfeusz");
    norf(tmp.path(), &root).arg("init").assert().success();

    norf(tmp.path(), &root)
        .args(["project-create", "znika"])
        .assert()
        .success();
    let tekst = root.join("Robocze").join("01 - znika").join("Tekst");
    fs::write(tekst.join("notatka.txt"), "tekst").expect("write file");

    norf(tmp.path(), &root)
        .args(["project-delete", "Robocze", "01 - znika", "--to-staging"])
        .assert()
        .success();

    assert!(!root.join("Robocze").join("01 - znika").exists());
    assert!(root.join("Sortownia").join("notatka.txt").is_file());
}
