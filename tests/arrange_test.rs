use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;
use tempfile::tempdir;

use predicates::prelude::*;

fn norf(tmp: &Path, root: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("norf");
    cmd.current_dir(tmp)
        .env("NORF_ROOT", root)
        .env("NORF_CONFIG_PATH", tmp.join("organizer.toml"));
    cmd
}

#[test]
fn arrange_renumbers_by_modification_time() {
    let tmp = tempdir().expect("tempdir");
    let root = tmp.path().join("Norfeusz");
    norf(tmp.path(), &root).arg("init").assert().success();
    norf(tmp.path(), &root)
        .args(["project-create", "moja", "--no-number"])
        .assert()
        .success();

    let tekst = root.join("Robocze").join("moja").join("Tekst");
    fs::write(tekst.join("moja-tekst_005.txt"), "starsza").expect("write");
    thread::sleep(Duration::from_millis(1100));
    fs::write(tekst.join("moja-tekst_001.txt"), "nowsza").expect("write");
    fs::write(tekst.join("luzem.txt"), "poza konwencja").expect("write");

    norf(tmp.path(), &root)
        .args(["arrange", "Robocze", "moja", "tekst"])
        .assert()
        .success();

    // oldest file takes 001, the stray file is untouched
    assert_eq!(
        fs::read_to_string(tekst.join("moja-tekst_001.txt")).expect("read"),
        "starsza"
    );
    assert_eq!(
        fs::read_to_string(tekst.join("moja-tekst_002.txt")).expect("read"),
        "nowsza"
    );
    assert!(tekst.join("luzem.txt").is_file());
}

#[test]
fn arrange_reports_when_nothing_matches() {
    let tmp = tempdir().expect("tempdir");
    let root = tmp.path().join("Norfeusz");
    norf(tmp.path(), &root).arg("init").assert().success();
    norf(tmp.path(), &root)
        .args(["project-create", "pusta", "--no-number"])
        .assert()
        .success();

    norf(tmp.path(), &root)
        .args(["arrange", "Robocze", "pusta", "tekst"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no conventional files"));
}

#[test]
fn preview_name_shows_the_next_counter() {
    let tmp = tempdir().expect("tempdir");
    let root = tmp.path().join("Norfeusz");
    norf(tmp.path(), &root).arg("init").assert().success();
    norf(tmp.path(), &root)
        .args(["project-create", "moja", "--no-number"])
        .assert()
        .success();

    let tekst = root.join("Robocze").join("moja").join("Tekst");
    fs::write(tekst.join("moja-tekst_002.txt"), "x").expect("write");

    norf(tmp.path(), &root)
        .args([
            "preview-name",
            "--album",
            "Robocze",
            "--project",
            "moja",
            "--folder",
            "tekst",
            "--extension",
            "txt",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("moja-tekst_003.txt"));
}
