use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use serde_json::Value;

fn filerenamer() -> Command {
    let mut cmd = Command::cargo_bin("filerenamer").unwrap();
    cmd.env_remove("FILERENAMER_YES").env_remove("RUST_LOG");
    cmd
}

fn setup(files: &[&str]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for name in files {
        temp_dir.child(name).write_str(name).unwrap();
    }
    temp_dir
}

#[test]
fn test_help_command() {
    filerenamer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Batch rename files in a directory with preview",
        ));
}

#[test]
fn test_version_subcommand() {
    filerenamer()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("filerenamer 0.1.0"));
}

#[test]
fn test_version_subcommand_json() {
    filerenamer()
        .args(["version", "--output", "json"])
        .assert()
        .success()
        .stdout(
            predicate::str::is_match(r#"\{"name":"filerenamer","version":"0\.1\.0"\}"#).unwrap(),
        );
}

#[test]
fn test_list_command() {
    let temp_dir = setup(&["b.txt", "a.txt"]);
    temp_dir.child("subdir").create_dir_all().unwrap();

    filerenamer()
        .current_dir(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1)\ta.txt"))
        .stdout(predicate::str::contains("2)\tb.txt"))
        .stdout(predicate::str::contains("subdir").not());
}

#[test]
fn test_list_with_target_json() {
    let temp_dir = setup(&["a.txt"]);

    let output = filerenamer()
        .args(["list", "--output", "json", "-t"])
        .arg(temp_dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "list");
    assert_eq!(json["files"][0], "a.txt");
}

#[test]
fn test_suffix_with_yes_renames() {
    let temp_dir = setup(&["a.txt", "b.txt"]);

    filerenamer()
        .current_dir(temp_dir.path())
        .args(["suffix", "_done", "-y", "--preview", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt -> a_done.txt"))
        .stdout(predicate::str::contains("Renamed 2 of 2 files"));

    temp_dir.child("a_done.txt").assert(predicate::path::exists());
    temp_dir.child("b_done.txt").assert(predicate::path::exists());
    temp_dir.child("a.txt").assert(predicate::path::missing());
}

#[test]
fn test_dry_run_leaves_files_untouched() {
    let temp_dir = setup(&["IMG_1.jpg"]);

    filerenamer()
        .current_dir(temp_dir.path())
        .args(["replace", "IMG=PHOTO", "--dry-run", "--preview", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("IMG_1.jpg -> PHOTO_1.jpg"));

    temp_dir.child("IMG_1.jpg").assert(predicate::path::exists());
    temp_dir.child("PHOTO_1.jpg").assert(predicate::path::missing());
}

#[test]
fn test_declined_confirmation_renames_nothing() {
    let temp_dir = setup(&["a.txt"]);

    filerenamer()
        .current_dir(temp_dir.path())
        .args(["prefix", "x_"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes discarded."));

    temp_dir.child("a.txt").assert(predicate::path::exists());
}

#[test]
fn test_confirmation_accepts_yes() {
    let temp_dir = setup(&["a.txt"]);

    filerenamer()
        .current_dir(temp_dir.path())
        .args(["prefix", "x_"])
        .write_stdin("y\n")
        .assert()
        .success();

    temp_dir.child("x_a.txt").assert(predicate::path::exists());
}

#[test]
fn test_replace_runs_each_pair_in_turn() {
    let temp_dir = setup(&["IMG_001.jpg"]);

    filerenamer()
        .current_dir(temp_dir.path())
        .args(["replace", "IMG=PIC", "PIC_=holiday-", "-y", "--quiet"])
        .assert()
        .success();

    temp_dir
        .child("holiday-001.jpg")
        .assert(predicate::path::exists());
}

#[test]
fn test_replace_without_equals_fails() {
    let temp_dir = setup(&["a.txt"]);

    filerenamer()
        .current_dir(temp_dir.path())
        .args(["replace", "a", "-y"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("OLD=NEW"));

    temp_dir.child("a.txt").assert(predicate::path::exists());
}

#[test]
fn test_invalid_target_exits_with_code_2() {
    let temp_dir = TempDir::new().unwrap();

    filerenamer()
        .args(["list", "-t"])
        .arg(temp_dir.path().join("missing"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_invalid_regex_reports_json_error() {
    let temp_dir = setup(&["a.txt"]);

    let output = filerenamer()
        .current_dir(temp_dir.path())
        .args(["add-from-file", "no groups", "--output", "json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["kind"], "invalid_argument");
}

#[test]
fn test_enum_uses_defaults() {
    let temp_dir = setup(&["b.png", "a.png"]);

    filerenamer()
        .current_dir(temp_dir.path())
        .args(["enum", "-y", "--quiet"])
        .assert()
        .success();

    temp_dir.child("a_1.png").assert(predicate::path::exists());
    temp_dir.child("b_2.png").assert(predicate::path::exists());
}

#[test]
fn test_enum_at_start_with_custom_start() {
    let temp_dir = setup(&["a.png", "b.png"]);

    filerenamer()
        .current_dir(temp_dir.path())
        .args(["enum", "--start", "5", "--loc", "start", "-y", "--quiet"])
        .assert()
        .success();

    temp_dir.child("5a.png").assert(predicate::path::exists());
    temp_dir.child("6b.png").assert(predicate::path::exists());
}

#[test]
fn test_rename_with_enum_json_output() {
    let temp_dir = setup(&["x.jpg", "y.jpg"]);

    let output = filerenamer()
        .current_dir(temp_dir.path())
        .args(["rename-with-enum", "trip_", "-y", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "rename");
    assert_eq!(json["summary"]["applied"], 2);
    assert_eq!(json["mapping"][0]["new"], "trip_1.jpg");

    temp_dir.child("trip_2.jpg").assert(predicate::path::exists());
}

#[test]
fn test_add_from_file() {
    let temp_dir = TempDir::new().unwrap();
    temp_dir.child("note.txt").write_str("Title: Spring").unwrap();
    temp_dir.child("img.jpg").write_str("Title: Winter").unwrap();

    filerenamer()
        .current_dir(temp_dir.path())
        .args(["add-from-file", r"Title: (\w+)", "-y", "--quiet"])
        .assert()
        .success();

    temp_dir
        .child("noteSpring.txt")
        .assert(predicate::path::exists());
    temp_dir.child("img.jpg").assert(predicate::path::exists());
}

#[test]
fn test_collision_is_skipped_not_overwritten() {
    let temp_dir = setup(&["a.txt", "b.txt"]);

    filerenamer()
        .current_dir(temp_dir.path())
        .args(["replace", "a=b", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped 1 files"));

    temp_dir.child("a.txt").assert("a.txt");
    temp_dir.child("b.txt").assert("b.txt");
}

#[test]
fn test_nothing_to_rename() {
    let temp_dir = setup(&["done_a.txt"]);

    filerenamer()
        .current_dir(temp_dir.path())
        .args(["prefix", "done_"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No files would be renamed"));
}

#[test]
fn test_completions_bash() {
    filerenamer()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("filerenamer"));
}

#[test]
fn test_no_color_env_accepts_any_value() {
    let temp_dir = setup(&["a.txt"]);

    filerenamer()
        .env("NO_COLOR", "1")
        .arg("-t")
        .arg(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1)\ta.txt"));
}

#[test]
fn test_yes_env_skips_confirmation() {
    let temp_dir = setup(&["a.txt"]);

    filerenamer()
        .env("FILERENAMER_YES", "1")
        .current_dir(temp_dir.path())
        .args(["suffix", "_done", "--quiet"])
        .assert()
        .success();

    temp_dir.child("a_done.txt").assert(predicate::path::exists());
}

#[test]
fn test_yes_env_false_still_prompts() {
    let temp_dir = setup(&["a.txt"]);

    filerenamer()
        .env("FILERENAMER_YES", "false")
        .current_dir(temp_dir.path())
        .args(["suffix", "_done"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes discarded."));

    temp_dir.child("a.txt").assert(predicate::path::exists());
}

#[test]
fn test_replace_with_several_pairs_emits_one_json_array() {
    let temp_dir = setup(&["IMG_001.jpg"]);

    let output = filerenamer()
        .current_dir(temp_dir.path())
        .args(["replace", "IMG=PIC", "PIC_=holiday-", "-y", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let batches = json.as_array().unwrap();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0]["mapping"][0]["new"], "PIC_001.jpg");
    assert_eq!(batches[1]["mapping"][0]["new"], "holiday-001.jpg");
    temp_dir
        .child("holiday-001.jpg")
        .assert(predicate::path::exists());
}
