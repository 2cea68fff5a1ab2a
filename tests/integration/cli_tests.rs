//! Command-line interface tests.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

fn resweep() -> Command {
    Command::cargo_bin("resweep").unwrap()
}

#[test]
fn missing_manifest_fails_with_message() {
    let temp = TempDir::new().unwrap();
    resweep()
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("AndroidManifest.xml"));
}

#[test]
fn no_prompt_removes_unused_resources() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "app/src/main/AndroidManifest.xml",
        "<manifest package=\"com.example.app\"/>\n",
    );
    write(
        temp.path(),
        "app/src/main/res/values/strings.xml",
        "<resources>\n    <string name=\"used\">x</string>\n    <string name=\"dead\">y</string>\n</resources>\n",
    );
    write(temp.path(), "app/src/main/res/drawable/dead_icon.png", "png");
    write(temp.path(), "app/src/main/java/Main.kt", "val t = R.string.used\n");

    let module = temp.path().join("app/src/main");
    resweep()
        .arg(&module)
        .args(["--no-prompt", "--quiet"])
        .assert()
        .success();

    let strings = std::fs::read_to_string(module.join("res/values/strings.xml")).unwrap();
    assert!(strings.contains("used"));
    assert!(!strings.contains("dead"));
    assert!(!module.join("res/drawable/dead_icon.png").exists());
    // The drawable survived in the backup tree.
    assert!(module
        .join(".resweep-backup/main/res/drawable/dead_icon.png")
        .exists());
}

#[test]
fn json_summary_is_written_to_output_file() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "app/src/main/AndroidManifest.xml",
        "<manifest package=\"com.example.app\"/>\n",
    );
    write(temp.path(), "app/src/main/res/drawable/dead_icon.png", "png");

    let out = temp.path().join("summary.json");
    resweep()
        .arg(temp.path().join("app/src/main"))
        .args(["--no-prompt", "--quiet", "--format", "json"])
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["total_removed"], 1);
    assert_eq!(value["removed_by_kind"]["drawable"], 1);
}

#[test]
fn cli_exclude_protects_a_file() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "app/src/main/AndroidManifest.xml",
        "<manifest package=\"com.example.app\"/>\n",
    );
    let donottranslate =
        "<resources>\n    <string name=\"legal_note\">...</string>\n</resources>\n";
    write(
        temp.path(),
        "app/src/main/res/values/donottranslate.xml",
        donottranslate,
    );

    let module = temp.path().join("app/src/main");
    resweep()
        .arg(&module)
        .args(["--no-prompt", "--quiet", "--exclude", "donottranslate.xml"])
        .assert()
        .success();

    let contents =
        std::fs::read_to_string(module.join("res/values/donottranslate.xml")).unwrap();
    assert_eq!(contents, donottranslate);
}
