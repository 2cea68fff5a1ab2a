//! Erasure behavior across a whole run: multi-line blocks, backup
//! discipline and failure handling.

use resweep::{Config, Decision, PassController, ResourceKind};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

fn module_root(temp: &Path) -> PathBuf {
    temp.join("app/src/main")
}

fn write_manifest(temp: &Path) {
    write(
        temp,
        "app/src/main/AndroidManifest.xml",
        "<manifest package=\"com.example.app\"/>\n",
    );
}

#[test]
fn multi_line_style_block_is_removed_and_neighbors_survive_byte_identical() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path());
    write(
        temp.path(),
        "app/src/main/res/values/styles.xml",
        concat!(
            "<resources>\n",
            "    <string name=\"kept\">hello</string>\n",
            "    <style name=\"DeadStyle\">\n",
            "        <item name=\"android:background\">#fff</item>\n",
            "    </style>\n",
            "    <color name=\"kept_color\">#123456</color>\n",
            "</resources>\n",
        ),
    );
    write(
        temp.path(),
        "app/src/main/java/Main.kt",
        "val a = R.string.kept\nval b = R.color.kept_color\n",
    );

    let config = Config::default();
    let mut controller =
        PassController::new(&config, &module_root(temp.path()), Vec::new()).unwrap();
    controller.index();
    let summary = controller.run(|_, _| Decision::Delete);

    assert_eq!(summary.total_removed, 1);
    assert_eq!(summary.removed_by_kind.get(&ResourceKind::Style), Some(&1));

    let contents =
        std::fs::read_to_string(module_root(temp.path()).join("res/values/styles.xml")).unwrap();
    assert_eq!(
        contents,
        concat!(
            "<resources>\n",
            "    <string name=\"kept\">hello</string>\n",
            "    <color name=\"kept_color\">#123456</color>\n",
            "</resources>\n",
        )
    );
}

#[test]
fn backup_failure_keeps_file_and_catalog_entry() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path());
    write(temp.path(), "app/src/main/res/drawable/dead.png", "png bytes");
    // A plain file squatting on the backup path makes every backup fail.
    write(temp.path(), "app/src/main/.resweep-backup", "not a directory");

    let config = Config::default();
    let mut controller =
        PassController::new(&config, &module_root(temp.path()), Vec::new()).unwrap();
    controller.index();
    let summary = controller.run(|_, _| Decision::Delete);

    // Nothing could be erased, so nothing left the catalog and the
    // fixpoint was reached without removals.
    assert_eq!(summary.total_removed, 0);
    assert!(summary.deleted_files.is_empty());
    assert!(module_root(temp.path()).join("res/drawable/dead.png").exists());
    assert_eq!(
        summary.remaining_by_kind.get(&ResourceKind::Drawable),
        Some(&1)
    );
}

#[test]
fn backup_of_previous_run_is_wiped() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path());
    write(temp.path(), "app/src/main/res/drawable/dead.png", "png");
    write(
        temp.path(),
        "app/src/main/.resweep-backup/stale/leftover.xml",
        "<old/>",
    );

    let config = Config::default();
    let mut controller =
        PassController::new(&config, &module_root(temp.path()), Vec::new()).unwrap();
    controller.index();
    let summary = controller.run(|_, _| Decision::Delete);

    assert_eq!(summary.total_removed, 1);
    let backup = module_root(temp.path()).join(".resweep-backup");
    assert!(!backup.join("stale/leftover.xml").exists());
    assert!(backup.join("main/res/drawable/dead.png").exists());
}

#[test]
fn excluded_files_are_never_touched() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path());
    let analytics = "<resources>\n    <string name=\"tracker_id\">XYZ</string>\n</resources>\n";
    write(temp.path(), "app/src/main/res/values/analytics.xml", analytics);

    let config = Config::default();
    let mut controller =
        PassController::new(&config, &module_root(temp.path()), Vec::new()).unwrap();
    controller.index();
    let summary = controller.run(|_, _| Decision::Delete);

    // tracker_id was never indexed, so nothing is removed and the file
    // keeps its contents.
    assert_eq!(summary.total_removed, 0);
    let contents =
        std::fs::read_to_string(module_root(temp.path()).join("res/values/analytics.xml"))
            .unwrap();
    assert_eq!(contents, analytics);
}

#[test]
fn nine_patch_drawable_is_deleted_by_mangled_name() {
    let temp = TempDir::new().unwrap();
    write_manifest(temp.path());
    write(temp.path(), "app/src/main/res/drawable/button_bg.9.png", "png");
    write(temp.path(), "app/src/main/res/drawable/used_bg.9.png", "png");
    write(
        temp.path(),
        "app/src/main/res/layout/screen.xml",
        "<View android:background=\"@drawable/used_bg\"/>\n",
    );
    write(
        temp.path(),
        "app/src/main/java/Main.kt",
        "val l = R.layout.screen\n",
    );

    let config = Config::default();
    let mut controller =
        PassController::new(&config, &module_root(temp.path()), Vec::new()).unwrap();
    controller.index();
    let summary = controller.run(|_, _| Decision::Delete);

    assert_eq!(summary.total_removed, 1);
    assert!(!module_root(temp.path()).join("res/drawable/button_bg.9.png").exists());
    assert!(module_root(temp.path()).join("res/drawable/used_bg.9.png").exists());
}
