//! Scanner matching rules exercised through the public API.

use resweep::{FileType, ReferenceScanner, ResourceCatalog, ResourceKind};
use std::path::Path;
use tempfile::TempDir;

fn catalog_with(entries: &[(ResourceKind, &str)]) -> ResourceCatalog {
    let mut catalog = ResourceCatalog::new();
    for (kind, name) in entries {
        catalog.declare(*kind, name);
    }
    catalog
}

#[test]
fn boundary_check_keeps_prefix_names_apart() {
    let mut catalog = catalog_with(&[
        (ResourceKind::Drawable, "icon"),
        (ResourceKind::Drawable, "icon_large"),
    ]);

    ReferenceScanner::scan_line(
        r#"<ImageView android:src="@drawable/icon_large"/>"#,
        false,
        &mut catalog,
    );

    assert_eq!(catalog.count(ResourceKind::Drawable, "icon_large"), Some(1));
    assert_eq!(catalog.count(ResourceKind::Drawable, "icon"), Some(0));
}

#[test]
fn mangled_and_plain_style_names_both_count() {
    let mut catalog = catalog_with(&[(ResourceKind::Style, "Dialog.Left")]);

    ReferenceScanner::scan_line("theme.applyStyle(R.style.Dialog_Left, true)", true, &mut catalog);
    ReferenceScanner::scan_line(r#"<TextView style="@style/Dialog.Left"/>"#, false, &mut catalog);

    assert_eq!(catalog.count(ResourceKind::Style, "Dialog.Left"), Some(2));
}

#[test]
fn style_inheritance_forms_are_references() {
    let mut catalog = catalog_with(&[(ResourceKind::Style, "SquareButtonStyle")]);

    ReferenceScanner::scan_line(
        r#"<style name="GreenSquareButtonStyle" parent="SquareButtonStyle">"#,
        false,
        &mut catalog,
    );
    assert_eq!(catalog.count(ResourceKind::Style, "SquareButtonStyle"), Some(1));

    ReferenceScanner::scan_line(
        r#"<style name="SquareButtonStyle.Pressed">"#,
        false,
        &mut catalog,
    );
    assert_eq!(catalog.count(ResourceKind::Style, "SquareButtonStyle"), Some(2));

    // An unrelated style with a similar name is not a reference.
    ReferenceScanner::scan_line(
        r#"<style name="RoundButtonStyle" parent="BaseButtonStyle">"#,
        false,
        &mut catalog,
    );
    assert_eq!(catalog.count(ResourceKind::Style, "SquareButtonStyle"), Some(2));
}

#[test]
fn scan_file_counts_across_lines() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("MainActivity.kt");
    std::fs::write(
        &file,
        concat!(
            "class MainActivity {\n",
            "    // val unused = R.string.greeting\n",
            "    val a = R.string.greeting\n",
            "    val b = if (flag) R.drawable.thumb_lock else R.drawable.thumb\n",
            "}\n",
        ),
    )
    .unwrap();

    let mut catalog = catalog_with(&[
        (ResourceKind::String, "greeting"),
        (ResourceKind::Drawable, "thumb"),
        (ResourceKind::Drawable, "thumb_lock"),
    ]);

    let matched = ReferenceScanner::scan_file(&file, FileType::Code, &mut catalog);
    assert!(matched);
    // The commented-out line contributed nothing.
    assert_eq!(catalog.count(ResourceKind::String, "greeting"), Some(1));
    assert_eq!(catalog.count(ResourceKind::Drawable, "thumb"), Some(1));
    assert_eq!(catalog.count(ResourceKind::Drawable, "thumb_lock"), Some(1));
}

#[test]
fn markup_comments_still_count_as_references() {
    // Only code comments are skipped; XML has no line-comment rule here.
    let mut catalog = catalog_with(&[(ResourceKind::String, "title")]);
    ReferenceScanner::scan_line(
        r#"<!-- <TextView android:text="@string/title"/> -->"#,
        false,
        &mut catalog,
    );
    assert_eq!(catalog.count(ResourceKind::String, "title"), Some(1));
}

#[test]
fn missing_file_is_skipped_quietly() {
    let mut catalog = catalog_with(&[(ResourceKind::String, "title")]);
    let matched = ReferenceScanner::scan_file(
        Path::new("/definitely/not/here.kt"),
        FileType::Code,
        &mut catalog,
    );
    assert!(!matched);
}
