//! Reference scanning: substring matching of resource usages, line by
//! line, with kind-specific syntax rules.
//!
//! No grammar-level parsing happens here. Code files are searched for
//! `R.kind.name` tokens, markup files for `@kind/name` tokens, with a
//! boundary check so that a name which is a prefix of another name does
//! not produce false positives.

use crate::catalog::{ResourceCatalog, ResourceKind};
use crate::discovery::FileType;
use std::path::Path;
use tracing::warn;

pub struct ReferenceScanner;

impl ReferenceScanner {
    /// Scan one file, incrementing counters for every reference found.
    /// Unreadable files are logged and contribute no matches. Returns
    /// whether any line matched.
    pub fn scan_file(path: &Path, file_type: FileType, catalog: &mut ResourceCatalog) -> bool {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                warn!("skipping unreadable file {}: {err}", path.display());
                return false;
            }
        };

        let is_code = file_type.is_code();
        let mut any_match = false;
        for line in contents.lines() {
            // Commented-out code does not keep a resource alive.
            if is_code && line.trim_start().starts_with("//") {
                continue;
            }
            if Self::scan_line(line, is_code, catalog) {
                any_match = true;
            }
        }
        any_match
    }

    /// Scan a single line against every cataloged name.
    ///
    /// Kinds are checked in a fixed priority order and the scan stops at
    /// the first kind with a match: a line is assumed to reference at
    /// most one resource kind. Multiple references of the same kind on
    /// one line are still all counted, e.g.
    /// `val id = if (locked) R.drawable.thumb_lock else R.drawable.thumb`.
    pub fn scan_line(line: &str, is_code: bool, catalog: &mut ResourceCatalog) -> bool {
        for kind in ResourceKind::SCAN_ORDER {
            if Self::scan_kind(line, is_code, kind, catalog) {
                return true;
            }
        }
        false
    }

    /// Check every cataloged name of one kind against the line,
    /// incrementing each match. Returns whether any name matched.
    fn scan_kind(
        line: &str,
        is_code: bool,
        kind: ResourceKind,
        catalog: &mut ResourceCatalog,
    ) -> bool {
        let mut matched = false;
        for (name, count) in catalog.entries_mut(kind) {
            let token = if is_code {
                // Dots in declared names appear as underscores in code:
                // style Parent.Child is referenced as R.style.Parent_Child.
                format!("R.{}.{}", kind.ref_tag(), name.replace('.', "_"))
            } else {
                format!("@{}/{}", kind.ref_tag(), name)
            };

            let mut found = find_token(line, &token);

            if !found && !is_code && kind == ResourceKind::Style {
                found = is_style_parent_reference(line, name);
            }

            if found {
                *count += 1;
                matched = true;
            }
        }
        matched
    }
}

/// Substring search with a boundary check: a hit immediately followed by
/// a letter, digit, `_` or `.` actually belongs to a longer name, so the
/// search resumes later in the same line.
fn find_token(line: &str, token: &str) -> bool {
    let mut start = 0;
    while let Some(offset) = line[start..].find(token) {
        let pos = start + offset;
        let end = pos + token.len();
        match line[end..].chars().next() {
            Some(next) if next == '_' || next == '.' || next.is_alphanumeric() => {
                // False positive, e.g. @drawable/icon inside
                // @drawable/icon_large. The token may still occur again
                // further along the line.
                start = pos + 1;
            }
            _ => return true,
        }
    }
    false
}

/// Styles can name a parent three ways in markup:
/// `parent="@style/Base"`, `parent="Base"`, or implicitly by declaring a
/// child named `"Base.Something"`.
fn is_style_parent_reference(line: &str, name: &str) -> bool {
    if line.contains(&format!("parent=\"@style/{name}\"")) {
        return true;
    }
    if line.contains(&format!("\"{name}.")) {
        return true;
    }
    line.contains(&format!("parent=\"{name}\""))
}
