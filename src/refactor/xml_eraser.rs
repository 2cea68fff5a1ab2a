//! In-place rewriting of values XML files, stripping declaration blocks
//! for resources the catalog has marked unused.

use crate::catalog::{ResourceCatalog, ResourceKind};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::Path;
use tracing::debug;

/// Line-oriented eraser for value declarations.
///
/// A small state machine walks the file: in the default state each line
/// is tested against the value-kind opening tags; once a dropped
/// declaration turns out to span multiple lines, every following line is
/// dropped until the closing tag shows up. Lines that survive are kept
/// verbatim, newline-normalized.
pub struct XmlBlockEraser<'a> {
    catalog: &'a ResourceCatalog,
}

impl<'a> XmlBlockEraser<'a> {
    pub fn new(catalog: &'a ResourceCatalog) -> Self {
        Self { catalog }
    }

    /// Rewrite one values file, removing every declaration whose catalog
    /// entry has a zero count. Returns the declarations actually
    /// dropped. The file is rewritten only when at least one line was
    /// dropped; on any I/O failure it is left untouched.
    pub fn erase_file(&self, path: &Path) -> Result<Vec<(ResourceKind, String)>> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;

        let mut kept = String::with_capacity(contents.len());
        let mut dropped = Vec::new();
        let mut dropped_lines = 0usize;
        let mut skip_until: Option<String> = None;

        for line in contents.lines() {
            let mut drop_line = false;

            if let Some(closing) = skip_until.as_deref() {
                // Inside a multi-line declaration: drop unconditionally,
                // and leave the state once the closing tag shows up.
                drop_line = true;
                if line.contains(closing) {
                    skip_until = None;
                }
            } else {
                for kind in ResourceKind::VALUE_KINDS {
                    let Some(name) = kind.parse_declaration(line) else {
                        continue;
                    };
                    if !self.catalog.is_unused(kind, name) {
                        continue;
                    }

                    drop_line = true;
                    dropped.push((kind, name.to_string()));

                    match kind {
                        ResourceKind::String | ResourceKind::Dimen | ResourceKind::Color => {
                            // Usually one line; a trailing body still has
                            // to be consumed.
                            if !line.contains(&kind.close_tag()) && !line.contains("/>") {
                                skip_until = Some(kind.close_tag());
                            }
                        }
                        ResourceKind::StringArray => {
                            // An empty array can be self-closing:
                            // <string-array name="featured_images"/>
                            if !line.trim_end().ends_with("/>") {
                                skip_until = Some(kind.close_tag());
                            }
                        }
                        ResourceKind::Style => {
                            skip_until = Some(kind.close_tag());
                        }
                        _ => {}
                    }

                    // The closing tag may sit on the same line as the
                    // opening tag.
                    if let Some(closing) = skip_until.as_deref() {
                        if line.contains(closing) {
                            skip_until = None;
                        }
                    }
                    break;
                }
            }

            if drop_line {
                dropped_lines += 1;
            } else {
                kept.push_str(line);
                kept.push('\n');
            }
        }

        if dropped_lines == 0 || kept.is_empty() {
            return Ok(Vec::new());
        }

        std::fs::write(path, &kept)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to rewrite {}", path.display()))?;

        debug!("removed {} lines from {}", dropped_lines, path.display());
        Ok(dropped)
    }
}
