//! Declaration indexing: one walk over the resource trees that fills the
//! catalog with every declared resource name.

use crate::catalog::{ResourceCatalog, ResourceKind};
use crate::config::Config;
use crate::discovery::FileFinder;
use std::path::Path;
use tracing::{debug, info, warn};

/// Extensions a drawable or mipmap file may carry. Drawables are not
/// only raster images: `background="@drawable/selector"` points at an
/// XML file.
pub const DRAWABLE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "xml"];

/// Derive the resource name from a file-backed resource: the file stem
/// with any trailing `.9` nine-patch marker stripped.
pub fn file_resource_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    Some(stem.strip_suffix(".9").unwrap_or(stem).to_string())
}

/// True when the file looks like a drawable/mipmap resource and is not
/// on the exclusion list.
pub fn is_drawable_candidate(path: &Path, config: &Config) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    if !DRAWABLE_EXTENSIONS.contains(&ext) {
        return false;
    }
    let name = path.file_name().map(|n| n.to_string_lossy());
    !name.map_or(false, |n| config.is_excluded_file(&n))
}

/// True when the file is a non-excluded XML file.
pub fn is_markup_candidate(path: &Path, config: &Config) -> bool {
    if path.extension().and_then(|e| e.to_str()) != Some("xml") {
        return false;
    }
    let name = path.file_name().map(|n| n.to_string_lossy());
    !name.map_or(false, |n| config.is_excluded_file(&n))
}

/// Walks the resource trees once and registers every declaration in the
/// catalog with a zero reference count. Idempotent on an unchanged tree.
pub struct DeclarationIndexer<'a> {
    config: &'a Config,
    finder: FileFinder<'a>,
}

impl<'a> DeclarationIndexer<'a> {
    pub fn new(config: &'a Config, backup_root: &Path) -> Self {
        Self {
            config,
            finder: FileFinder::new(config, backup_root),
        }
    }

    /// Index every resource root under `search_root`.
    pub fn index(&self, search_root: &Path, catalog: &mut ResourceCatalog) {
        for res_dir in self.finder.find_res_dirs(search_root) {
            info!("indexing {}", res_dir.display());
            self.index_values(&res_dir, catalog);
            self.index_files(&res_dir, "drawable", ResourceKind::Drawable, catalog);
            self.index_files(&res_dir, "mipmap", ResourceKind::Mipmap, catalog);
            self.index_layouts(&res_dir, catalog);
        }
    }

    /// Value declarations: `<string name="…">` and friends inside any
    /// XML file under a `values*` subtree.
    fn index_values(&self, res_dir: &Path, catalog: &mut ResourceCatalog) {
        for file in self.finder.prefixed_files(res_dir, "values") {
            if !is_markup_candidate(&file, self.config) {
                continue;
            }
            let contents = match std::fs::read_to_string(&file) {
                Ok(contents) => contents,
                Err(err) => {
                    warn!("skipping unreadable values file {}: {err}", file.display());
                    continue;
                }
            };
            for line in contents.lines() {
                // A line declares at most one resource.
                for kind in ResourceKind::VALUE_KINDS {
                    if let Some(name) = kind.parse_declaration(line) {
                        if catalog.declare(kind, name) {
                            debug!("declared {kind} {name}");
                        }
                        break;
                    }
                }
            }
        }
    }

    /// File-backed drawables/mipmaps, named by stem minus the nine-patch
    /// marker: `ic_send.9.png` declares `ic_send`.
    fn index_files(
        &self,
        res_dir: &Path,
        prefix: &str,
        kind: ResourceKind,
        catalog: &mut ResourceCatalog,
    ) {
        for file in self.finder.prefixed_files(res_dir, prefix) {
            if !is_drawable_candidate(&file, self.config) {
                continue;
            }
            if let Some(name) = file_resource_name(&file) {
                catalog.declare(kind, &name);
            }
        }
    }

    /// Layout files, named by stem.
    fn index_layouts(&self, res_dir: &Path, catalog: &mut ResourceCatalog) {
        for file in self.finder.prefixed_files(res_dir, "layout") {
            if !is_markup_candidate(&file, self.config) {
                continue;
            }
            if let Some(name) = file_resource_name(&file) {
                catalog.declare(ResourceKind::Layout, &name);
            }
        }
    }
}
