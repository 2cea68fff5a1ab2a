use crate::config::Config;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Class of file the reference scanner understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// Kotlin or Java source, references resources as `R.kind.name`.
    Code,
    /// XML markup, references resources as `@kind/name`.
    Markup,
}

impl FileType {
    /// Determine file type from path extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "kt" | "java" => Some(FileType::Code),
            "xml" => Some(FileType::Markup),
            _ => None,
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, FileType::Code)
    }
}

/// Directory walks for the indexing and scanning phases.
///
/// The backup directory is excluded from every walk: once a file has
/// been backed up, references inside the backup copy must not keep other
/// resources alive.
pub struct FileFinder<'a> {
    config: &'a Config,
    backup_root: PathBuf,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a Config, backup_root: &Path) -> Self {
        Self {
            config,
            backup_root: backup_root.to_path_buf(),
        }
    }

    /// Find every resource root (directory named `res` by default) under
    /// `search_root`, skipping hidden directories, skip-listed names and
    /// the backup directory. Sorted for reproducible traversal.
    pub fn find_res_dirs(&self, search_root: &Path) -> Vec<PathBuf> {
        let mut dirs = Vec::new();

        let walker = walkdir::WalkDir::new(search_root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if !entry.file_type().is_dir() {
                    return true;
                }
                if entry.path() == self.backup_root {
                    return false;
                }
                let name = entry.file_name().to_string_lossy();
                let hidden = name.starts_with('.') && entry.depth() > 0;
                !hidden && !self.config.should_skip_dir(&name)
            });

        for entry in walker.flatten() {
            if entry.file_type().is_dir()
                && entry.file_name().to_string_lossy() == self.config.resource_dir.as_str()
            {
                trace!("resource root: {}", entry.path().display());
                dirs.push(entry.path().to_path_buf());
            }
        }

        dirs
    }

    /// Every file under the subdirectories of `res_dir` whose name starts
    /// with `prefix` (e.g. `values`, `values-fr`, `drawable-hdpi`).
    /// Sorted for reproducible traversal.
    pub fn prefixed_files(&self, res_dir: &Path, prefix: &str) -> Vec<PathBuf> {
        let Ok(entries) = std::fs::read_dir(res_dir) else {
            return Vec::new();
        };

        let mut subdirs: Vec<PathBuf> = entries
            .flatten()
            .filter(|entry| {
                entry.file_type().map(|t| t.is_dir()).unwrap_or(false)
                    && entry.file_name().to_string_lossy().starts_with(prefix)
            })
            .map(|entry| entry.path())
            .collect();
        subdirs.sort();

        let mut files = Vec::new();
        for subdir in subdirs {
            for entry in walkdir::WalkDir::new(&subdir)
                .sort_by_file_name()
                .into_iter()
                .flatten()
            {
                if entry.file_type().is_file() {
                    files.push(entry.path().to_path_buf());
                }
            }
        }
        files
    }

    /// Every code and markup file to scan for references under `root`,
    /// in deterministic order. Hidden files and the backup directory are
    /// skipped; everything else, including build output, is fair game
    /// because generated markup can reference resources too.
    pub fn scan_targets(&self, root: &Path) -> Vec<(PathBuf, FileType)> {
        let backup_root = self.backup_root.clone();
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .hidden(true)
            .follow_links(false)
            .sort_by_file_path(|a, b| a.cmp(b))
            .filter_entry(move |entry| entry.path() != backup_root)
            .build();

        walker
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| {
                let path = entry.path();
                let file_type = FileType::from_path(path)?;
                trace!("scan target {:?}: {}", file_type, path.display());
                Some((path.to_path_buf(), file_type))
            })
            .collect()
    }
}
