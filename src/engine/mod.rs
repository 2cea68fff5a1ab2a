//! The pass controller: drives indexing, scan passes, the between-pass
//! decision and the delete sweep, looping until a fixpoint.
//!
//! A run may need several passes. A drawable can be referenced only by a
//! layout that is itself unreferenced; the first pass deletes the
//! layout, the second pass finds the drawable orphaned and deletes it.
//! The loop stops as soon as a pass finds nothing unused or a delete
//! step removes nothing.

use crate::catalog::{DeletedFileLog, ErasedEntries, ResourceCatalog, ResourceKind};
use crate::config::Config;
use crate::discovery::{FileFinder, FileType};
use crate::error::ResweepError;
use crate::index::{self, DeclarationIndexer};
use crate::refactor::{FileResourceEraser, XmlBlockEraser};
use crate::scan::ReferenceScanner;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Root descriptor file that must exist in the project root.
pub const MANIFEST_FILE: &str = "AndroidManifest.xml";

/// What the caller wants to do with the current pass's findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Print the unused entries and ask again.
    ShowUnused,
    /// Delete everything currently unused and continue with the next pass.
    Delete,
    /// Print every entry with its usage count and ask again.
    ShowAll,
    /// Stop the run immediately.
    Exit,
}

/// Aggregated outcome of a whole run.
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    /// Scan passes executed, including the final one that found nothing.
    pub passes: u32,
    pub total_removed: usize,
    pub removed_by_kind: BTreeMap<ResourceKind, usize>,
    /// Files physically deleted, in deletion order.
    pub deleted_files: Vec<PathBuf>,
    /// Entries still cataloged when the run ended.
    pub remaining_by_kind: BTreeMap<ResourceKind, usize>,
    /// True when the user chose Exit instead of running to the fixpoint.
    pub exited_early: bool,
}

/// Owns the catalog and the deleted-file log for one run.
pub struct PassController<'a> {
    config: &'a Config,
    project_root: PathBuf,
    search_root: PathBuf,
    extra_paths: Vec<PathBuf>,
    backup_root: PathBuf,
    show_progress: bool,
    catalog: ResourceCatalog,
    deleted: DeletedFileLog,
}

impl<'a> PassController<'a> {
    /// Set up a run. Fails when the project root does not contain the
    /// manifest file; nothing is indexed or scanned in that case.
    pub fn new(
        config: &'a Config,
        project_root: &Path,
        extra_paths: Vec<PathBuf>,
    ) -> Result<Self, ResweepError> {
        let project_root =
            std::fs::canonicalize(project_root).unwrap_or_else(|_| project_root.to_path_buf());
        if !project_root.join(MANIFEST_FILE).is_file() {
            return Err(ResweepError::ManifestMissing(project_root));
        }

        // Resources of sibling modules live next to the project root, so
        // both indexing and scanning start one level up.
        let search_root = project_root
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| project_root.clone());
        let backup_root = project_root.join(&config.backup_dir);

        Ok(Self {
            config,
            project_root,
            search_root,
            extra_paths,
            backup_root,
            show_progress: false,
            catalog: ResourceCatalog::new(),
            deleted: DeletedFileLog::new(),
        })
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    /// Build the catalog. Run once, before the first pass.
    pub fn index(&mut self) {
        info!("indexing resources under {}", self.search_root.display());
        DeclarationIndexer::new(self.config, &self.backup_root)
            .index(&self.search_root, &mut self.catalog);
    }

    /// Run scan passes until the fixpoint, asking `decide` between a
    /// pass and its delete step. `decide` receives the pass number and
    /// the catalog; ShowUnused/ShowAll loop back to another decision,
    /// Delete advances, Exit ends the run.
    pub fn run<F>(&mut self, mut decide: F) -> RunSummary
    where
        F: FnMut(u32, &ResourceCatalog) -> Decision,
    {
        let mut summary = RunSummary::default();
        let mut first_delete = true;

        loop {
            summary.passes += 1;
            info!("pass {}", summary.passes);

            let unused = self.scan_pass();
            if unused == 0 {
                break;
            }

            let removed = loop {
                match decide(summary.passes, &self.catalog) {
                    Decision::ShowUnused | Decision::ShowAll => continue,
                    Decision::Exit => break None,
                    Decision::Delete => break Some(self.delete_pass(first_delete)),
                }
            };

            let Some(removed_by_kind) = removed else {
                summary.exited_early = true;
                break;
            };
            first_delete = false;

            let removed_now: usize = removed_by_kind.values().sum();
            for (kind, n) in removed_by_kind {
                *summary.removed_by_kind.entry(kind).or_insert(0) += n;
            }
            summary.total_removed += removed_now;

            if removed_now == 0 {
                // Nothing changed on disk, so another scan cannot expose
                // anything new.
                break;
            }
        }

        for kind in ResourceKind::ALL {
            let remaining = self.catalog.len_of(kind);
            if remaining > 0 {
                summary.remaining_by_kind.insert(kind, remaining);
            }
        }
        summary.deleted_files = std::mem::take(&mut self.deleted).into_paths();
        summary
    }

    /// One full scan: the manifest, the whole search root, then every
    /// auxiliary path. Counters are zero-based at entry; the previous
    /// delete step reset them. Returns the number of unused entries.
    fn scan_pass(&mut self) -> usize {
        let finder = FileFinder::new(self.config, &self.backup_root);

        let mut targets = vec![(self.project_root.join(MANIFEST_FILE), FileType::Markup)];
        targets.extend(finder.scan_targets(&self.search_root));
        for extra in &self.extra_paths {
            targets.extend(finder.scan_targets(extra));
        }

        let progress = if self.show_progress {
            let bar = ProgressBar::new(targets.len() as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} scanning [{bar:40.cyan/blue}] {pos}/{len}")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            Some(bar)
        } else {
            None
        };

        for (path, file_type) in &targets {
            ReferenceScanner::scan_file(path, *file_type, &mut self.catalog);
            if let Some(bar) = &progress {
                bar.inc(1);
            }
        }
        if let Some(bar) = &progress {
            bar.finish_and_clear();
        }

        let unused = self.catalog.unused_count();
        info!("scanned {} files, {} unused resources", targets.len(), unused);
        unused
    }

    /// Erase everything currently unused, then sweep the catalog:
    /// erased entries are dropped, survivors are reset to zero. Returns
    /// the removed entry count per kind.
    fn delete_pass(&mut self, first_delete: bool) -> BTreeMap<ResourceKind, usize> {
        let file_eraser = FileResourceEraser::new(&self.backup_root, &self.search_root);
        if first_delete {
            if let Err(err) = file_eraser.wipe_backup() {
                warn!("could not wipe previous backup: {err}");
            }
        }

        let finder = FileFinder::new(self.config, &self.backup_root);
        let mut erased = ErasedEntries::new();

        for res_dir in finder.find_res_dirs(&self.search_root) {
            for file in finder.prefixed_files(&res_dir, "values") {
                if !index::is_markup_candidate(&file, self.config) {
                    continue;
                }
                match XmlBlockEraser::new(&self.catalog).erase_file(&file) {
                    Ok(dropped) => {
                        for (kind, name) in dropped {
                            erased.entry(kind).or_default().insert(name);
                        }
                    }
                    Err(err) => warn!("values file left untouched: {err}"),
                }
            }

            for (prefix, kind) in [
                ("drawable", ResourceKind::Drawable),
                ("mipmap", ResourceKind::Mipmap),
            ] {
                for file in finder.prefixed_files(&res_dir, prefix) {
                    if !index::is_drawable_candidate(&file, self.config) {
                        continue;
                    }
                    let Some(name) = index::file_resource_name(&file) else {
                        continue;
                    };
                    if !self.catalog.is_unused(kind, &name) {
                        continue;
                    }
                    match file_eraser.erase(&file, &mut self.deleted) {
                        Ok(()) => {
                            erased.entry(kind).or_default().insert(name);
                        }
                        Err(err) => warn!("{err}"),
                    }
                }
            }

            for file in finder.prefixed_files(&res_dir, "layout") {
                if !index::is_markup_candidate(&file, self.config) {
                    continue;
                }
                let Some(name) = index::file_resource_name(&file) else {
                    continue;
                };
                if !self.catalog.is_unused(ResourceKind::Layout, &name) {
                    continue;
                }
                match file_eraser.erase(&file, &mut self.deleted) {
                    Ok(()) => {
                        erased.entry(ResourceKind::Layout).or_default().insert(name);
                    }
                    Err(err) => warn!("{err}"),
                }
            }
        }

        let removed_by_kind = self.catalog.sweep(&erased);
        for (kind, n) in &removed_by_kind {
            info!("removed {n} {kind} resources");
        }
        removed_by_kind
    }
}
