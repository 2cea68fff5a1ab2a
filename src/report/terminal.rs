use crate::catalog::{ResourceCatalog, ResourceKind};
use crate::engine::RunSummary;
use colored::Colorize;

/// Terminal reporter with colored output.
pub struct TerminalReporter;

impl TerminalReporter {
    pub fn new() -> Self {
        Self
    }

    /// Per-kind totals right after indexing.
    pub fn index_summary(&self, catalog: &ResourceCatalog) {
        for kind in ResourceKind::ALL {
            println!(
                "got {} {} resources",
                catalog.len_of(kind).to_string().cyan(),
                kind
            );
        }
    }

    pub fn pass_header(&self, pass: u32) {
        println!();
        println!("{}", format!("PASS {pass}").bold());
    }

    /// Per-kind unused counts for the pass that just finished.
    pub fn unused_summary(&self, catalog: &ResourceCatalog) {
        for kind in ResourceKind::ALL {
            let unused = catalog.unused_of(kind);
            if unused > 0 {
                println!(
                    "found {} unused {} resources",
                    unused.to_string().yellow(),
                    kind
                );
            }
        }
    }

    /// Every unused entry by name.
    pub fn unused_listing(&self, catalog: &ResourceCatalog) {
        for kind in ResourceKind::ALL {
            let unused: Vec<&str> = catalog
                .iter(kind)
                .filter(|(_, count)| *count == 0)
                .map(|(name, _)| name)
                .collect();
            if unused.is_empty() {
                continue;
            }
            println!();
            println!(
                "{}",
                format!("{} unused {} resources:", unused.len(), kind).yellow()
            );
            for name in unused {
                println!("  {name}");
            }
        }
    }

    /// Every entry with its usage count.
    pub fn all_listing(&self, catalog: &ResourceCatalog) {
        for kind in ResourceKind::ALL {
            if catalog.len_of(kind) == 0 {
                continue;
            }
            println!();
            println!(
                "{}",
                format!("showing {} {} resources:", catalog.len_of(kind), kind).cyan()
            );
            println!("{}", "<resource>, <# of references>".dimmed());
            for (name, count) in catalog.iter(kind) {
                println!("  {name}, {count}");
            }
        }
    }

    /// Final summary once the run reached its fixpoint or was exited.
    pub fn run_summary(&self, summary: &RunSummary) {
        println!();
        if summary.total_removed == 0 {
            println!("{}", "No unused resources removed.".green());
            return;
        }

        println!(
            "{}",
            format!(
                "DONE! Removed {} resources in {} passes",
                summary.total_removed, summary.passes
            )
            .green()
            .bold()
        );
        for (kind, count) in &summary.removed_by_kind {
            println!("-> {count} {kind} resources");
        }

        if !summary.deleted_files.is_empty() {
            println!();
            println!("{}", "-- FILES REMOVED --".bold());
            for path in &summary.deleted_files {
                println!("{}", path.display());
            }
        }
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}
