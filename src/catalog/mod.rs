//! Resource catalog: every indexed resource name per kind, with a
//! reference counter.
//!
//! The catalog is the single source of truth for "is this resource used".
//! It is populated once by the indexer, incremented during scan passes,
//! and swept after a delete step. Entries are kept in lexicographic order
//! per kind so reports are reproducible.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

/// Kind of Android resource tracked by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    String,
    Dimen,
    Color,
    StringArray,
    Style,
    Layout,
    Drawable,
    Mipmap,
}

impl ResourceKind {
    /// Every kind, in catalog order.
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::String,
        ResourceKind::Dimen,
        ResourceKind::Color,
        ResourceKind::StringArray,
        ResourceKind::Style,
        ResourceKind::Layout,
        ResourceKind::Drawable,
        ResourceKind::Mipmap,
    ];

    /// Kinds declared inside `res/values*` XML files, in the priority
    /// order used both when indexing declarations and when erasing them.
    pub const VALUE_KINDS: [ResourceKind; 5] = [
        ResourceKind::String,
        ResourceKind::Dimen,
        ResourceKind::Color,
        ResourceKind::StringArray,
        ResourceKind::Style,
    ];

    /// Priority order for reference scanning. A line is checked against
    /// each kind in this order and the scan stops at the first kind that
    /// matches.
    pub const SCAN_ORDER: [ResourceKind; 8] = [
        ResourceKind::String,
        ResourceKind::Dimen,
        ResourceKind::Color,
        ResourceKind::StringArray,
        ResourceKind::Drawable,
        ResourceKind::Mipmap,
        ResourceKind::Style,
        ResourceKind::Layout,
    ];

    /// Tag used when the resource is declared, e.g. `<string-array name="x">`.
    pub fn decl_tag(self) -> &'static str {
        match self {
            ResourceKind::String => "string",
            ResourceKind::Dimen => "dimen",
            ResourceKind::Color => "color",
            ResourceKind::StringArray => "string-array",
            ResourceKind::Style => "style",
            ResourceKind::Layout => "layout",
            ResourceKind::Drawable => "drawable",
            ResourceKind::Mipmap => "mipmap",
        }
    }

    /// Tag used when the resource is referenced. String arrays are
    /// declared as `string-array` but referenced as `R.array.x` / `@array/x`.
    pub fn ref_tag(self) -> &'static str {
        match self {
            ResourceKind::StringArray => "array",
            other => other.decl_tag(),
        }
    }

    /// Opening fragment of a declaration line, up to the name value.
    pub fn open_tag(self) -> String {
        format!("<{} name=\"", self.decl_tag())
    }

    /// Closing tag of a declaration block.
    pub fn close_tag(self) -> String {
        format!("</{}>", self.decl_tag())
    }

    /// Extract the declared name if `line` opens a declaration of this
    /// kind. Empty names are rejected.
    pub fn parse_declaration(self, line: &str) -> Option<&str> {
        let open = self.open_tag();
        let pos = line.find(&open)?;
        let rest = &line[pos + open.len()..];
        let end = rest.find('"')?;
        if end == 0 {
            return None;
        }
        Some(&rest[..end])
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.decl_tag())
    }
}

/// Names whose backing declarations or files were physically erased,
/// grouped by kind. Consumed by [`ResourceCatalog::sweep`].
pub type ErasedEntries = HashMap<ResourceKind, HashSet<String>>;

/// All indexed resources and their reference counts.
///
/// Owned by the pass controller for the duration of a run. Counts start
/// at zero when an entry is declared, grow during a scan pass, and are
/// reset to zero for survivors when the pass is swept.
#[derive(Debug, Default)]
pub struct ResourceCatalog {
    entries: BTreeMap<ResourceKind, BTreeMap<String, u32>>,
}

impl ResourceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declared resource with a zero count. Duplicate
    /// declarations collapse into one entry; the first occurrence wins.
    /// Returns `true` if the entry was newly inserted.
    pub fn declare(&mut self, kind: ResourceKind, name: &str) -> bool {
        let names = self.entries.entry(kind).or_default();
        if names.contains_key(name) {
            return false;
        }
        names.insert(name.to_string(), 0);
        true
    }

    pub fn contains(&self, kind: ResourceKind, name: &str) -> bool {
        self.entries
            .get(&kind)
            .map_or(false, |names| names.contains_key(name))
    }

    pub fn count(&self, kind: ResourceKind, name: &str) -> Option<u32> {
        self.entries.get(&kind).and_then(|names| names.get(name)).copied()
    }

    /// True when the entry exists and has not been referenced this pass.
    pub fn is_unused(&self, kind: ResourceKind, name: &str) -> bool {
        self.count(kind, name) == Some(0)
    }

    /// Bump the reference count of an existing entry. Unknown names are
    /// ignored.
    pub fn increment(&mut self, kind: ResourceKind, name: &str) {
        if let Some(count) = self.entries.get_mut(&kind).and_then(|m| m.get_mut(name)) {
            *count += 1;
        }
    }

    /// Entries of one kind in lexicographic order, counts mutable.
    pub fn entries_mut(
        &mut self,
        kind: ResourceKind,
    ) -> impl Iterator<Item = (&String, &mut u32)> {
        self.entries.get_mut(&kind).into_iter().flat_map(|m| m.iter_mut())
    }

    /// Entries of one kind in lexicographic order.
    pub fn iter(&self, kind: ResourceKind) -> impl Iterator<Item = (&str, u32)> {
        self.entries
            .get(&kind)
            .into_iter()
            .flat_map(|m| m.iter().map(|(name, count)| (name.as_str(), *count)))
    }

    pub fn len_of(&self, kind: ResourceKind) -> usize {
        self.entries.get(&kind).map_or(0, |m| m.len())
    }

    pub fn total_len(&self) -> usize {
        self.entries.values().map(|m| m.len()).sum()
    }

    pub fn unused_of(&self, kind: ResourceKind) -> usize {
        self.iter(kind).filter(|(_, count)| *count == 0).count()
    }

    /// Number of entries with a zero count across all kinds.
    pub fn unused_count(&self) -> usize {
        ResourceKind::ALL.iter().map(|&kind| self.unused_of(kind)).sum()
    }

    /// End-of-pass sweep: drop every zero-count entry whose backing
    /// artifact was erased, and reset every survivor's count to zero so
    /// the next pass starts clean. Returns how many entries were removed
    /// per kind.
    pub fn sweep(&mut self, erased: &ErasedEntries) -> BTreeMap<ResourceKind, usize> {
        let mut removed = BTreeMap::new();
        for (kind, names) in self.entries.iter_mut() {
            let set = erased.get(kind);
            let before = names.len();
            names.retain(|name, count| {
                if *count == 0 && set.map_or(false, |s| s.contains(name.as_str())) {
                    false
                } else {
                    *count = 0;
                    true
                }
            });
            let dropped = before - names.len();
            if dropped > 0 {
                removed.insert(*kind, dropped);
            }
        }
        removed
    }
}

/// Ordered record of every file physically deleted during a run.
#[derive(Debug, Default)]
pub struct DeletedFileLog {
    paths: Vec<PathBuf>,
}

impl DeletedFileLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: &Path) {
        self.paths.push(path.to_path_buf());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(|p| p.as_path())
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.paths
    }
}
