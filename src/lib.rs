//! resweep - find and remove unused resources in Android projects
//!
//! Resources declared in `res/values*` files (strings, dimens, colors,
//! string-arrays, styles) and file-backed resources (drawables, mipmaps,
//! layouts) are indexed, then every source and markup file is scanned
//! line by line for textual references. Entries that no scan pass
//! touched are erased, and the whole cycle repeats: deleting an unused
//! layout can orphan the drawables only it referenced, so the run loops
//! until a pass removes nothing.
//!
//! # Architecture
//!
//! 1. **Discovery** - locate resource trees and scannable files
//! 2. **Indexing** - fill the catalog with every declared resource
//! 3. **Scanning** - count references with substring matching rules
//! 4. **Decision** - report unused entries, let the caller pick an action
//! 5. **Erasing** - strip declarations from values files, back up and
//!    delete whole resource files
//!
//! Matching is purely textual. There is no grammar-level parsing of
//! Kotlin, Java or XML; the handcrafted rules trade a small
//! false-positive/false-negative risk for simplicity and speed.

pub mod catalog;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod index;
pub mod refactor;
pub mod report;
pub mod scan;

pub use catalog::{DeletedFileLog, ResourceCatalog, ResourceKind};
pub use config::Config;
pub use discovery::{FileFinder, FileType};
pub use engine::{Decision, PassController, RunSummary};
pub use error::ResweepError;
pub use index::DeclarationIndexer;
pub use refactor::{FileResourceEraser, XmlBlockEraser};
pub use report::{JsonReporter, TerminalReporter};
pub use scan::ReferenceScanner;
