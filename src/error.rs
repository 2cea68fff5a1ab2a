use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can stop a run or a single deletion.
///
/// Only [`ResweepError::ManifestMissing`] is fatal; the backup and
/// deletion variants are surfaced per file and the run continues.
#[derive(Debug, Error, Diagnostic)]
pub enum ResweepError {
    #[error("AndroidManifest.xml not found in {}", .0.display())]
    #[diagnostic(
        code(resweep::manifest_missing),
        help("point resweep at a module source root, e.g. ~/project/app/src/main")
    )]
    ManifestMissing(PathBuf),

    #[error("failed to back up {} to {}: {source}", .file.display(), .backup.display())]
    #[diagnostic(code(resweep::backup_failed))]
    BackupFailed {
        file: PathBuf,
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to delete {}: {source}", .file.display())]
    #[diagnostic(code(resweep::delete_failed))]
    DeleteFailed {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
