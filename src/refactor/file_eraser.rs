//! Backup-then-delete removal of file-backed resources (drawables,
//! mipmaps, layouts).

use crate::catalog::DeletedFileLog;
use crate::error::ResweepError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Removes whole resource files, never without a backup.
///
/// Backups land under the backup root at the file's path relative to the
/// search root, so two `strings.xml` from different modules cannot
/// collide.
pub struct FileResourceEraser {
    backup_root: PathBuf,
    search_root: PathBuf,
}

impl FileResourceEraser {
    pub fn new(backup_root: &Path, search_root: &Path) -> Self {
        Self {
            backup_root: backup_root.to_path_buf(),
            search_root: search_root.to_path_buf(),
        }
    }

    /// Remove any backup tree left over from a previous run.
    pub fn wipe_backup(&self) -> std::io::Result<()> {
        if self.backup_root.exists() {
            info!("wiping previous backup at {}", self.backup_root.display());
            std::fs::remove_dir_all(&self.backup_root)?;
        }
        Ok(())
    }

    /// Copy `file` into the backup tree, then delete the original. The
    /// original is only deleted after the copy succeeded; every removed
    /// path is appended to the log.
    pub fn erase(&self, file: &Path, log: &mut DeletedFileLog) -> Result<(), ResweepError> {
        let relative = file.strip_prefix(&self.search_root).unwrap_or(file);
        let backup = self.backup_root.join(relative);

        if let Some(parent) = backup.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ResweepError::BackupFailed {
                file: file.to_path_buf(),
                backup: backup.clone(),
                source,
            })?;
        }

        std::fs::copy(file, &backup).map_err(|source| ResweepError::BackupFailed {
            file: file.to_path_buf(),
            backup: backup.clone(),
            source,
        })?;

        std::fs::remove_file(file).map_err(|source| ResweepError::DeleteFailed {
            file: file.to_path_buf(),
            source,
        })?;

        debug!("deleted {} (backup at {})", file.display(), backup.display());
        log.push(file);
        Ok(())
    }
}
