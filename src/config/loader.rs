use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a resweep run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Filenames that are never indexed for declarations and never have
    /// lines erased, matched exactly.
    pub exclude_files: Vec<String>,

    /// Directory names skipped while looking for resource trees.
    pub skip_dirs: Vec<String>,

    /// Name of the resource root directory.
    pub resource_dir: String,

    /// Backup directory, relative to the project root. Deleted files are
    /// copied here before removal.
    pub backup_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclude_files: vec!["analytics.xml".to_string()],
            skip_dirs: vec!["build".to_string()],
            resource_dir: "res".to_string(),
            backup_dir: ".resweep-backup".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML).
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                // Try YAML first, then TOML
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// Try to load configuration from default locations.
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        let default_names = [
            ".resweep.yml",
            ".resweep.yaml",
            ".resweep.toml",
            "resweep.yml",
            "resweep.yaml",
            "resweep.toml",
        ];

        for name in &default_names {
            let path = project_root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        // No config file found, use defaults
        Ok(Self::default())
    }

    /// Exact-name check against the exclusion list.
    pub fn is_excluded_file(&self, file_name: &str) -> bool {
        self.exclude_files.iter().any(|excluded| excluded == file_name)
    }

    /// Case-insensitive check against the skipped directory names.
    pub fn should_skip_dir(&self, dir_name: &str) -> bool {
        self.skip_dirs.iter().any(|skip| skip.eq_ignore_ascii_case(dir_name))
    }
}
