use crate::engine::RunSummary;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

/// JSON reporter for programmatic output.
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, summary: &RunSummary) -> Result<()> {
        let json = serde_json::to_string_pretty(summary).into_diagnostic()?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        } else {
            println!("{json}");
        }

        Ok(())
    }
}
