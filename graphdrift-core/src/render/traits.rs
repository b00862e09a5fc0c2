use std::path::{Path, PathBuf};

use crate::error::RenderError;
use crate::pipeline::DetectionReport;

/// Common interface for report artifact generators.
pub trait Renderer: Send + Sync {
    /// Human-readable name for this renderer.
    fn name(&self) -> &'static str;

    /// Output file name, appended to the dataset prefix.
    fn file_suffix(&self) -> &'static str;

    /// Generate the artifact content.
    fn render(&self, report: &DetectionReport) -> Result<String, RenderError>;

    /// Write `<dir>/<prefix>_<suffix>`, creating `dir` if needed.
    fn write(
        &self,
        report: &DetectionReport,
        dir: &Path,
        prefix: &str,
    ) -> Result<PathBuf, RenderError> {
        let content = self.render(report)?;
        std::fs::create_dir_all(dir)?;
        let output = dir.join(format!("{prefix}_{}", self.file_suffix()));
        std::fs::write(&output, content)?;
        Ok(output)
    }
}
