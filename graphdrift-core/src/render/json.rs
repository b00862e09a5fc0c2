use crate::error::RenderError;
use crate::pipeline::DetectionReport;

use super::traits::Renderer;

/// The whole report as pretty-printed JSON.
#[derive(Debug, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn name(&self) -> &'static str {
        "json"
    }

    fn file_suffix(&self) -> &'static str {
        "report.json"
    }

    fn render(&self, report: &DetectionReport) -> Result<String, RenderError> {
        let mut json = serde_json::to_string_pretty(report)?;
        json.push('\n');
        Ok(json)
    }
}
