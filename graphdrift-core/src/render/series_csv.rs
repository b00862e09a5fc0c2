use std::fmt::Write as _;

use crate::error::RenderError;
use crate::pipeline::DetectionReport;

use super::traits::Renderer;

/// Similarity series as CSV, one row per snapshot transition; the input a
/// plotting tool needs for a scatter plot with a threshold line.
#[derive(Debug, Default)]
pub struct SimilarityCsvRenderer;

impl Renderer for SimilarityCsvRenderer {
    fn name(&self) -> &'static str {
        "similarity-csv"
    }

    fn file_suffix(&self) -> &'static str {
        "similarity.csv"
    }

    fn render(&self, report: &DetectionReport) -> Result<String, RenderError> {
        let lower_bound = report.threshold.map(|t| t.lower_bound);
        let mut out = String::from("snapshot,label,similarity,below_threshold\n");
        for (i, sim) in report.similarities.iter().enumerate() {
            let snapshot = i + 1;
            let label = report.label(snapshot).unwrap_or_default();
            let below = lower_bound.is_some_and(|lb| *sim < lb);
            let _ = writeln!(out, "{snapshot},{},{sim},{below}", csv_field(label));
        }
        Ok(out)
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
