use std::fmt::Write as _;

use crate::error::RenderError;
use crate::pipeline::DetectionReport;

use super::traits::Renderer;

/// Plain-text anomaly report: the count, then one line per anomaly in rank
/// order as `rank: snapshot_index (label, distance)`.
#[derive(Debug, Default)]
pub struct TimeSeriesRenderer;

impl Renderer for TimeSeriesRenderer {
    fn name(&self) -> &'static str {
        "time-series"
    }

    fn file_suffix(&self) -> &'static str {
        "time_series.txt"
    }

    fn render(&self, report: &DetectionReport) -> Result<String, RenderError> {
        let mut out = String::new();
        let _ = writeln!(out, "Number of anomalies: {}", report.anomaly_count());
        for (rank, anomaly) in report.anomalies.iter().enumerate() {
            let label = report.label(anomaly.snapshot_index).unwrap_or("?");
            let _ = writeln!(
                out,
                "{}: {} ({label}, distance {:.4})",
                rank + 1,
                anomaly.snapshot_index,
                anomaly.distance
            );
        }
        for warning in &report.warnings {
            let _ = writeln!(out, "Warning: {warning}");
        }
        Ok(out)
    }
}
