// Robust control limit: median minus a multiple of the mean moving range.
//
// Statistical computations intentionally cast int→float.
#![allow(clippy::cast_precision_loss)]

use crate::error::AnalyzeError;
use crate::types::Threshold;

/// Median of a non-empty slice; the two middle values are averaged for even
/// lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Mean of `|s[i] - s[i-1]|`; `None` for fewer than two values.
pub fn moving_range(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let total: f64 = values.windows(2).map(|w| (w[1] - w[0]).abs()).sum();
    Some(total / (values.len() - 1) as f64)
}

/// Estimate `(median, median - multiplier * mr)` from a similarity series.
///
/// A single value gives a degenerate threshold whose bound equals the
/// median, which disables detection. An empty series is an error.
pub fn estimate_threshold(series: &[f64], multiplier: f64) -> Result<Threshold, AnalyzeError> {
    let median = median(series).ok_or_else(|| {
        AnalyzeError::InsufficientData("cannot estimate a threshold from an empty series".into())
    })?;

    let Some(moving_range) = moving_range(series) else {
        return Ok(Threshold {
            median,
            lower_bound: median,
            moving_range: 0.0,
        });
    };

    Ok(Threshold {
        median,
        lower_bound: median - multiplier * moving_range,
        moving_range,
    })
}
