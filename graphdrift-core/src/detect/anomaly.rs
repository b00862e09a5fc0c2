use crate::types::{Anomaly, Threshold};

/// Scans a similarity series for sustained dips below a lower bound.
#[derive(Debug, Clone, Copy)]
pub struct AnomalyDetector {
    /// Consecutive sub-threshold similarities needed to confirm a dip.
    pub window: usize,
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self { window: 2 }
    }
}

impl AnomalyDetector {
    pub fn new(window: usize) -> Self {
        assert!(window > 0, "anomaly window must be at least 1");
        Self { window }
    }

    /// Anomalies in series order.
    ///
    /// Position `i` fires when `series[i..i + window]` are all strictly below
    /// `lower_bound`. A dip at similarity `i` means the transition into
    /// snapshot `i + 1` broke, so that is the index reported.
    pub fn scan(&self, series: &[f64], lower_bound: f64, median: f64) -> Vec<Anomaly> {
        if series.len() < self.window {
            return vec![];
        }
        series
            .windows(self.window)
            .enumerate()
            .filter(|(_, w)| w.iter().all(|&s| s < lower_bound))
            .map(|(i, w)| Anomaly {
                snapshot_index: i + 1,
                distance: (w[0] - median).abs(),
            })
            .collect()
    }

    /// Anomalies ranked by descending distance from the median.
    pub fn detect(&self, series: &[f64], threshold: &Threshold) -> Vec<Anomaly> {
        let mut anomalies = self.scan(series, threshold.lower_bound, threshold.median);
        rank(&mut anomalies);
        anomalies
    }
}

/// Stable sort by descending distance; ties keep series order.
pub fn rank(anomalies: &mut [Anomaly]) {
    anomalies.sort_by(|a, b| b.distance.total_cmp(&a.distance));
}
