//! Threshold estimation and anomaly scanning over a similarity series.

pub mod anomaly;
pub mod threshold;

pub use anomaly::{AnomalyDetector, rank};
pub use threshold::{estimate_threshold, median, moving_range};
