//! graphdrift core library: structural fingerprints and anomaly detection
//! over time-ordered graph snapshots.
//!
//! The main entry point is [`pipeline::DriftPipeline`], which runs
//! parse → features → fingerprint per snapshot (in parallel), then scores
//! adjacent fingerprints, estimates a robust threshold and ranks anomalies.

pub mod analyze;
pub mod config;
pub mod dataset;
pub mod detect;
pub mod error;
pub mod fingerprint;
pub mod graph;
pub mod pipeline;
pub mod progress;
pub mod render;
pub mod types;
