// Pipeline orchestrator: fingerprint every snapshot in parallel, then score,
// threshold and scan the similarity series sequentially.

use std::path::Path;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analyze::FeatureExtractor;
use crate::config::{DriftConfig, ParseErrorPolicy};
use crate::dataset::{SnapshotFile, list_snapshots};
use crate::detect::{AnomalyDetector, estimate_threshold};
use crate::error::{DriftError, ParseError, Result};
use crate::fingerprint::{Fingerprint, SimHasher, similarity_series};
use crate::graph::SnapshotGraph;
use crate::progress::{NoopReporter, ProgressReporter};
use crate::types::{Anomaly, Threshold};

/// One snapshot to fingerprint.
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub label: String,
    pub source: SnapshotSource<'a>,
}

/// Where a snapshot's edge list comes from.
#[derive(Debug, Clone)]
pub enum SnapshotSource<'a> {
    Text(&'a str),
    File(&'a Path),
}

impl<'a> Snapshot<'a> {
    pub fn text(label: impl Into<String>, text: &'a str) -> Self {
        Self {
            label: label.into(),
            source: SnapshotSource::Text(text),
        }
    }

    pub fn file(file: &'a SnapshotFile) -> Self {
        Self {
            label: file.label.clone(),
            source: SnapshotSource::File(&file.path),
        }
    }

    fn load(&self) -> std::result::Result<SnapshotGraph, ParseError> {
        match self.source {
            SnapshotSource::Text(text) => SnapshotGraph::parse(text),
            SnapshotSource::File(path) => {
                let file = std::fs::File::open(path)?;
                SnapshotGraph::from_reader(std::io::BufReader::new(file))
            }
        }
    }
}

/// A snapshot dropped under [`ParseErrorPolicy::Skip`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedSnapshot {
    pub label: String,
    pub reason: String,
}

/// Everything a run produced, in a form presentation code can consume
/// without re-deriving any statistic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionReport {
    /// Labels of the fingerprinted snapshots, in input order.
    pub snapshots: Vec<String>,
    /// Hex fingerprints, one per snapshot.
    pub fingerprints: Vec<String>,
    /// `similarities[i]` compares snapshots `i` and `i + 1`.
    pub similarities: Vec<f64>,
    pub threshold: Option<Threshold>,
    /// Ranked by descending distance from the median.
    pub anomalies: Vec<Anomaly>,
    pub skipped: Vec<SkippedSnapshot>,
    pub warnings: Vec<String>,
    #[serde(skip)]
    pub duration: Duration,
}

impl DetectionReport {
    pub fn anomaly_count(&self) -> usize {
        self.anomalies.len()
    }

    /// Whether the series was long enough for the threshold to mean anything.
    pub fn is_meaningful(&self) -> bool {
        self.similarities.len() >= 2
    }

    pub fn label(&self, snapshot_index: usize) -> Option<&str> {
        self.snapshots.get(snapshot_index).map(String::as_str)
    }
}

/// Per-snapshot stage: parse, extract features, fingerprint.
#[derive(Debug, Clone)]
pub struct Fingerprinter {
    extractor: FeatureExtractor,
    hasher: SimHasher,
}

impl Fingerprinter {
    pub fn new(config: &DriftConfig) -> Self {
        Self {
            extractor: FeatureExtractor::from_section(&config.centrality),
            hasher: SimHasher::new(config.fingerprint.bits),
        }
    }

    pub fn fingerprint_graph(&self, graph: &SnapshotGraph) -> Fingerprint {
        let features = self.extractor.extract(graph);
        self.hasher.hash(&features)
    }

    pub fn fingerprint_text(&self, text: &str) -> std::result::Result<Fingerprint, ParseError> {
        let graph = SnapshotGraph::parse(text)?;
        Ok(self.fingerprint_graph(&graph))
    }
}

/// Runs detection over an ordered snapshot sequence.
#[derive(Debug, Clone)]
pub struct DriftPipeline {
    config: DriftConfig,
}

impl DriftPipeline {
    pub fn new(config: DriftConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    /// Detect over every matching file in a dataset directory.
    pub fn run_dir(&self, dir: &Path, progress: &dyn ProgressReporter) -> Result<DetectionReport> {
        let files = list_snapshots(dir, &self.config.dataset.pattern)?;
        info!(dir = %dir.display(), snapshots = files.len(), "Loaded dataset");
        let snapshots: Vec<Snapshot<'_>> = files.iter().map(Snapshot::file).collect();
        self.run_with_progress(&snapshots, progress)
    }

    pub fn run(&self, snapshots: &[Snapshot<'_>]) -> Result<DetectionReport> {
        self.run_with_progress(snapshots, &NoopReporter)
    }

    pub fn run_with_progress(
        &self,
        snapshots: &[Snapshot<'_>],
        progress: &dyn ProgressReporter,
    ) -> Result<DetectionReport> {
        let start = Instant::now();
        let fingerprinter = Fingerprinter::new(&self.config);

        // ── Per-snapshot stage (parallel, order-preserving) ─────────
        progress.start("Fingerprinting", Some(snapshots.len() as u64));
        let outcomes: Vec<std::result::Result<Fingerprint, ParseError>> = snapshots
            .par_iter()
            .map(|snapshot| {
                let outcome = snapshot.load().map(|graph| {
                    debug!(
                        label = %snapshot.label,
                        nodes = graph.node_count(),
                        edges = graph.edge_count(),
                        "Parsed snapshot"
                    );
                    fingerprinter.fingerprint_graph(&graph)
                });
                progress.advance(1);
                outcome
            })
            .collect();
        progress.finish();

        let mut labels = Vec::with_capacity(snapshots.len());
        let mut fingerprints = Vec::with_capacity(snapshots.len());
        let mut skipped = Vec::new();
        let mut warnings = Vec::new();

        for (snapshot, outcome) in snapshots.iter().zip(outcomes) {
            match outcome {
                Ok(fp) => {
                    labels.push(snapshot.label.clone());
                    fingerprints.push(fp);
                }
                Err(source) => match self.config.dataset.on_parse_error {
                    ParseErrorPolicy::Abort => {
                        return Err(DriftError::Snapshot {
                            label: snapshot.label.clone(),
                            source,
                        });
                    }
                    ParseErrorPolicy::Skip => {
                        warn!(label = %snapshot.label, error = %source, "Skipping snapshot");
                        progress.message(&format!("skipped {}: {source}", snapshot.label));
                        skipped.push(SkippedSnapshot {
                            label: snapshot.label.clone(),
                            reason: source.to_string(),
                        });
                    }
                },
            }
        }

        // ── Sequential stages ───────────────────────────────────────
        let similarities = similarity_series(&fingerprints)?;

        let threshold = if similarities.is_empty() {
            let msg = format!(
                "{} snapshot(s) fingerprinted; at least 2 are needed for a similarity series",
                fingerprints.len()
            );
            warn!("{msg}");
            warnings.push(msg);
            None
        } else {
            if similarities.len() < 2 {
                let msg = "similarity series has a single value; threshold is degenerate and \
                           no anomaly can be detected"
                    .to_string();
                warn!("{msg}");
                warnings.push(msg);
            }
            Some(estimate_threshold(&similarities, self.config.threshold.multiplier)?)
        };

        let anomalies = threshold.as_ref().map_or_else(Vec::new, |t| {
            AnomalyDetector::new(self.config.detection.window).detect(&similarities, t)
        });

        let duration = start.elapsed();
        info!(
            snapshots = fingerprints.len(),
            skipped = skipped.len(),
            anomalies = anomalies.len(),
            median = threshold.map(|t| t.median),
            lower_bound = threshold.map(|t| t.lower_bound),
            duration = ?duration,
            "Detection complete"
        );

        Ok(DetectionReport {
            snapshots: labels,
            fingerprints: fingerprints.iter().map(Fingerprint::to_hex).collect(),
            similarities,
            threshold,
            anomalies,
            skipped,
            warnings,
            duration,
        })
    }
}
