// Integration test utilities and snapshot dataset fixtures for graphdrift.

use std::path::{Path, PathBuf};

use graphdrift_core::config::DriftConfig;
use graphdrift_core::pipeline::{DetectionReport, DriftPipeline};
use graphdrift_core::progress::NoopReporter;

/// A small, strongly connected communication graph.
pub const BASE_GRAPH: &str = "1 2\n2 3\n3 4\n4 1\n1 3\n2 4\n";

/// A graph sharing no vertex or edge with [`BASE_GRAPH`].
pub const ALIEN_GRAPH: &str = "10 11\n11 12\n12 10\n13 10\n14 13\n15 14\n";

/// A temporary directory of `<n>_day.txt` edge-list snapshots.
#[derive(Debug)]
pub struct SnapshotDataset {
    pub dir: tempfile::TempDir,
    root: PathBuf,
}

impl SnapshotDataset {
    /// An empty dataset directory named `name` inside a fresh tempdir.
    pub fn named(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create tempdir");
        let root = dir.path().join(name);
        std::fs::create_dir_all(&root).unwrap();
        Self { dir, root }
    }

    /// Snapshots with the given edge lists, numbered from 0.
    pub fn from_snapshots(snapshots: &[&str]) -> Self {
        let dataset = Self::named("dataset");
        for (i, text) in snapshots.iter().enumerate() {
            dataset.write_snapshot(i, text);
        }
        dataset
    }

    /// `count` copies of [`BASE_GRAPH`] with [`ALIEN_GRAPH`] at `alien_at`.
    ///
    /// The alien snapshot produces two equal similarity dips while every
    /// other similarity is exactly 1.0, so it is the only anomaly.
    pub fn with_injected_anomaly(count: usize, alien_at: usize) -> Self {
        let snapshots: Vec<&str> = (0..count)
            .map(|i| if i == alien_at { ALIEN_GRAPH } else { BASE_GRAPH })
            .collect();
        Self::from_snapshots(&snapshots)
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Write (or overwrite) snapshot `index` as `<index>_day.txt`.
    pub fn write_snapshot(&self, index: usize, text: &str) -> PathBuf {
        self.write_file(&format!("{index}_day.txt"), text)
    }

    pub fn write_file(&self, name: &str, text: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, text).unwrap();
        path
    }
}

/// Run detection over a dataset directory with the given config.
pub fn run_detection(path: &Path, config: DriftConfig) -> DetectionReport {
    DriftPipeline::new(config)
        .expect("valid config")
        .run_dir(path, &NoopReporter)
        .expect("detection run")
}

/// Reverse the line order of an edge list.
pub fn reversed_edges(text: &str) -> String {
    let mut lines: Vec<&str> = text.lines().collect();
    lines.reverse();
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injected_dataset_layout() {
        let dataset = SnapshotDataset::with_injected_anomaly(5, 2);
        let alien = std::fs::read_to_string(dataset.path().join("2_day.txt")).unwrap();
        let base = std::fs::read_to_string(dataset.path().join("4_day.txt")).unwrap();
        assert_eq!(alien, ALIEN_GRAPH);
        assert_eq!(base, BASE_GRAPH);
        assert_eq!(std::fs::read_dir(dataset.path()).unwrap().count(), 5);
    }

    #[test]
    fn reversed_edges_keeps_every_line() {
        let reversed = reversed_edges("1 2\n3 4\n");
        assert_eq!(reversed, "3 4\n1 2\n");
    }
}
