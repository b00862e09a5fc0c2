// Centrality analysis: PageRank over snapshot graphs.
//
// Node counts are cast to f64 throughout.
#![allow(clippy::cast_precision_loss)]

use tracing::warn;

use crate::config::CentralitySection;
use crate::graph::SnapshotGraph;

// ── Configuration ──────────────────────────────────────────────────

/// Configuration for `PageRank`.
#[derive(Debug, Clone)]
pub struct CentralityConfig {
    /// `PageRank` damping factor.
    pub damping: f64,
    /// Max iterations for the power method.
    pub max_iterations: u32,
    /// Per-node tolerance; iteration stops once the L1 change is below `n * tolerance`.
    pub tolerance: f64,
}

impl Default for CentralityConfig {
    fn default() -> Self {
        Self::from(&CentralitySection::default())
    }
}

impl From<&CentralitySection> for CentralityConfig {
    fn from(section: &CentralitySection) -> Self {
        Self {
            damping: section.damping,
            max_iterations: section.max_iterations,
            tolerance: section.tolerance,
        }
    }
}

// ── PageRank ───────────────────────────────────────────────────────

/// `PageRank` scores for one graph.
#[derive(Debug, Clone)]
pub struct PageRank {
    /// Score per node, indexed by `NodeIndex::index()`. Sums to 1.
    pub scores: Vec<f64>,
    pub iterations: u32,
    pub converged: bool,
}

/// Compute `PageRank` by power iteration.
///
/// Dangling nodes spread their rank uniformly over all nodes, so sinks never
/// divide by zero. The iteration runs over nodes sorted by id with incoming
/// edges sorted by source id, which makes the floating-point result depend
/// only on the edge set, not on the order edges were read in.
pub fn compute_pagerank(graph: &SnapshotGraph, config: &CentralityConfig) -> PageRank {
    let n = graph.node_count();
    if n == 0 {
        return PageRank {
            scores: vec![],
            iterations: 0,
            converged: true,
        };
    }

    // Canonical position of each node index
    let mut order: Vec<usize> = (0..n).collect();
    let ids: Vec<i64> = graph.nodes().map(|(_, id)| id).collect();
    order.sort_by_key(|&i| ids[i]);
    let mut position = vec![0usize; n];
    for (pos, &idx) in order.iter().enumerate() {
        position[idx] = pos;
    }

    let degrees = graph.out_degrees();
    let out_degree: Vec<f64> = order.iter().map(|&idx| degrees[idx] as f64).collect();

    let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (src, tgt) in graph.edge_indices() {
        incoming[position[tgt.index()]].push(position[src.index()]);
    }
    for sources in &mut incoming {
        sources.sort_unstable();
    }

    let n_f = n as f64;
    let damping = config.damping;
    let teleport = (1.0 - damping) / n_f;
    let mut rank = vec![1.0 / n_f; n];
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iterations {
        iterations += 1;

        let dangling: f64 = (0..n)
            .filter(|&v| out_degree[v] == 0.0)
            .map(|v| rank[v])
            .sum();
        let base = teleport + damping * dangling / n_f;

        let next: Vec<f64> = incoming
            .iter()
            .map(|sources| {
                let flow: f64 = sources.iter().map(|&u| rank[u] / out_degree[u]).sum();
                base + damping * flow
            })
            .collect();

        let delta: f64 = next.iter().zip(&rank).map(|(a, b)| (a - b).abs()).sum();
        rank = next;
        if delta < n_f * config.tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(
            nodes = n,
            iterations, "PageRank did not converge, using last iterate"
        );
    }

    // Renormalize against accumulated rounding
    let total: f64 = rank.iter().sum();
    if total > 0.0 {
        for r in &mut rank {
            *r /= total;
        }
    }

    let mut scores = vec![0.0; n];
    for (pos, &idx) in order.iter().enumerate() {
        scores[idx] = rank[pos];
    }

    PageRank {
        scores,
        iterations,
        converged,
    }
}
