// Feature extraction: PageRank-weighted vertex and edge features.
#![allow(clippy::cast_precision_loss)]

use tracing::debug;

use crate::config::{CentralitySection, VertexTokens};
use crate::graph::SnapshotGraph;
use crate::types::{FeatureToken, WeightedFeatureSet};

use super::centrality::{CentralityConfig, compute_pagerank};

/// Builds the weighted feature set of a graph.
///
/// Vertex weight is the vertex's `PageRank`. Edge `(u, v)` weighs
/// `pagerank(u) / out_degree(u)`, the share of `u`'s rank it carries.
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    pub centrality: CentralityConfig,
    pub vertex_tokens: VertexTokens,
}

impl FeatureExtractor {
    pub fn new(centrality: CentralityConfig, vertex_tokens: VertexTokens) -> Self {
        Self {
            centrality,
            vertex_tokens,
        }
    }

    pub fn from_section(section: &CentralitySection) -> Self {
        Self::new(CentralityConfig::from(section), section.vertex_tokens)
    }

    /// Vertex entries come first, ordered by id (or by first appearance for
    /// [`VertexTokens::InsertionIndex`]), followed by edges ordered by
    /// `(source, target)` id.
    pub fn extract(&self, graph: &SnapshotGraph) -> WeightedFeatureSet {
        let pagerank = compute_pagerank(graph, &self.centrality);
        let scores = &pagerank.scores;
        let degrees = graph.out_degrees();

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            iterations = pagerank.iterations,
            "Extracting features"
        );

        let mut features = WeightedFeatureSet::new();

        match self.vertex_tokens {
            VertexTokens::NodeId => {
                let mut nodes: Vec<_> = graph.nodes().collect();
                nodes.sort_by_key(|&(_, id)| id);
                for (idx, id) in nodes {
                    features.push(FeatureToken::vertex(id), scores[idx.index()]);
                }
            }
            VertexTokens::InsertionIndex => {
                for (idx, _) in graph.nodes() {
                    features.push(FeatureToken::vertex(idx.index()), scores[idx.index()]);
                }
            }
        }

        let mut edges: Vec<_> = graph
            .edge_indices()
            .map(|(src, tgt)| (graph.node_id(src), graph.node_id(tgt), src.index()))
            .collect();
        edges.sort_unstable_by_key(|&(u, v, _)| (u, v));
        for (u, v, src) in edges {
            // A source always has out-degree >= 1
            let weight = scores[src] / degrees[src] as f64;
            features.push(FeatureToken::edge(u, v), weight);
        }

        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_entry_per_vertex_and_edge() {
        let graph = SnapshotGraph::parse("1 2\n1 3\n2 3\n3 1\n").unwrap();
        let features = FeatureExtractor::default().extract(&graph);
        assert_eq!(features.len(), graph.node_count() + graph.edge_count());

        let tokens: Vec<&str> = features.iter().map(|f| f.token.as_str()).collect();
        assert_eq!(tokens, vec!["1", "2", "3", "1 2", "1 3", "2 3", "3 1"]);
    }

    #[test]
    fn edge_weight_is_source_rank_over_out_degree() {
        let graph = SnapshotGraph::parse("1 2\n1 3\n2 3\n3 1\n").unwrap();
        let features = FeatureExtractor::default().extract(&graph);

        let rank_1 = features.weight_of("1").unwrap();
        let rank_2 = features.weight_of("2").unwrap();
        assert!((features.weight_of("1 2").unwrap() - rank_1 / 2.0).abs() < 1e-15);
        assert!((features.weight_of("1 3").unwrap() - rank_1 / 2.0).abs() < 1e-15);
        assert!((features.weight_of("2 3").unwrap() - rank_2).abs() < 1e-15);
    }

    #[test]
    fn vertex_weights_sum_to_one() {
        let graph = SnapshotGraph::parse("4 5\n5 6\n6 4\n6 7\n").unwrap();
        let features = FeatureExtractor::default().extract(&graph);
        let total: f64 = features
            .iter()
            .filter(|f| !f.token.as_str().contains(' '))
            .map(|f| f.weight)
            .sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn vertex_tokens_use_real_ids() {
        let graph = SnapshotGraph::parse("100 200\n").unwrap();
        let features = FeatureExtractor::default().extract(&graph);
        assert!(features.weight_of("100").is_some());
        assert!(features.weight_of("200").is_some());
        assert!(features.weight_of("0").is_none());
    }

    #[test]
    fn insertion_index_tokens_follow_first_appearance() {
        let graph = SnapshotGraph::parse("100 200\n300 100\n").unwrap();
        let extractor = FeatureExtractor::new(CentralityConfig::default(), VertexTokens::InsertionIndex);
        let features = extractor.extract(&graph);

        let by_id = FeatureExtractor::default().extract(&graph);
        assert_eq!(features.weight_of("0"), by_id.weight_of("100"));
        assert_eq!(features.weight_of("1"), by_id.weight_of("200"));
        assert_eq!(features.weight_of("2"), by_id.weight_of("300"));
        // Edge tokens always use real ids
        assert!(features.weight_of("300 100").is_some());
    }

    #[test]
    fn empty_graph_has_no_features() {
        let features = FeatureExtractor::default().extract(&SnapshotGraph::new());
        assert!(features.is_empty());
    }
}
