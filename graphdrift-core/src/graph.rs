// Snapshot graphs: directed graphs over integer node ids, parsed from edge lists.

use std::collections::HashMap;
use std::io::BufRead;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::error::ParseError;

/// Integer vertex identifier as written in an edge list.
pub type NodeId = i64;

/// A directed graph for one snapshot, with `NodeId` ↔ `NodeIndex` mapping.
///
/// Node indices follow first appearance in the edge list. Edges are unique:
/// adding an existing edge leaves the graph unchanged.
#[derive(Debug, Clone, Default)]
pub struct SnapshotGraph {
    graph: DiGraph<NodeId, ()>,
    node_to_index: HashMap<NodeId, NodeIndex>,
}

impl SnapshotGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an edge list: one `u v` pair per line.
    ///
    /// Blank lines are ignored. Any other line must contain exactly two
    /// whitespace-separated integers.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut graph = Self::new();
        for (i, line) in text.lines().enumerate() {
            graph.add_line(i + 1, line)?;
        }
        Ok(graph)
    }

    /// Parse an edge list from a reader, line by line.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ParseError> {
        let mut graph = Self::new();
        for (i, line) in reader.lines().enumerate() {
            graph.add_line(i + 1, &line?)?;
        }
        Ok(graph)
    }

    fn add_line(&mut self, line_no: usize, line: &str) -> Result<(), ParseError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        let (source, target) = parse_edge(trimmed).ok_or_else(|| ParseError::MalformedLine {
            line: line_no,
            content: trimmed.to_string(),
        })?;
        self.add_edge(source, target);
        Ok(())
    }

    /// Add a directed edge `source → target`, creating missing vertices.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) {
        let src = self.ensure_node(source);
        let tgt = self.ensure_node(target);
        self.graph.update_edge(src, tgt, ());
    }

    fn ensure_node(&mut self, id: NodeId) -> NodeIndex {
        *self
            .node_to_index
            .entry(id)
            .or_insert_with(|| self.graph.add_node(id))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains_edge(&self, source: NodeId, target: NodeId) -> bool {
        match (self.node_to_index.get(&source), self.node_to_index.get(&target)) {
            (Some(&s), Some(&t)) => self.graph.contains_edge(s, t),
            _ => false,
        }
    }

    /// Vertex id stored at a node index.
    pub fn node_id(&self, index: NodeIndex) -> NodeId {
        self.graph[index]
    }

    pub fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.node_to_index.get(&id).copied()
    }

    /// Vertices in first-appearance order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, NodeId)> + '_ {
        self.graph.node_indices().map(|idx| (idx, self.graph[idx]))
    }

    /// Edges as `(source, target)` index pairs, in insertion order.
    pub fn edge_indices(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.graph.edge_references().map(|e| (e.source(), e.target()))
    }

    /// Edges as `(source, target)` id pairs, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.edge_indices()
            .map(|(s, t)| (self.graph[s], self.graph[t]))
    }

    /// Out-degree of every node, indexed by `NodeIndex::index()`.
    pub fn out_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0usize; self.graph.node_count()];
        for (src, _) in self.edge_indices() {
            degrees[src.index()] += 1;
        }
        degrees
    }

    pub fn inner(&self) -> &DiGraph<NodeId, ()> {
        &self.graph
    }
}

fn parse_edge(line: &str) -> Option<(NodeId, NodeId)> {
    let mut fields = line.split_whitespace();
    let source = fields.next()?.parse().ok()?;
    let target = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some((source, target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_edge_list() {
        let graph = SnapshotGraph::parse("1 2\n2 3\n3 1\n").unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.contains_edge(1, 2));
        assert!(graph.contains_edge(3, 1));
        assert!(!graph.contains_edge(2, 1), "edges are directed");
    }

    #[test]
    fn duplicate_edges_are_idempotent() {
        let graph = SnapshotGraph::parse("1 2\n1 2\n1 2\n").unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn accepts_tabs_and_extra_spaces() {
        let graph = SnapshotGraph::parse("  10\t20  \n-3    4\n").unwrap();
        assert!(graph.contains_edge(10, 20));
        assert!(graph.contains_edge(-3, 4));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let graph = SnapshotGraph::parse("\n1 2\n\n   \n2 3\n").unwrap();
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn empty_input_gives_empty_graph() {
        let graph = SnapshotGraph::parse("").unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn self_loops_are_kept() {
        let graph = SnapshotGraph::parse("5 5\n").unwrap();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.out_degrees(), vec![1]);
    }

    #[test]
    fn malformed_lines_report_line_number() {
        for bad in ["1\n", "1 2 3\n", "a b\n", "1 2.5\n"] {
            let text = format!("7 8\n{bad}");
            match SnapshotGraph::parse(&text) {
                Err(ParseError::MalformedLine { line, .. }) => assert_eq!(line, 2, "input {bad:?}"),
                other => panic!("expected MalformedLine for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn nodes_follow_first_appearance() {
        let graph = SnapshotGraph::parse("9 4\n4 7\n1 9\n").unwrap();
        let ids: Vec<NodeId> = graph.nodes().map(|(_, id)| id).collect();
        assert_eq!(ids, vec![9, 4, 7, 1]);
    }

    #[test]
    fn out_degrees_count_unique_edges() {
        let graph = SnapshotGraph::parse("1 2\n1 3\n1 2\n3 1\n").unwrap();
        let degrees = graph.out_degrees();
        assert_eq!(degrees[graph.index_of(1).unwrap().index()], 2);
        assert_eq!(degrees[graph.index_of(2).unwrap().index()], 0);
        assert_eq!(degrees[graph.index_of(3).unwrap().index()], 1);
    }

    #[test]
    fn reader_matches_str_parse() {
        let text = "1 2\n2 3\n";
        let from_reader = SnapshotGraph::from_reader(std::io::Cursor::new(text)).unwrap();
        let from_str = SnapshotGraph::parse(text).unwrap();
        assert_eq!(
            from_reader.edges().collect::<Vec<_>>(),
            from_str.edges().collect::<Vec<_>>()
        );
    }
}
