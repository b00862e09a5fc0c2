use std::fmt;

use serde::{Deserialize, Serialize};

// ── Feature tokens ─────────────────────────────────────────────────

/// Textual key of one structural feature: `"<id>"` for a vertex,
/// `"<u> <v>"` for a directed edge. Its UTF-8 bytes are the hash input,
/// so the format must never change.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureToken(String);

impl FeatureToken {
    pub fn vertex(id: impl fmt::Display) -> Self {
        Self(id.to_string())
    }

    pub fn edge(source: impl fmt::Display, target: impl fmt::Display) -> Self {
        Self(format!("{source} {target}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for FeatureToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FeatureToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A feature token with its weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedFeature {
    pub token: FeatureToken,
    pub weight: f64,
}

/// Weighted features of one graph: every vertex, then every edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightedFeatureSet {
    features: Vec<WeightedFeature>,
}

impl WeightedFeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: FeatureToken, weight: f64) {
        self.features.push(WeightedFeature { token, weight });
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeightedFeature> {
        self.features.iter()
    }

    pub fn weight_of(&self, token: &str) -> Option<f64> {
        self.features
            .iter()
            .find(|f| f.token.as_str() == token)
            .map(|f| f.weight)
    }
}

impl FromIterator<(FeatureToken, f64)> for WeightedFeatureSet {
    fn from_iter<I: IntoIterator<Item = (FeatureToken, f64)>>(iter: I) -> Self {
        Self {
            features: iter
                .into_iter()
                .map(|(token, weight)| WeightedFeature { token, weight })
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a WeightedFeatureSet {
    type Item = &'a WeightedFeature;
    type IntoIter = std::slice::Iter<'a, WeightedFeature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

// ── Detection results ──────────────────────────────────────────────

/// Baseline and lower anomaly bound estimated from a similarity series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub median: f64,
    pub lower_bound: f64,
    /// Mean absolute difference between consecutive similarities.
    pub moving_range: f64,
}

/// One detected anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    /// Index into the snapshot sequence (not the similarity series).
    pub snapshot_index: usize,
    /// `|similarity - median|` at the start of the dip.
    pub distance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_text_is_stable() {
        assert_eq!(FeatureToken::vertex(42).as_str(), "42");
        assert_eq!(FeatureToken::vertex(-7).as_str(), "-7");
        assert_eq!(FeatureToken::edge(1, 2).as_str(), "1 2");
        assert_eq!(FeatureToken::edge(1, 2).to_string(), "1 2");
    }

    #[test]
    fn vertex_and_edge_tokens_never_collide() {
        let vertex = FeatureToken::vertex(12);
        let edge = FeatureToken::edge(1, 2);
        assert_ne!(vertex, edge);
    }

    #[test]
    fn feature_set_collects_in_order() {
        let set: WeightedFeatureSet = [
            (FeatureToken::vertex(1), 0.5),
            (FeatureToken::edge(1, 2), 0.25),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
        let tokens: Vec<&str> = set.iter().map(|f| f.token.as_str()).collect();
        assert_eq!(tokens, vec!["1", "1 2"]);
        assert_eq!(set.weight_of("1 2"), Some(0.25));
        assert_eq!(set.weight_of("2"), None);
    }
}
