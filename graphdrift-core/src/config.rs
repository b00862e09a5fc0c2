use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How vertex feature tokens are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum VertexTokens {
    /// Token is the vertex's own identifier.
    #[default]
    NodeId,
    /// Token is the position at which the vertex first appeared in the
    /// edge list. Order-dependent; kept for fingerprints compatible with
    /// enumeration-index tokenisation.
    InsertionIndex,
}

/// What the pipeline does with a snapshot whose edge list is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParseErrorPolicy {
    #[default]
    Abort,
    Skip,
}

/// Top-level graphdrift configuration, matching `graphdrift.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriftConfig {
    #[serde(default)]
    pub fingerprint: FingerprintSection,
    #[serde(default)]
    pub centrality: CentralitySection,
    #[serde(default)]
    pub threshold: ThresholdSection,
    #[serde(default)]
    pub detection: DetectionSection,
    #[serde(default)]
    pub dataset: DatasetSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerprintSection {
    pub bits: usize,
}

impl Default for FingerprintSection {
    fn default() -> Self {
        Self { bits: 128 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CentralitySection {
    /// `PageRank` damping factor.
    pub damping: f64,
    /// Max power iterations.
    pub max_iterations: u32,
    /// Per-node L1 convergence tolerance.
    pub tolerance: f64,
    #[serde(default)]
    pub vertex_tokens: VertexTokens,
}

impl Default for CentralitySection {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1e-6,
            vertex_tokens: VertexTokens::NodeId,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdSection {
    /// Number of moving ranges below the median for the lower bound.
    pub multiplier: f64,
}

impl Default for ThresholdSection {
    fn default() -> Self {
        Self { multiplier: 3.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionSection {
    /// Consecutive sub-threshold similarities needed to confirm an anomaly.
    pub window: usize,
}

impl Default for DetectionSection {
    fn default() -> Self {
        Self { window: 2 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSection {
    /// Glob matched against snapshot file names.
    pub pattern: String,
    #[serde(default)]
    pub on_parse_error: ParseErrorPolicy,
}

impl Default for DatasetSection {
    fn default() -> Self {
        Self {
            pattern: "*".into(),
            on_parse_error: ParseErrorPolicy::Abort,
        }
    }
}

impl DriftConfig {
    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }

    /// Parse and validate TOML config text.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render this config as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reject values the algorithms cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fingerprint.bits == 0 {
            return Err(ConfigError::Invalid(
                "fingerprint.bits must be greater than 0".into(),
            ));
        }
        let damping = self.centrality.damping;
        if !(damping > 0.0 && damping < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "centrality.damping must be in (0, 1), got {damping}"
            )));
        }
        if self.centrality.max_iterations == 0 {
            return Err(ConfigError::Invalid(
                "centrality.max_iterations must be greater than 0".into(),
            ));
        }
        if !(self.centrality.tolerance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "centrality.tolerance must be positive, got {}",
                self.centrality.tolerance
            )));
        }
        let multiplier = self.threshold.multiplier;
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "threshold.multiplier must be a non-negative number, got {multiplier}"
            )));
        }
        if self.detection.window == 0 {
            return Err(ConfigError::Invalid(
                "detection.window must be at least 1".into(),
            ));
        }
        if self.dataset.pattern.trim().is_empty() {
            return Err(ConfigError::Invalid("dataset.pattern is empty".into()));
        }
        Ok(())
    }
}
