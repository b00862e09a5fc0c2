use std::path::PathBuf;

/// Top-level graphdrift error type.
///
/// All fallible operations in `graphdrift-core` return [`Result<T, DriftError>`](Result).
/// Each variant wraps a concern-specific error enum, so callers can match on
/// the failing stage without losing the underlying detail.
#[derive(thiserror::Error, Debug)]
pub enum DriftError {
    /// An edge list could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// A snapshot in a sequence failed; carries the snapshot label.
    #[error("Snapshot {label}: {source}")]
    Snapshot {
        /// Label (usually the file name) of the failing snapshot.
        label: String,
        /// The parse failure for that snapshot.
        #[source]
        source: ParseError,
    },

    /// Fingerprints could not be compared.
    #[error("Fingerprint error: {0}")]
    Fingerprint(#[from] FingerprintError),

    /// Error during centrality, threshold or anomaly analysis.
    #[error("Analysis error: {0}")]
    Analyze(#[from] AnalyzeError),

    /// Error locating or ordering snapshot files.
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Error during report rendering.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Error in configuration parsing or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors from reading a textual edge list.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    /// A non-blank line did not hold exactly two whitespace-separated integers.
    #[error("line {line}: expected two integers, found {content:?}")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// The offending line, trimmed.
        content: String,
    },

    /// Reading the edge list failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors comparing fingerprints.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FingerprintError {
    /// Two fingerprints of different lengths were compared.
    #[error("fingerprint lengths differ: {left} vs {right} bits")]
    DimensionMismatch { left: usize, right: usize },
}

/// Errors during the analysis stages.
#[derive(thiserror::Error, Debug)]
pub enum AnalyzeError {
    /// Not enough data to compute a statistic.
    #[error("Insufficient data for analysis: {0}")]
    InsufficientData(String),
}

/// Errors listing a snapshot dataset.
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// The dataset directory does not exist.
    #[error("Dataset not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The dataset path exists but is not a directory.
    #[error("Dataset is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A snapshot file name carries no numeric ordering prefix.
    #[error("Cannot order snapshot file {0:?}: name has no numeric prefix")]
    Unordered(String),

    /// The file-name filter is not a valid glob.
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Filesystem I/O error while listing.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors during report rendering.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// Report serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem I/O error writing rendered output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors in graphdrift configuration parsing and validation.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The configuration file does not exist at the expected path.
    #[error("Config file not found: {0}")]
    NotFound(String),

    /// Configuration values are present but semantically invalid.
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// Configuration file syntax could not be parsed (TOML error).
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Convenience alias for `Result<T, DriftError>`.
pub type Result<T> = std::result::Result<T, DriftError>;
