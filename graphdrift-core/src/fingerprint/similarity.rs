#![allow(clippy::cast_precision_loss, clippy::cast_lossless)]

use crate::error::FingerprintError;

use super::Fingerprint;

/// `1 - hamming(a, b) / len`, in `[0, 1]`; 1 means identical.
pub fn similarity(a: &Fingerprint, b: &Fingerprint) -> Result<f64, FingerprintError> {
    let distance = a.hamming_distance(b)?;
    if a.is_empty() {
        return Ok(1.0);
    }
    Ok(1.0 - distance as f64 / a.len() as f64)
}

/// Similarity of each temporally adjacent pair; `len - 1` values.
pub fn similarity_series(fingerprints: &[Fingerprint]) -> Result<Vec<f64>, FingerprintError> {
    fingerprints
        .windows(2)
        .map(|pair| similarity(&pair[0], &pair[1]))
        .collect()
}
