//! Fixed-length binary fingerprints and their comparison.
//!
//! [`SimHasher`] compresses a weighted feature set into a [`Fingerprint`];
//! [`similarity`] compares two fingerprints by Hamming distance.

pub mod simhash;
pub mod similarity;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FingerprintError;

pub use simhash::SimHasher;
pub use similarity::{similarity, similarity_series};

/// A fixed-length bit vector. Bit 0 is the most significant bit of the
/// first word, so the hex form reads in bit order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFingerprint")]
pub struct Fingerprint {
    words: Vec<u64>,
    bits: usize,
}

#[derive(Deserialize)]
struct RawFingerprint {
    words: Vec<u64>,
    bits: usize,
}

impl TryFrom<RawFingerprint> for Fingerprint {
    type Error = String;

    fn try_from(raw: RawFingerprint) -> Result<Self, Self::Error> {
        let expected = raw.bits.div_ceil(64);
        if raw.words.len() != expected {
            return Err(format!(
                "{}-bit fingerprint needs {expected} words, found {}",
                raw.bits,
                raw.words.len()
            ));
        }
        let tail = raw.bits % 64;
        if tail != 0 && raw.words.last().is_some_and(|w| w & (u64::MAX >> tail) != 0) {
            return Err(format!("bits set past position {}", raw.bits));
        }
        Ok(Self {
            words: raw.words,
            bits: raw.bits,
        })
    }
}

impl Fingerprint {
    /// All-zero fingerprint of `bits` length.
    pub fn zeros(bits: usize) -> Self {
        Self {
            words: vec![0; bits.div_ceil(64)],
            bits,
        }
    }

    /// Build from a bit sequence, index 0 first.
    pub fn from_bits<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut fp = Self::zeros(0);
        for bit in iter {
            if fp.bits % 64 == 0 {
                fp.words.push(0);
            }
            fp.bits += 1;
            if bit {
                fp.set(fp.bits - 1);
            }
        }
        fp
    }

    pub fn len(&self) -> usize {
        self.bits
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn get(&self, i: usize) -> bool {
        assert!(i < self.bits, "bit {i} out of range for {}-bit fingerprint", self.bits);
        (self.words[i / 64] >> (63 - i % 64)) & 1 == 1
    }

    pub(crate) fn set(&mut self, i: usize) {
        self.words[i / 64] |= 1 << (63 - i % 64);
    }

    pub fn count_ones(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    /// Number of differing bit positions.
    pub fn hamming_distance(&self, other: &Self) -> Result<u32, FingerprintError> {
        if self.bits != other.bits {
            return Err(FingerprintError::DimensionMismatch {
                left: self.bits,
                right: other.bits,
            });
        }
        Ok(self
            .words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a ^ b).count_ones())
            .sum())
    }

    /// `'0'`/`'1'` string, bit 0 first.
    pub fn to_bit_string(&self) -> String {
        (0..self.bits)
            .map(|i| if self.get(i) { '1' } else { '0' })
            .collect()
    }

    /// Lowercase hex, bit 0 first; a trailing partial nibble is zero-padded.
    pub fn to_hex(&self) -> String {
        let nibbles = self.bits.div_ceil(4);
        (0..nibbles)
            .map(|n| {
                let word = self.words[n / 16];
                let nibble = (word >> (60 - (n % 16) * 4)) & 0xf;
                char::from_digit(u32::try_from(nibble).unwrap_or(0), 16).unwrap_or('0')
            })
            .collect()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_checks_word_count() {
        let fp = Fingerprint::from_bits([true, false, true]);
        let json = serde_json::to_string(&fp).unwrap();
        let back: Fingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fp);

        let short = r#"{"words":[0],"bits":128}"#;
        assert!(serde_json::from_str::<Fingerprint>(short).is_err());
        let long = r#"{"words":[0,0,0],"bits":64}"#;
        assert!(serde_json::from_str::<Fingerprint>(long).is_err());
    }

    #[test]
    fn deserialize_rejects_bits_past_length() {
        // Bit 4 of a 4-bit fingerprint
        let stray = format!(r#"{{"words":[{}],"bits":4}}"#, 1_u64 << 59);
        assert!(serde_json::from_str::<Fingerprint>(&stray).is_err());
    }

    #[test]
    fn from_bits_preserves_order() {
        let fp = Fingerprint::from_bits([true, false, true, true]);
        assert_eq!(fp.len(), 4);
        assert_eq!(fp.to_bit_string(), "1011");
        assert_eq!(fp.to_hex(), "b");
        assert_eq!(fp.count_ones(), 3);
    }

    #[test]
    fn hex_spans_words() {
        let mut fp = Fingerprint::zeros(128);
        fp.set(0);
        fp.set(127);
        let hex = fp.to_hex();
        assert_eq!(hex.len(), 32);
        assert!(hex.starts_with('8'));
        assert!(hex.ends_with('1'));
    }

    #[test]
    fn hamming_counts_differences() {
        let a = Fingerprint::from_bits([true, true, false, false, true]);
        let b = Fingerprint::from_bits([true, false, false, true, true]);
        assert_eq!(a.hamming_distance(&b).unwrap(), 2);
        assert_eq!(a.hamming_distance(&a).unwrap(), 0);
    }

    #[test]
    fn hamming_rejects_mismatched_lengths() {
        let a = Fingerprint::zeros(64);
        let b = Fingerprint::zeros(128);
        assert_eq!(
            a.hamming_distance(&b),
            Err(FingerprintError::DimensionMismatch { left: 64, right: 128 })
        );
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn get_out_of_range_panics() {
        Fingerprint::zeros(8).get(8);
    }
}
