// Weighted SimHash over feature tokens.

use xxhash_rust::xxh3::xxh3_128_with_seed;

use crate::types::{WeightedFeature, WeightedFeatureSet};

use super::Fingerprint;

/// Compresses a weighted feature set into a `bits`-long fingerprint.
///
/// Each token is hashed to `bits` pseudo-random bits (xxh3-128, one block of
/// 128 per seed). For every bit position the token's weight is added when the
/// bit is set and subtracted otherwise; the fingerprint bit is 1 exactly when
/// the accumulator ends strictly positive.
#[derive(Debug, Clone, Copy)]
pub struct SimHasher {
    bits: usize,
}

impl Default for SimHasher {
    fn default() -> Self {
        Self { bits: 128 }
    }
}

impl SimHasher {
    pub fn new(bits: usize) -> Self {
        assert!(bits > 0, "fingerprint length must be positive");
        Self { bits }
    }

    pub fn bits(&self) -> usize {
        self.bits
    }

    pub fn hash(&self, features: &WeightedFeatureSet) -> Fingerprint {
        // Summing in token order keeps float rounding independent of input order
        let mut ordered: Vec<&WeightedFeature> = features.iter().collect();
        ordered.sort_unstable_by(|a, b| a.token.cmp(&b.token));

        let mut acc = vec![0.0_f64; self.bits];
        let blocks = self.bits.div_ceil(128);

        for feature in ordered {
            let bytes = feature.token.as_bytes();
            let weight = feature.weight;
            for block in 0..blocks {
                let digest = token_digest(bytes, block);
                let start = block * 128;
                let end = (start + 128).min(self.bits);
                for (offset, slot) in acc[start..end].iter_mut().enumerate() {
                    if (digest >> (127 - offset)) & 1 == 1 {
                        *slot += weight;
                    } else {
                        *slot -= weight;
                    }
                }
            }
        }

        let mut fp = Fingerprint::zeros(self.bits);
        for (i, value) in acc.iter().enumerate() {
            if *value > 0.0 {
                fp.set(i);
            }
        }
        fp
    }
}

/// 128 hash bits of `bytes` for the given block.
fn token_digest(bytes: &[u8], block: usize) -> u128 {
    xxh3_128_with_seed(bytes, block as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeatureToken;

    fn feature_set(entries: &[(&str, f64)]) -> WeightedFeatureSet {
        entries
            .iter()
            .map(|&(t, w)| (FeatureToken::from(t), w))
            .collect()
    }

    #[test]
    fn empty_set_is_all_zero() {
        let fp = SimHasher::default().hash(&WeightedFeatureSet::new());
        assert_eq!(fp.len(), 128);
        assert_eq!(fp.count_ones(), 0);
    }

    #[test]
    fn single_token_reproduces_its_digest() {
        let fp = SimHasher::default().hash(&feature_set(&[("42", 0.3)]));
        let digest = xxh3_128_with_seed(b"42", 0);
        for i in 0..128 {
            assert_eq!(fp.get(i), (digest >> (127 - i)) & 1 == 1, "bit {i}");
        }
    }

    #[test]
    fn zero_weight_yields_zero_bits() {
        let fp = SimHasher::default().hash(&feature_set(&[("1", 0.0), ("1 2", 0.0)]));
        assert_eq!(fp.count_ones(), 0, "exact-zero accumulators resolve to 0");
    }

    #[test]
    fn negative_weight_inverts_digest() {
        let positive = SimHasher::default().hash(&feature_set(&[("7", 1.0)]));
        let negative = SimHasher::default().hash(&feature_set(&[("7", -1.0)]));
        assert_eq!(positive.hamming_distance(&negative).unwrap(), 128);
    }

    #[test]
    fn heavier_token_dominates() {
        let heavy = feature_set(&[("a", 10.0), ("b", 0.01), ("c", 0.01)]);
        let fp = SimHasher::default().hash(&heavy);
        let alone = SimHasher::default().hash(&feature_set(&[("a", 1.0)]));
        assert_eq!(fp, alone);
    }

    #[test]
    fn configurable_lengths() {
        let set = feature_set(&[("1", 0.5), ("2", 0.5), ("1 2", 0.5)]);
        for bits in [1, 16, 64, 100, 128, 200, 256] {
            let fp = SimHasher::new(bits).hash(&set);
            assert_eq!(fp.len(), bits);
        }
        // The first 128 bits do not depend on the total length
        let short = SimHasher::new(128).hash(&set);
        let long = SimHasher::new(256).hash(&set);
        for i in 0..128 {
            assert_eq!(short.get(i), long.get(i));
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let set = feature_set(&[("1", 0.2), ("2", 0.8), ("1 2", 0.2)]);
        let hasher = SimHasher::default();
        assert_eq!(hasher.hash(&set), hasher.hash(&set));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_features() -> impl Strategy<Value = Vec<(String, f64)>> {
            prop::collection::btree_map("[0-9]{1,4}( [0-9]{1,4})?", 0.0f64..1.0, 0..40)
                .prop_map(|m| m.into_iter().collect())
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            #[test]
            fn order_does_not_matter(entries in arb_features(), seed in any::<u64>()) {
                let forward: WeightedFeatureSet = entries
                    .iter()
                    .map(|(t, w)| (FeatureToken::from(t.as_str()), *w))
                    .collect();

                // Deterministic shuffle by a seed-derived key
                let mut shuffled = entries.clone();
                shuffled.sort_by_key(|(t, _)| xxh3_128_with_seed(t.as_bytes(), seed));
                let shuffled: WeightedFeatureSet = shuffled
                    .iter()
                    .map(|(t, w)| (FeatureToken::from(t.as_str()), *w))
                    .collect();

                let hasher = SimHasher::default();
                prop_assert_eq!(hasher.hash(&forward), hasher.hash(&shuffled));
            }
        }
    }
}
