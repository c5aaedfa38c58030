//! Feature-hashing embedder.
//!
//! Maps unigrams and adjacent word pairs into fixed-dimension signed buckets
//! with FNV-1a, then L2-normalizes. Deterministic and dependency-free, so it
//! serves as the offline provider and as the test provider across the workspace.

use std::collections::HashMap;

use examforge_core::errors::{EmbeddingError, ForgeResult};
use examforge_core::traits::IEmbeddingProvider;

/// Hashing embedding provider.
pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn fnv1a(term: &str) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        h
    }

    /// Lowercase alphanumeric tokens. Single characters are kept so answer
    /// letters ("Correct: B") contribute to the vector.
    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_lowercase())
            .collect()
    }

    fn features(tokens: &[String]) -> HashMap<String, f32> {
        let mut tf: HashMap<String, f32> = HashMap::new();
        for tok in tokens {
            *tf.entry(tok.clone()).or_default() += 1.0;
        }
        for pair in tokens.windows(2) {
            *tf.entry(format!("{} {}", pair[0], pair[1])).or_default() += 0.5;
        }
        tf
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let tokens = Self::tokenize(text);
        let mut vec = vec![0.0f32; self.dimensions];
        if tokens.is_empty() {
            return vec;
        }

        let total = tokens.len() as f32;
        for (term, count) in Self::features(&tokens) {
            let h = Self::fnv1a(&term);
            let bucket = (h % self.dimensions as u64) as usize;
            // Top bit picks the sign so collisions tend to cancel.
            let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
            let idf = 1.0 + (term.len() as f32).ln();
            vec[bucket] += sign * (count / total) * idf;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl IEmbeddingProvider for HashingEmbedder {
    fn embed(&self, text: &str) -> ForgeResult<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput.into());
        }
        Ok(self.vectorize(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashing"
    }
}
