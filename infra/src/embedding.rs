use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;

use recap_domain::{DomainError, EmbeddingPort};

const DEFAULT_DIMENSIONS: usize = 256;
/// Inputs beyond this length add nothing to a sentence-level vector.
const MAX_INPUT_CHARS: usize = 2_048;

/// Deterministic sentence embeddings from hashed word and character-trigram
/// features. Not a learned model, but stable across runs and platforms:
/// identical sentences land on identical vectors, and sentences sharing
/// vocabulary land close together, which is what centroid scoring needs.
pub struct HashedNgramEmbeddingAdapter {
    dimensions: usize,
}

impl HashedNgramEmbeddingAdapter {
    pub fn new() -> Self {
        Self {
            dimensions: DEFAULT_DIMENSIONS,
        }
    }

    pub fn with_dimensions(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn bucket(&self, feature: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        feature.hash(&mut hasher);
        (hasher.finish() % self.dimensions as u64) as usize
    }

    fn embed_text(&self, sentence: &str) -> Vec<f32> {
        let text: String = sentence
            .to_lowercase()
            .chars()
            .take(MAX_INPUT_CHARS)
            .collect();
        let mut vector = vec![0.0f32; self.dimensions];

        for word in text.split(|c: char| !c.is_alphanumeric()) {
            if word.is_empty() {
                continue;
            }
            vector[self.bucket(word)] += 1.0;
            let chars: Vec<char> = word.chars().collect();
            for trigram in chars.windows(3) {
                let feature: String = trigram.iter().collect();
                vector[self.bucket(&feature)] += 0.5;
            }
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }
}

impl Default for HashedNgramEmbeddingAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingPort for HashedNgramEmbeddingAdapter {
    async fn embed(&self, sentence: &str) -> Result<Vec<f32>, DomainError> {
        Ok(self.embed_text(sentence))
    }
}

#[cfg(test)]
mod tests {
    use recap_domain::cosine_similarity;

    use super::*;

    #[tokio::test]
    async fn embeddings_are_deterministic_and_fixed_length() {
        let adapter = HashedNgramEmbeddingAdapter::new();
        let a = adapter.embed("The quick brown fox.").await.unwrap();
        let b = adapter.embed("The quick brown fox.").await.unwrap();
        assert_eq!(a.len(), DEFAULT_DIMENSIONS);
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn shared_vocabulary_scores_higher_than_disjoint() {
        let adapter = HashedNgramEmbeddingAdapter::new();
        let base = adapter.embed("rust compiles fast programs").await.unwrap();
        let near = adapter.embed("rust programs compile quickly").await.unwrap();
        let far = adapter.embed("ocean waves at midnight").await.unwrap();
        assert!(cosine_similarity(&base, &near) > cosine_similarity(&base, &far));
    }

    #[tokio::test]
    async fn empty_input_yields_a_zero_vector() {
        let adapter = HashedNgramEmbeddingAdapter::with_dimensions(32);
        let vector = adapter.embed("   ").await.unwrap();
        assert_eq!(vector.len(), 32);
        assert!(vector.iter().all(|v| *v == 0.0));
    }
}
