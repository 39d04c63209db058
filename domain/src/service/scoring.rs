/// Cosine similarity `dot(a,b) / (|a|*|b|)`, accumulated in f64. Defined as
/// 0.0 when either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0f64;
    let mut norm_a = 0f64;
    let mut norm_b = 0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        dot += f64::from(x) * f64::from(y);
        norm_a += f64::from(x) * f64::from(x);
        norm_b += f64::from(y) * f64::from(y);
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Arithmetic mean of the embeddings, the document centroid. Empty input
/// yields an empty vector.
pub fn mean_embedding(embeddings: &[Vec<f32>]) -> Vec<f32> {
    let Some(first) = embeddings.first() else {
        return Vec::new();
    };

    let mut centroid = vec![0f32; first.len()];
    for embedding in embeddings {
        for (slot, &value) in centroid.iter_mut().zip(embedding.iter()) {
            *slot += value;
        }
    }
    let count = embeddings.len() as f32;
    for slot in &mut centroid {
        *slot /= count;
    }

    centroid
}

/// One importance score per sentence embedding: its cosine similarity to
/// the document centroid.
pub fn score_against_centroid(embeddings: &[Vec<f32>]) -> Vec<f64> {
    let centroid = mean_embedding(embeddings);
    embeddings
        .iter()
        .map(|embedding| cosine_similarity(embedding, &centroid))
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn self_similarity_is_one() {
        let v = vec![0.3f32, -1.2, 4.5, 0.01];
        let s = cosine_similarity(&v, &v);
        assert!((s - 1.0).abs() < 1e-6, "got {s}");
    }

    #[test]
    fn zero_vector_similarity_is_zero() {
        let v = vec![1.0f32, 2.0, 3.0];
        let zero = vec![0.0f32; 3];
        assert_eq!(cosine_similarity(&v, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn opposite_vectors_score_negative_one() {
        let a = vec![1.0f32, 0.0];
        let b = vec![-1.0f32, 0.0];
        assert_relative_eq!(cosine_similarity(&a, &b), -1.0, epsilon = 1e-9);
    }

    #[test]
    fn centroid_is_the_arithmetic_mean() {
        let embeddings = vec![vec![1.0f32, 0.0], vec![3.0f32, 2.0]];
        assert_eq!(mean_embedding(&embeddings), vec![2.0f32, 1.0]);
        assert!(mean_embedding(&[]).is_empty());
    }

    #[test]
    fn centroid_aligned_sentence_scores_highest() {
        let embeddings = vec![
            vec![1.0f32, 1.0],
            vec![1.0f32, 1.1],
            vec![-1.0f32, 0.2],
        ];
        let scores = score_against_centroid(&embeddings);
        assert!(scores[0] > scores[2]);
        assert!(scores[1] > scores[2]);
    }
}
