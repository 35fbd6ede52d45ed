//! Vector similarity kernel.
//!
//! Pure numeric functions over embedding slices. Both inputs to the binary
//! functions must have the same length; zero-norm inputs are rejected by
//! `cosine_similarity` rather than producing a non-finite score.

use crate::error::{EmbeddingError, Result};

/// Compute the dot product of two embeddings.
///
/// Errors with [`EmbeddingError::DimensionMismatch`] when the vectors have
/// different lengths.
pub fn dot_product(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum())
}

/// Compute the Euclidean norm of an embedding.
pub fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Compute the cosine similarity between two embeddings.
///
/// Returns a value between -1.0 and 1.0, where:
/// - 1.0 means identical direction
/// - 0.0 means orthogonal vectors
/// - -1.0 means opposite direction
///
/// The result is not clamped. A zero-norm input (including the empty
/// vector) errors with [`EmbeddingError::ZeroNorm`].
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    let dot = dot_product(a, b)?;
    let norm_a = norm(a);
    let norm_b = norm(b);

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(EmbeddingError::ZeroNorm);
    }

    Ok(dot / (norm_a * norm_b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dot_product() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![4.0, 5.0, 6.0];
        assert_eq!(dot_product(&a, &b).unwrap(), 32.0);
    }

    #[test]
    fn test_norm() {
        assert_eq!(norm(&[3.0, 4.0]), 5.0);
        assert_eq!(norm(&[]), 0.0);
    }

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![0.3, 0.5, 0.2];
        let sim = cosine_similarity(&a, &a).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        let sim = cosine_similarity(&a, &b).unwrap();
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let a = vec![0.3, 0.5, 0.2];
        let b: Vec<f32> = a.iter().map(|x| -x).collect();
        let sim = cosine_similarity(&a, &b).unwrap();
        assert!((sim + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_symmetric() {
        let a = vec![0.1, 0.7, 0.3];
        let b = vec![0.9, 0.2, 0.4];
        let ab = cosine_similarity(&a, &b).unwrap();
        let ba = cosine_similarity(&b, &a).unwrap();
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!(matches!(
            cosine_similarity(&a, &b),
            Err(EmbeddingError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
        assert!(dot_product(&a, &b).is_err());
    }

    #[test]
    fn test_zero_norm_rejected() {
        let a = vec![0.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!(matches!(
            cosine_similarity(&a, &b),
            Err(EmbeddingError::ZeroNorm)
        ));
        assert!(matches!(
            cosine_similarity(&b, &a),
            Err(EmbeddingError::ZeroNorm)
        ));
    }

    #[test]
    fn test_empty_vectors_rejected() {
        let empty: Vec<f32> = Vec::new();
        assert!(matches!(
            cosine_similarity(&empty, &empty),
            Err(EmbeddingError::ZeroNorm)
        ));
    }
}
