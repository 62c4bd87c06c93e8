//! Similarity computation for embeddings.

use crate::Embedding;
use crate::error::{EmbeddingError, Result};

/// Compute the cosine similarity between two embeddings.
///
/// Vectors need not be normalized. Returns a value between -1.0 and 1.0:
/// - 1.0 means identical direction
/// - 0.0 means orthogonal vectors (or a zero vector on either side)
/// - -1.0 means opposite vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot_product / (magnitude_a * magnitude_b))
}

/// Mean cosine similarity of every row against a single reference vector.
pub fn mean_similarity(rows: &[Embedding], reference: &[f32]) -> Result<f64> {
    if rows.is_empty() {
        return Err(EmbeddingError::EmptyBatch);
    }

    let mut total = 0.0f64;
    for row in rows {
        total += f64::from(cosine_similarity(row, reference)?);
    }

    Ok(total / rows.len() as f64)
}

/// Full cross similarity matrix: `matrix[i][j] = cos(rows_a[i], rows_b[j])`.
pub fn similarity_matrix(rows_a: &[Embedding], rows_b: &[Embedding]) -> Result<Vec<Vec<f32>>> {
    rows_a
        .iter()
        .map(|a| {
            rows_b
                .iter()
                .map(|b| cosine_similarity(a, b))
                .collect::<Result<Vec<f32>>>()
        })
        .collect()
}

/// Normalize an embedding to unit length.
pub fn normalize(embedding: &mut Embedding) {
    let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    if magnitude > 0.0 {
        for x in embedding.iter_mut() {
            *x /= magnitude;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        let sim = cosine_similarity(&a, &b).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_unnormalized() {
        let a = vec![3.0, 4.0];
        let b = vec![0.6, 0.8];
        let sim = cosine_similarity(&a, &b).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![-1.0, 0.0, 0.0];
        let sim = cosine_similarity(&a, &b).unwrap();
        assert!((sim - (-1.0)).abs() < 1e-6);
    }

    #[test]
    fn test_zero_vector() {
        let sim = cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).unwrap();
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!(cosine_similarity(&a, &b).is_err());
    }

    #[test]
    fn test_mean_similarity() {
        let rows = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let mean = mean_similarity(&rows, &[1.0, 0.0]).unwrap();
        assert!((mean - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_mean_similarity_empty() {
        assert!(matches!(
            mean_similarity(&[], &[1.0]),
            Err(EmbeddingError::EmptyBatch)
        ));
    }

    #[test]
    fn test_similarity_matrix_shape() {
        let a = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]];
        let b = vec![vec![1.0, 0.0], vec![0.0, 2.0]];
        let matrix = similarity_matrix(&a, &b).unwrap();

        assert_eq!(matrix.len(), 3);
        assert!(matrix.iter().all(|row| row.len() == 2));
        assert!((matrix[1][1] - 1.0).abs() < 1e-6);
        assert!(matrix[0][1].abs() < 1e-6);
    }

    #[test]
    fn test_normalize() {
        let mut v = vec![3.0, 4.0];
        normalize(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
    }
}
