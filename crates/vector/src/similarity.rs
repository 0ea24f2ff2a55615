//! Vector math for stored embeddings

use ndarray::ArrayView1;
use serde_json::Value;

/// Why a candidate vector cannot be scored
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VectorError {
    #[error("malformed vector: {0}")]
    Malformed(String),

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("zero-norm vector")]
    ZeroNorm,
}

/// Cosine similarity `dot(a,b) / (|a| * |b|)`, clamped to [-1, 1]
///
/// Undefined (and reported as an error) when lengths differ or either
/// vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, VectorError> {
    if a.len() != b.len() {
        return Err(VectorError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let a = ArrayView1::from(a);
    let b = ArrayView1::from(b);

    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(VectorError::ZeroNorm);
    }

    Ok((a.dot(&b) / (norm_a * norm_b)).clamp(-1.0, 1.0))
}

/// Parse a stored vector
///
/// Accepts a JSON array of numbers or a string holding one (the pgvector
/// text form, `"[0.1,0.2,0.3]"`). Every component must be finite.
pub fn parse_vector(value: &Value) -> Result<Vec<f32>, VectorError> {
    let components: Vec<f64> = match value {
        Value::Array(items) => items
            .iter()
            .map(|v| {
                v.as_f64()
                    .ok_or_else(|| VectorError::Malformed(format!("non-numeric component {}", v)))
            })
            .collect::<Result<_, _>>()?,
        Value::String(text) => serde_json::from_str(text.trim())
            .map_err(|e| VectorError::Malformed(format!("unparseable vector text: {}", e)))?,
        other => {
            return Err(VectorError::Malformed(format!(
                "expected array or string, got {}",
                json_kind(other)
            )))
        }
    };

    if components.is_empty() {
        return Err(VectorError::Malformed("empty vector".to_string()));
    }

    components
        .into_iter()
        .map(|c| {
            let c = c as f32;
            if c.is_finite() {
                Ok(c)
            } else {
                Err(VectorError::Malformed("non-finite component".to_string()))
            }
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cosine_similarity_identical() {
        let v = [0.3, -1.2, 4.0, 0.5];
        let sim = cosine_similarity(&v, &v).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let sim = cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]).unwrap();
        assert!((sim + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_ignores_magnitude() {
        let sim = cosine_similarity(&[1.0, 1.0], &[10.0, 10.0]).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_dimension_mismatch() {
        assert_eq!(
            cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]),
            Err(VectorError::DimensionMismatch { expected: 2, actual: 3 })
        );
    }

    #[test]
    fn test_zero_norm() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), Err(VectorError::ZeroNorm));
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 0.0]), Err(VectorError::ZeroNorm));
    }

    #[test]
    fn test_parse_vector_array() {
        assert_eq!(parse_vector(&json!([0.5, -1, 2.25])).unwrap(), vec![0.5, -1.0, 2.25]);
    }

    #[test]
    fn test_parse_vector_text() {
        assert_eq!(parse_vector(&json!(" [0.1, 0.2] ")).unwrap(), vec![0.1, 0.2]);
    }

    #[test]
    fn test_parse_vector_rejects_garbage() {
        assert!(matches!(parse_vector(&json!(null)), Err(VectorError::Malformed(_))));
        assert!(matches!(parse_vector(&json!([])), Err(VectorError::Malformed(_))));
        assert!(matches!(parse_vector(&json!([1.0, "x"])), Err(VectorError::Malformed(_))));
        assert!(matches!(parse_vector(&json!("not a vector")), Err(VectorError::Malformed(_))));
        assert!(matches!(parse_vector(&json!({"v": [1.0]})), Err(VectorError::Malformed(_))));
    }

    #[test]
    fn test_parse_vector_rejects_overflow() {
        // 1e300 fits f64 but not f32
        assert!(matches!(parse_vector(&json!([1e300])), Err(VectorError::Malformed(_))));
    }
}
