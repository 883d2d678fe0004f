//! Vector similarity
//!
//! Detectors that compare per-iteration access vectors use the cosine
//! similarity of the two vectors as their correlation measure.

/// Correlation coefficient `(a · b) / (‖a‖ · ‖b‖)`
///
/// Returns 0.0 when either norm is zero. A shorter vector is treated as if
/// padded with zeros. For non-negative inputs (access counts) the result is
/// in `0.0..=1.0`.
pub fn correlation_coefficient(a: &[f64], b: &[f64]) -> f64 {
    let norm_product = norm(a) * norm(b);
    if norm_product == 0.0 {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    dot / norm_product
}

fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors() {
        let v = [1.0, 2.0, 3.0];
        assert!((correlation_coefficient(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_vector() {
        assert_eq!(correlation_coefficient(&[1.0, 2.0], &[0.0, 0.0]), 0.0);
        assert_eq!(correlation_coefficient(&[], &[]), 0.0);
    }

    #[test]
    fn test_orthogonal() {
        assert_eq!(correlation_coefficient(&[1.0, 0.0], &[0.0, 5.0]), 0.0);
    }

    #[test]
    fn test_scaled_vectors() {
        let c = correlation_coefficient(&[1.0, 2.0], &[10.0, 20.0]);
        assert!((c - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_components_are_not_clamped() {
        let c = correlation_coefficient(&[1.0, -2.0], &[-1.0, 2.0]);
        assert!((c + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_mismatched_lengths_pad_with_zero() {
        let short = correlation_coefficient(&[3.0, 4.0], &[3.0]);
        let padded = correlation_coefficient(&[3.0, 4.0], &[3.0, 0.0]);
        assert!((short - padded).abs() < 1e-12);
        assert!((short - 0.6).abs() < 1e-12);
    }
}
