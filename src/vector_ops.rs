use crate::config::{Number, EPSILON};
use wide::f32x8;

/// Compute the euclidean distance between two vectors using SIMD operations.
/// Returns `None` when the vectors disagree in length.
pub fn euclidean_distance_simd(a: &[Number], b: &[Number]) -> Option<Number> {
    if a.len() != b.len() {
        log::debug!("vector length mismatch: {} vs {}", a.len(), b.len());
        return None;
    }

    let mut sum_sq = f32x8::splat(0.0);

    let len = a.len();
    let simd_len = len - (len % 8);

    // SIMD loop
    for i in (0..simd_len).step_by(8) {
        let va = f32x8::new([
            a[i],
            a[i + 1],
            a[i + 2],
            a[i + 3],
            a[i + 4],
            a[i + 5],
            a[i + 6],
            a[i + 7],
        ]);
        let vb = f32x8::new([
            b[i],
            b[i + 1],
            b[i + 2],
            b[i + 3],
            b[i + 4],
            b[i + 5],
            b[i + 6],
            b[i + 7],
        ]);
        let diff = va - vb;
        sum_sq += diff * diff;
    }

    let mut scalar_sum_sq = sum_sq.reduce_add();

    // Handle remaining elements
    for i in simd_len..len {
        let diff = a[i] - b[i];
        scalar_sum_sq += diff * diff;
    }

    Some(scalar_sum_sq.sqrt())
}

/// Compute the cosine distance (1 - cosine similarity) between two vectors
/// using SIMD operations. Returns `None` when the vectors disagree in length.
/// Near-zero vectors get the maximal distance 1.0 instead of a division error.
pub fn cosine_distance_simd(a: &[Number], b: &[Number]) -> Option<Number> {
    if a.len() != b.len() {
        log::debug!("vector length mismatch: {} vs {}", a.len(), b.len());
        return None;
    }

    let mut dot_product = f32x8::splat(0.0);
    let mut mag_a = f32x8::splat(0.0);
    let mut mag_b = f32x8::splat(0.0);

    let len = a.len();
    let simd_len = len - (len % 8);

    for i in (0..simd_len).step_by(8) {
        let va = f32x8::new([
            a[i],
            a[i + 1],
            a[i + 2],
            a[i + 3],
            a[i + 4],
            a[i + 5],
            a[i + 6],
            a[i + 7],
        ]);
        let vb = f32x8::new([
            b[i],
            b[i + 1],
            b[i + 2],
            b[i + 3],
            b[i + 4],
            b[i + 5],
            b[i + 6],
            b[i + 7],
        ]);
        dot_product += va * vb;
        mag_a += va * va;
        mag_b += vb * vb;
    }

    let mut scalar_dot_product = dot_product.reduce_add();
    let mut scalar_mag_a = mag_a.reduce_add();
    let mut scalar_mag_b = mag_b.reduce_add();

    for i in simd_len..len {
        scalar_dot_product += a[i] * b[i];
        scalar_mag_a += a[i] * a[i];
        scalar_mag_b += b[i] * b[i];
    }

    let denominator = (scalar_mag_a * scalar_mag_b).sqrt();
    if denominator < EPSILON {
        log::debug!("denominator too small: {}", denominator);
        Some(1.0)
    } else {
        let similarity = (scalar_dot_product / denominator).clamp(-1.0, 1.0);
        Some(1.0 - similarity)
    }
}

pub fn normalize_vector(vector: &mut [Number]) {
    let magnitude: Number = vector.iter().map(|&x| x * x).sum::<Number>().sqrt();
    if magnitude > EPSILON {
        for x in vector.iter_mut() {
            *x /= magnitude;
        }
    }
}

/// Rescale a vector into [0, 1] using the minimum and maximum observed in the
/// vector itself. Each query is scaled relative only to its own values, not to
/// any population statistics; changing this would change which neighbors the
/// model returns.
///
/// Uniform vectors (zero range, including all-zero) are left untouched and
/// `false` is returned, so a single rated skill never turns into a division
/// error.
pub fn min_max_scale(vector: &mut [Number]) -> bool {
    let Some(&first) = vector.first() else {
        return false;
    };
    let (min, max) = vector.iter().fold((first, first), |(lo, hi), &x| {
        (lo.min(x), hi.max(x))
    });
    let range = max - min;
    if range < EPSILON {
        log::debug!("uniform vector, skipping min-max scaling");
        return false;
    }
    for x in vector.iter_mut() {
        *x = (*x - min) / range;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euclidean_distance_known_values() {
        let a = vec![0.0; 9];
        let mut b = vec![0.0; 9];
        b[0] = 3.0;
        b[8] = 4.0;
        let d = euclidean_distance_simd(&a, &b).unwrap();
        assert!((d - 5.0).abs() < 1e-5);
    }

    #[test]
    fn euclidean_distance_identical_vectors_is_zero() {
        let a = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let d = euclidean_distance_simd(&a, &a).unwrap();
        assert!(d.abs() < 1e-6);
    }

    #[test]
    fn distance_rejects_length_mismatch() {
        let a = vec![1.0, 2.0];
        let b = vec![1.0, 2.0, 3.0];
        assert!(euclidean_distance_simd(&a, &b).is_none());
        assert!(cosine_distance_simd(&a, &b).is_none());
    }

    #[test]
    fn cosine_distance_of_parallel_vectors_is_zero() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![2.0, 4.0, 6.0];
        let d = cosine_distance_simd(&a, &b).unwrap();
        assert!(d.abs() < 1e-5);
    }

    #[test]
    fn cosine_distance_of_orthogonal_vectors_is_one() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        let d = cosine_distance_simd(&a, &b).unwrap();
        assert!((d - 1.0).abs() < 1e-5);
    }

    #[test]
    fn cosine_distance_of_zero_vector_falls_back() {
        let a = vec![0.0, 0.0, 0.0];
        let b = vec![1.0, 2.0, 3.0];
        assert_eq!(cosine_distance_simd(&a, &b), Some(1.0));
    }

    #[test]
    fn min_max_scale_spans_unit_interval() {
        let mut v = vec![5.0, 3.0, 0.0];
        assert!(min_max_scale(&mut v));
        assert_eq!(v, vec![1.0, 0.6, 0.0]);
    }

    #[test]
    fn min_max_scale_leaves_uniform_vector_alone() {
        let mut v = vec![2.0, 2.0, 2.0];
        assert!(!min_max_scale(&mut v));
        assert_eq!(v, vec![2.0, 2.0, 2.0]);

        let mut zeros = vec![0.0, 0.0];
        assert!(!min_max_scale(&mut zeros));
        assert_eq!(zeros, vec![0.0, 0.0]);
    }

    #[test]
    fn min_max_scale_single_nonzero_skill_is_well_defined() {
        let mut v = vec![0.0, 4.0, 0.0];
        assert!(min_max_scale(&mut v));
        assert_eq!(v, vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn min_max_scale_empty_vector_is_noop() {
        let mut v: Vec<Number> = Vec::new();
        assert!(!min_max_scale(&mut v));
    }

    #[test]
    fn normalize_vector_produces_unit_magnitude() {
        let mut v = vec![3.0, 4.0];
        normalize_vector(&mut v);
        let mag: Number = v.iter().map(|x| x * x).sum::<Number>().sqrt();
        assert!((mag - 1.0).abs() < 1e-5);
    }
}
