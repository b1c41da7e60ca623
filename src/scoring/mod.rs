//! # Similarity Scoring Module
//!
//! Compares an observed fragment intensity vector against a reference one,
//! typically summed XIC intensities against library intensities.
//!
//! Both scores lie in `[0, 1]`, are 1.0 for a vector compared to itself,
//! and are 0.0 when either vector is empty or entirely zero. When the inputs
//! differ in length only the common prefix is compared.


use std::f64::consts::FRAC_2_PI;

/// A pure similarity function over two intensity vectors.
pub trait Scorer: Send + Sync {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Similarity of `a` and `b` in `[0, 1]`.
    fn score(&self, a: &[f32], b: &[f32]) -> f32;
}

/// Cosine similarity of the L2-normalized vectors.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedDotProductScorer;

impl Scorer for NormalizedDotProductScorer {
    fn name(&self) -> &'static str {
        "NormalizedDotProduct"
    }

    fn score(&self, a: &[f32], b: &[f32]) -> f32 {
        normalized_dot_product(a, b)
    }
}

/// Spectral contrast angle, `1 - (2/pi) * acos(cos)`.
///
/// Spreads high-similarity matches further apart than raw cosine does.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpectralAngleScorer;

impl Scorer for SpectralAngleScorer {
    fn name(&self) -> &'static str {
        "SpectralAngle"
    }

    fn score(&self, a: &[f32], b: &[f32]) -> f32 {
        spectral_angle(a, b)
    }
}

/// Cosine similarity clamped to `[0, 1]`; 0.0 for empty or all-zero input.
pub fn normalized_dot_product(a: &[f32], b: &[f32]) -> f32 {
    cosine(a, b).map_or(0.0, |cos| cos as f32)
}

/// Spectral angle score; 0.0 for empty or all-zero input.
pub fn spectral_angle(a: &[f32], b: &[f32]) -> f32 {
    cosine(a, b).map_or(0.0, |cos| (1.0 - FRAC_2_PI * cos.acos()) as f32)
}

/// Clamped cosine accumulated in `f64`, `None` when a norm is zero.
fn cosine(a: &[f32], b: &[f32]) -> Option<f64> {
    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (x as f64, y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a <= 0.0 || norm_b <= 0.0 {
        return None;
    }
    Some((dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0))
}
