//! Background/foreground classification.
//!
//! Three classifiers share the same output shape (one entry per pixel):
//! - [`heuristic_background`] - direct per-pixel test on the RGBA buffer
//! - [`adaptive_threshold`] - Bradley-style local mean threshold
//! - [`soft_background`] - sigmoid probability from local mean and deviation
//!
//! The two local classifiers are gated by the gradient field: strong edges are
//! pushed toward foreground so tonal thresholds don't erase fine detail.

use super::grayscale::CHANNELS;
use super::integral::{IntegralPair, IntegralTable};

/// Gradient level above which pixels are gated toward foreground.
pub const EDGE_GATE_THRESHOLD: f32 = 0.25;

/// Maximum multiplicative suppression of the soft background probability.
pub const SOFT_EDGE_SUPPRESSION: f32 = 0.75;

/// Bradley threshold fraction `t`.
pub const BRADLEY_T: f32 = 0.15;

/// Default local window radius (window side is `2 * radius + 1`).
pub const WINDOW_RADIUS: usize = 7;

/// Deviation multiplier `k` in the soft classifier.
pub const SOFT_K: f32 = 0.5;

/// Lower bound of the sigmoid temperature `β`.
pub const BETA_FLOOR: f32 = 5.0;

/// Pixels with alpha below this are background for the heuristic classifier.
pub const HEURISTIC_ALPHA_CUTOFF: u8 = 16;

/// Pixels with every RGB channel at or above this are background for the
/// heuristic classifier.
pub const HEURISTIC_WHITE_CUTOFF: u8 = 240;

/// Tunables for the local classifiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentParams {
    pub radius: usize,
    pub t: f32,
    pub k: f32,
    pub gate_threshold: f32,
}

impl Default for SegmentParams {
    fn default() -> Self {
        Self {
            radius: WINDOW_RADIUS,
            t: BRADLEY_T,
            k: SOFT_K,
            gate_threshold: EDGE_GATE_THRESHOLD,
        }
    }
}

/// Linear ramp from 0 at `threshold` to 1 at gradient 1.0.
#[inline]
pub fn edge_gate(gradient: f32, threshold: f32) -> f32 {
    if gradient <= threshold {
        return 0.0;
    }
    let span = (1.0 - threshold).max(f32::EPSILON);
    ((gradient - threshold) / span).clamp(0.0, 1.0)
}

#[inline]
fn sigmoid(z: f32) -> f32 {
    1.0 / (1.0 + (-z).exp())
}

/// Classify pixels straight from the RGBA buffer.
///
/// A pixel is background when it is nearly transparent or near-white.
/// Runs on the post-inversion buffer, so an inverted dark backdrop counts.
pub fn heuristic_background(pixels: &[u8]) -> Vec<bool> {
    pixels
        .chunks_exact(CHANNELS)
        .map(|px| {
            px[3] < HEURISTIC_ALPHA_CUTOFF
                || (px[0] >= HEURISTIC_WHITE_CUTOFF
                    && px[1] >= HEURISTIC_WHITE_CUTOFF
                    && px[2] >= HEURISTIC_WHITE_CUTOFF)
        })
        .collect()
}

/// Hard adaptive threshold.
///
/// A pixel is background when `value >= local_mean * (1 - t)`, unless its
/// gradient exceeds the gate threshold, in which case it is foreground.
///
/// # Arguments
/// * `field` - Luminance samples
/// * `gradient` - Normalized gradient field of the same size
/// * `width`, `height` - Image dimensions
/// * `params` - Window radius, `t`, and gate threshold
pub fn adaptive_threshold(
    field: &[f32],
    gradient: &[f32],
    width: usize,
    height: usize,
    params: &SegmentParams,
) -> Vec<bool> {
    let table = IntegralTable::build(field, width, height);
    let mut mask = vec![false; width * height];

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            if gradient[idx] > params.gate_threshold {
                continue;
            }
            let mean = table.range_mean(x, y, params.radius) as f32;
            mask[idx] = field[idx] >= mean * (1.0 - params.t);
        }
    }

    mask
}

/// Soft background probability.
///
/// `z = (value - (mean - k*std)) / β` with `β = max(5, 0.5*std + 5)`, then
/// `p = sigmoid(z)`. Near strong gradients `p` is scaled by
/// `1 - 0.75 * gate`.
pub fn soft_background(
    field: &[f32],
    gradient: &[f32],
    width: usize,
    height: usize,
    params: &SegmentParams,
) -> Vec<f32> {
    let tables = IntegralPair::build(field, width, height);
    let mut prob = vec![0.0f32; width * height];

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let (mean, std) = tables.range_stats(x, y, params.radius);
            let (mean, std) = (mean as f32, std as f32);

            let beta = (0.5 * std + BETA_FLOOR).max(BETA_FLOOR);
            let z = (field[idx] - (mean - params.k * std)) / beta;
            let mut p = sigmoid(z);

            let gate = edge_gate(gradient[idx], params.gate_threshold);
            p *= 1.0 - SOFT_EDGE_SUPPRESSION * gate;

            prob[idx] = p;
        }
    }

    prob
}

/// Threshold a probability field at 0.5 into a background mask.
pub fn probability_mask(prob: &[f32]) -> Vec<bool> {
    prob.iter().map(|&p| p >= 0.5).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dark_square(w: usize, h: usize) -> Vec<f32> {
        let mut field = vec![250.0f32; w * h];
        for y in h / 3..2 * h / 3 {
            for x in w / 3..2 * w / 3 {
                field[y * w + x] = 10.0;
            }
        }
        field
    }

    #[test]
    fn test_heuristic_white_and_transparent() {
        let pixels = [
            255, 255, 255, 255, // white
            10, 10, 10, 255, // dark
            10, 10, 10, 0, // transparent
            250, 240, 239, 255, // one channel below cutoff
        ];
        assert_eq!(heuristic_background(&pixels), vec![true, false, true, false]);
    }

    #[test]
    fn test_edge_gate_ramp() {
        assert_eq!(edge_gate(0.1, 0.25), 0.0);
        assert_eq!(edge_gate(0.25, 0.25), 0.0);
        assert!((edge_gate(0.625, 0.25) - 0.5).abs() < 1e-6);
        assert_eq!(edge_gate(1.0, 0.25), 1.0);
    }

    #[test]
    fn test_adaptive_uniform_is_background() {
        let field = vec![200.0f32; 36];
        let grad = vec![0.0f32; 36];
        let mask = adaptive_threshold(&field, &grad, 6, 6, &SegmentParams::default());
        assert!(mask.iter().all(|&b| b));
    }

    #[test]
    fn test_adaptive_dark_square_is_foreground() {
        let (w, h) = (12, 12);
        let field = dark_square(w, h);
        let grad = vec![0.0f32; w * h];
        let mask = adaptive_threshold(&field, &grad, w, h, &SegmentParams::default());
        assert!(!mask[6 * w + 6]);
        assert!(mask[0]);
    }

    #[test]
    fn test_adaptive_gradient_forces_foreground() {
        let field = vec![200.0f32; 9];
        let mut grad = vec![0.0f32; 9];
        grad[4] = 0.9;
        let mask = adaptive_threshold(&field, &grad, 3, 3, &SegmentParams::default());
        assert!(!mask[4]);
        assert!(mask[0]);
    }

    #[test]
    fn test_soft_flat_field_sits_on_boundary() {
        let field = vec![120.0f32; 25];
        let grad = vec![0.0f32; 25];
        let prob = soft_background(&field, &grad, 5, 5, &SegmentParams::default());
        assert!(prob.iter().all(|&p| (p - 0.5).abs() < 1e-4));
    }

    #[test]
    fn test_soft_dark_square_low_probability() {
        let (w, h) = (12, 12);
        let field = dark_square(w, h);
        let grad = vec![0.0f32; w * h];
        let prob = soft_background(&field, &grad, w, h, &SegmentParams::default());
        assert!(prob[6 * w + 6] < 0.05);
        assert!(prob[0] > 0.5);
        assert!(prob.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_soft_edge_suppression() {
        let field = vec![250.0f32; 9];
        let mut grad = vec![0.0f32; 9];
        grad[4] = 1.0;
        let prob = soft_background(&field, &grad, 3, 3, &SegmentParams::default());
        // Full gate leaves a quarter of the ungated probability.
        assert!((prob[4] - prob[0] * 0.25).abs() < 1e-6);
        assert!(!probability_mask(&prob)[4]);
    }

    #[test]
    fn test_classifiers_agree_on_ungated_dark_square() {
        let (w, h) = (12, 12);
        let field = dark_square(w, h);
        let grad = vec![0.0f32; w * h];
        let params = SegmentParams::default();
        let hard = adaptive_threshold(&field, &grad, w, h, &params);
        let soft = probability_mask(&soft_background(&field, &grad, w, h, &params));
        assert_eq!(hard[6 * w + 6], soft[6 * w + 6]);
        assert_eq!(hard[0], soft[0]);
    }
}
