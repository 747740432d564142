//! Integral images (summed-area tables) for constant-time window queries.
//!
//! Building a table is a single O(w·h) pass. Every window query afterwards
//! costs four lookups regardless of the window radius, which is what makes
//! per-pixel local statistics affordable in the segmentation stage.

/// Summed-area table over a scalar field.
///
/// `sums[y * width + x]` holds the sum of every sample in the rectangle
/// `[0, x] × [0, y]` (inclusive).
#[derive(Debug, Clone)]
pub struct IntegralTable {
    width: usize,
    height: usize,
    sums: Vec<f64>,
}

impl IntegralTable {
    /// Build a table from a row-major field of `width * height` samples.
    pub fn build(field: &[f32], width: usize, height: usize) -> Self {
        Self::accumulate(field, width, height, |v| v as f64)
    }

    /// Build a table of squared samples, used for variance queries.
    fn build_squared(field: &[f32], width: usize, height: usize) -> Self {
        Self::accumulate(field, width, height, |v| {
            let v = v as f64;
            v * v
        })
    }

    fn accumulate(field: &[f32], width: usize, height: usize, f: impl Fn(f32) -> f64) -> Self {
        let mut sums = vec![0.0f64; width * height];

        for y in 0..height {
            let mut row_sum = 0.0f64;
            for x in 0..width {
                let idx = y * width + x;
                row_sum += field.get(idx).copied().map(&f).unwrap_or(0.0);
                sums[idx] = if y == 0 {
                    row_sum
                } else {
                    sums[idx - width] + row_sum
                };
            }
        }

        Self { width, height, sums }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Sum over the inclusive rectangle `[x1, x2] × [y1, y2]`.
    ///
    /// Callers must pass coordinates already clipped to the image.
    fn rect_sum(&self, x1: usize, y1: usize, x2: usize, y2: usize) -> f64 {
        let w = self.width;
        let bottom_right = self.sums[y2 * w + x2];
        let left = if x1 > 0 { self.sums[y2 * w + (x1 - 1)] } else { 0.0 };
        let above = if y1 > 0 { self.sums[(y1 - 1) * w + x2] } else { 0.0 };
        let corner = if x1 > 0 && y1 > 0 {
            self.sums[(y1 - 1) * w + (x1 - 1)]
        } else {
            0.0
        };
        bottom_right - left - above + corner
    }

    /// Clip a `(2·radius + 1)`-sided window centered on `(x, y)`.
    ///
    /// Returns the inclusive corners and the clipped area.
    fn window(&self, x: usize, y: usize, radius: usize) -> (usize, usize, usize, usize, usize) {
        let x1 = x.saturating_sub(radius);
        let y1 = y.saturating_sub(radius);
        let x2 = (x + radius).min(self.width - 1);
        let y2 = (y + radius).min(self.height - 1);
        let area = (x2 - x1 + 1) * (y2 - y1 + 1);
        (x1, y1, x2, y2, area)
    }

    /// Sum of the window of side `2·radius + 1` centered on `(x, y)`.
    ///
    /// Windows touching the border shrink to the part inside the image.
    /// Returns 0 for an empty table.
    pub fn range_sum(&self, x: usize, y: usize, radius: usize) -> f64 {
        if self.width == 0 || self.height == 0 {
            return 0.0;
        }
        let (x1, y1, x2, y2, _) = self.window(x, y, radius);
        self.rect_sum(x1, y1, x2, y2)
    }

    /// Mean of the clipped window centered on `(x, y)`.
    pub fn range_mean(&self, x: usize, y: usize, radius: usize) -> f64 {
        if self.width == 0 || self.height == 0 {
            return 0.0;
        }
        let (x1, y1, x2, y2, area) = self.window(x, y, radius);
        self.rect_sum(x1, y1, x2, y2) / area as f64
    }
}

/// Sum and squared-sum tables over the same field.
#[derive(Debug, Clone)]
pub struct IntegralPair {
    pub sums: IntegralTable,
    pub squares: IntegralTable,
}

impl IntegralPair {
    /// Build both tables in one call.
    pub fn build(field: &[f32], width: usize, height: usize) -> Self {
        Self {
            sums: IntegralTable::build(field, width, height),
            squares: IntegralTable::build_squared(field, width, height),
        }
    }

    /// Local `(mean, std)` over the clipped window centered on `(x, y)`.
    ///
    /// Variance is clamped at zero before the square root; cancellation in
    /// `E[v²] - E[v]²` can otherwise go slightly negative on flat regions.
    pub fn range_stats(&self, x: usize, y: usize, radius: usize) -> (f64, f64) {
        let table = &self.sums;
        if table.width == 0 || table.height == 0 {
            return (0.0, 0.0);
        }
        let (x1, y1, x2, y2, area) = table.window(x, y, radius);
        let n = area as f64;
        let mean = table.rect_sum(x1, y1, x2, y2) / n;
        let mean_sq = self.squares.rect_sum(x1, y1, x2, y2) / n;
        let variance = (mean_sq - mean * mean).max(0.0);
        (mean, variance.sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_sum(field: &[f32], w: usize, h: usize, x: usize, y: usize, r: usize) -> f64 {
        let mut sum = 0.0;
        for yy in y.saturating_sub(r)..=(y + r).min(h - 1) {
            for xx in x.saturating_sub(r)..=(x + r).min(w - 1) {
                sum += field[yy * w + xx] as f64;
            }
        }
        sum
    }

    fn sample_field(w: usize, h: usize) -> Vec<f32> {
        (0..w * h).map(|i| ((i * 37 + 11) % 97) as f32).collect()
    }

    #[test]
    fn test_range_sum_matches_brute_force_everywhere() {
        let (w, h) = (9, 7);
        let field = sample_field(w, h);
        let table = IntegralTable::build(&field, w, h);

        for r in 0..5 {
            for y in 0..h {
                for x in 0..w {
                    let expected = brute_sum(&field, w, h, x, y, r);
                    let actual = table.range_sum(x, y, r);
                    assert!(
                        (expected - actual).abs() < 1e-6,
                        "mismatch at ({}, {}) r={}: {} vs {}",
                        x,
                        y,
                        r,
                        expected,
                        actual
                    );
                }
            }
        }
    }

    #[test]
    fn test_border_window_uses_clipped_area() {
        let field = vec![2.0f32; 16];
        let table = IntegralTable::build(&field, 4, 4);
        // Corner window of radius 1 covers only 2x2 pixels.
        assert_eq!(table.range_sum(0, 0, 1), 8.0);
        assert_eq!(table.range_mean(0, 0, 1), 2.0);
        // Interior window covers 3x3.
        assert_eq!(table.range_sum(1, 1, 1), 18.0);
    }

    #[test]
    fn test_range_stats_flat_field_has_zero_std() {
        let field = vec![0.7f32; 25];
        let pair = IntegralPair::build(&field, 5, 5);
        let (mean, std) = pair.range_stats(2, 2, 2);
        assert!((mean - 0.7).abs() < 1e-6);
        assert!(std >= 0.0);
        assert!(std < 1e-3);
    }

    #[test]
    fn test_range_stats_known_values() {
        // Window over [0, 10] has mean 5 and population std 5.
        let field = vec![0.0f32, 10.0];
        let pair = IntegralPair::build(&field, 2, 1);
        let (mean, std) = pair.range_stats(0, 0, 1);
        assert!((mean - 5.0).abs() < 1e-9);
        assert!((std - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_table() {
        let table = IntegralTable::build(&[], 0, 0);
        assert_eq!(table.range_sum(0, 0, 3), 0.0);
        let pair = IntegralPair::build(&[], 0, 0);
        assert_eq!(pair.range_stats(0, 0, 3), (0.0, 0.0));
    }
}
