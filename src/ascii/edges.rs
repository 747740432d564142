//! Sobel gradient magnitude field.

/// Floor applied to the normalization divisor so flat images stay finite.
pub const GRADIENT_EPSILON: f32 = 1e-6;

/// Compute a normalized Sobel gradient magnitude field.
///
/// The Sobel kernels used are:
/// ```text
/// Gx:          Gy:
/// [-1  0  1]   [-1 -2 -1]
/// [-2  0  2]   [ 0  0  0]
/// [-1  0  1]   [ 1  2  1]
/// ```
///
/// Magnitude is `|Gx| + |Gy|` rather than the Euclidean norm. Only interior
/// pixels are computed; the 1-pixel border stays 0. The result is divided by
/// the largest observed magnitude, so values lie in [0, 1] and the strongest
/// edge maps to exactly 1.0. A flat image yields an all-zero field.
///
/// # Arguments
/// * `field` - Luminance samples (row-major)
/// * `width` - Width of the image in pixels
/// * `height` - Height of the image in pixels
pub fn gradient_magnitude(field: &[f32], width: usize, height: usize) -> Vec<f32> {
    let mut grad = vec![0.0f32; width * height];
    if width < 3 || height < 3 || field.len() < width * height {
        return grad;
    }

    let sobel_x: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
    let sobel_y: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

    let mut max = 0.0f32;
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut gx = 0.0f32;
            let mut gy = 0.0f32;

            for ky in 0..3 {
                for kx in 0..3 {
                    let val = field[(y + ky - 1) * width + (x + kx - 1)];
                    gx += val * sobel_x[ky][kx];
                    gy += val * sobel_y[ky][kx];
                }
            }

            let magnitude = gx.abs() + gy.abs();
            max = max.max(magnitude);
            grad[y * width + x] = magnitude;
        }
    }

    let divisor = max.max(GRADIENT_EPSILON);
    for g in grad.iter_mut() {
        *g /= divisor;
    }

    grad
}
