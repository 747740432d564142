//! Floyd-Steinberg error diffusion over foreground pixels.

/// Quantization step for a glyph ramp of `glyph_count` entries.
///
/// `max(1, floor(255 / glyph_count))`; an empty ramp is treated as one glyph.
#[inline]
pub fn quant_step(glyph_count: usize) -> usize {
    (255 / glyph_count.max(1)).max(1)
}

/// Snap `value` to the nearest multiple of `step` inside [0, 255].
///
/// The input is clamped first, so the result is never more than `step` away
/// from the clamped input. Levels past the end of a ramp are left to the
/// glyph lookup, which clamps to the last glyph.
#[inline]
pub fn quantize_to_step(value: f32, step: f32) -> f32 {
    let value = value.clamp(0.0, 255.0);
    let top = (255.0 / step).floor();
    (value / step).round().min(top) * step
}

/// Quantize intensities to glyph levels, diffusing the error.
///
/// Error diffusion pattern:
/// ```text
///        [*]  7/16
/// 3/16  5/16  1/16
/// ```
///
/// Pixels are processed row-major, left to right, top to bottom. Background
/// pixels are copied through untouched and never receive error: a share that
/// would land on a background neighbor is dropped, not redistributed.
///
/// # Arguments
/// * `gray` - Tone-adjusted intensities (0-255)
/// * `background` - Background mask of the same size
/// * `width`, `height` - Image dimensions
/// * `glyph_count` - Number of glyphs in the target ramp
///
/// # Returns
/// Intensities where every foreground pixel sits on a multiple of the step.
pub fn floyd_steinberg(
    gray: &[u8],
    background: &[bool],
    width: usize,
    height: usize,
    glyph_count: usize,
) -> Vec<u8> {
    let step = quant_step(glyph_count) as f32;

    let mut buffer: Vec<f32> = gray.iter().map(|&v| v as f32).collect();
    let mut out = gray.to_vec();

    let push = |buffer: &mut [f32], idx: usize, amount: f32| {
        if !background[idx] {
            buffer[idx] += amount;
        }
    };

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            if background[idx] {
                continue;
            }

            let old = buffer[idx].clamp(0.0, 255.0);
            let new = quantize_to_step(old, step);
            out[idx] = new as u8;

            let error = old - new;

            if x + 1 < width {
                push(&mut buffer, idx + 1, error * 7.0 / 16.0);
            }
            if y + 1 < height {
                if x > 0 {
                    push(&mut buffer, idx + width - 1, error * 3.0 / 16.0);
                }
                push(&mut buffer, idx + width, error * 5.0 / 16.0);
                if x + 1 < width {
                    push(&mut buffer, idx + width + 1, error / 16.0);
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quant_step() {
        assert_eq!(quant_step(3), 85);
        assert_eq!(quant_step(10), 25);
        assert_eq!(quant_step(0), 255);
        assert_eq!(quant_step(1000), 1);
    }

    #[test]
    fn test_outputs_sit_on_levels() {
        let gray: Vec<u8> = (0..64).map(|i| (i * 4) as u8).collect();
        let bg = vec![false; 64];
        let out = floyd_steinberg(&gray, &bg, 8, 8, 3);
        assert!(out.iter().all(|&v| v % 85 == 0));
    }

    #[test]
    fn test_quantize_to_step_stays_within_one_step() {
        for step in [1usize, 8, 23, 25, 51, 63, 85, 127, 255] {
            let step = step as f32;
            for v in 0..=255 {
                let v = v as f32;
                let q = quantize_to_step(v, step);
                assert!((0.0..=255.0).contains(&q), "{} -> {} (step {})", v, q, step);
                assert!((v - q).abs() <= step, "{} -> {} (step {})", v, q, step);
                assert_eq!(q % step, 0.0);
            }
        }
        assert_eq!(quantize_to_step(300.0, 25.0), 250.0);
        assert_eq!(quantize_to_step(-40.0, 25.0), 0.0);
    }

    #[test]
    fn test_dark_row_survives_light_band() {
        let (w, h) = (10, 21);
        let mut gray = vec![250u8; w * h];
        for v in gray[(h - 1) * w..].iter_mut() {
            *v = 0;
        }
        let bg = vec![false; w * h];
        let out = floyd_steinberg(&gray, &bg, w, h, 10);
        assert!(out[..(h - 1) * w].iter().all(|&v| v == 250));
        assert_eq!(&out[(h - 1) * w..], &[0u8; 10][..]);
    }

    #[test]
    fn test_right_neighbor_receives_seven_sixteenths() {
        let bg = vec![false; 2];
        // 100 quantizes to 85, error 15; 7/16 of that is 6.5625.
        // 36 + 6.5625 rounds up to level 1, 35 + 6.5625 does not.
        assert_eq!(floyd_steinberg(&[100, 36], &bg, 2, 1, 3), vec![85, 85]);
        assert_eq!(floyd_steinberg(&[100, 35], &bg, 2, 1, 3), vec![85, 0]);
    }

    #[test]
    fn test_below_neighbor_receives_five_sixteenths() {
        let bg = vec![false; 2];
        // 5/16 of 15 is 4.6875.
        assert_eq!(floyd_steinberg(&[100, 38], &bg, 1, 2, 3), vec![85, 85]);
        assert_eq!(floyd_steinberg(&[100, 37], &bg, 1, 2, 3), vec![85, 0]);
    }

    #[test]
    fn test_error_dropped_at_background() {
        // Middle pixel is background: untouched, and the error aimed at it
        // is not forwarded to the pixel behind it.
        let bg = vec![false, true, false];
        let out = floyd_steinberg(&[100, 77, 36], &bg, 3, 1, 3);
        assert_eq!(out, vec![85, 77, 0]);
    }

    #[test]
    fn test_deterministic() {
        let gray: Vec<u8> = (0..100).map(|i| ((i * 53) % 256) as u8).collect();
        let bg: Vec<bool> = (0..100).map(|i| i % 7 == 0).collect();
        assert_eq!(
            floyd_steinberg(&gray, &bg, 10, 10, 5),
            floyd_steinberg(&gray, &bg, 10, 10, 5)
        );
    }
}
