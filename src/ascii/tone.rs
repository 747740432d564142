//! Tone adjustment: gamma lookup and the optional simplify-and-blend pass.

/// Build a 256-entry gamma lookup table.
///
/// `lut[i] = clamp(round(255 * (i / 255)^gamma))`
pub fn gamma_lut(gamma: f32) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        let v = 255.0 * (i as f32 / 255.0).powf(gamma);
        *entry = v.round().clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Apply a lookup table to every sample in place.
pub fn apply_lut(gray: &mut [u8], lut: &[u8; 256]) {
    for v in gray.iter_mut() {
        *v = lut[*v as usize];
    }
}

/// Snap each sample to the nearest of `levels` evenly spaced values in [0, 255].
///
/// Fewer than 2 levels leaves the buffer unchanged.
pub fn posterize(gray: &[u8], levels: u8) -> Vec<u8> {
    if levels < 2 {
        return gray.to_vec();
    }
    let steps = (levels - 1) as f32;
    gray.iter()
        .map(|&v| {
            let rung = (v as f32 / 255.0 * steps).round();
            (rung * 255.0 / steps).round().clamp(0.0, 255.0) as u8
        })
        .collect()
}

/// 3x3 median filter with replicated borders.
///
/// Sorts the full neighborhood for every pixel.
pub fn median3(gray: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut out = vec![0u8; gray.len()];
    let mut window = [0u8; 9];

    for y in 0..height {
        for x in 0..width {
            let mut n = 0;
            for dy in -1isize..=1 {
                for dx in -1isize..=1 {
                    let nx = (x as isize + dx).clamp(0, width as isize - 1) as usize;
                    let ny = (y as isize + dy).clamp(0, height as isize - 1) as usize;
                    window[n] = gray[ny * width + nx];
                    n += 1;
                }
            }
            window.sort_unstable();
            out[y * width + x] = window[4];
        }
    }

    out
}

/// Blend factor for a preprocess strength in 0..=10.
#[inline]
pub fn blend_factor(strength: u8) -> f32 {
    (strength as f32 / 10.0).clamp(0.0, 1.0)
}

/// Posterize, median-filter, then blend back toward the original.
///
/// `blend == 0` keeps the fully simplified image, `blend == 1` restores the
/// original detail.
///
/// # Arguments
/// * `gray` - Gamma-corrected intensities
/// * `width`, `height` - Image dimensions
/// * `levels` - Posterize levels
/// * `strength` - Detail strength (0-10)
pub fn preprocess(gray: &[u8], width: usize, height: usize, levels: u8, strength: u8) -> Vec<u8> {
    let simplified = median3(&posterize(gray, levels), width, height);
    let blend = blend_factor(strength);

    simplified
        .iter()
        .zip(gray)
        .map(|(&s, &o)| {
            let v = s as f32 * (1.0 - blend) + o as f32 * blend;
            v.round().clamp(0.0, 255.0) as u8
        })
        .collect()
}
