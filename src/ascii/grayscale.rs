//! RGBA to luminance conversion.
//!
//! Two transforms are provided:
//! - **Perceptual** - ITU-R BT.601 weights on the raw 8-bit channels. This
//!   drives every rendering stage.
//! - **Linear** - sRGB decoding followed by Rec. 709 weights, for callers that
//!   need physically meaningful light values (reflectance/illumination work).

/// Bytes per pixel in an RGBA buffer.
pub const CHANNELS: usize = 4;

/// Invert the RGB channels of an RGBA buffer in place.
///
/// Alpha is left untouched.
pub fn invert_rgb(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(CHANNELS) {
        px[0] = 255 - px[0];
        px[1] = 255 - px[1];
        px[2] = 255 - px[2];
    }
}

/// Perceptual luminance of a single pixel, in [0, 255].
///
/// Y = 0.299*R + 0.587*G + 0.114*B
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

/// Convert an RGBA buffer to a perceptual luminance field in [0, 255].
///
/// # Arguments
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major)
///
/// # Returns
/// One luminance sample per pixel
pub fn to_luminance(pixels: &[u8]) -> Vec<f32> {
    pixels
        .chunks_exact(CHANNELS)
        .map(|px| luma(px[0], px[1], px[2]))
        .collect()
}

/// Round a luminance field to 8-bit intensities.
pub fn quantize(field: &[f32]) -> Vec<u8> {
    field
        .iter()
        .map(|&v| v.round().clamp(0.0, 255.0) as u8)
        .collect()
}

/// Decode an 8-bit sRGB channel to linear light in [0, 1].
#[inline]
pub fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert an RGBA buffer to linear-light luminance in [0, 1].
///
/// Channels are sRGB-decoded before the Rec. 709 weights
/// (0.2126, 0.7152, 0.0722) are applied.
pub fn to_linear_luminance(pixels: &[u8]) -> Vec<f32> {
    pixels
        .chunks_exact(CHANNELS)
        .map(|px| {
            0.2126 * srgb_to_linear(px[0])
                + 0.7152 * srgb_to_linear(px[1])
                + 0.0722 * srgb_to_linear(px[2])
        })
        .collect()
}
