//! End-to-end rendering: RGBA buffer + options -> character grid.

use serde::Deserialize;

use super::bbox::{crop_to_foreground, BoundingBox};
use super::charset::GlyphSet;
use super::grayscale::{invert_rgb, quantize, to_luminance, CHANNELS};
use super::morphology::{refine, MORPH_EDGE_THRESHOLD};
use super::segment::{
    adaptive_threshold, heuristic_background, probability_mask, soft_background, SegmentParams,
};
use super::{braille, dither, edges, mapping, tone};

/// Highest preprocess strength; anything above blends fully to the original.
pub const MAX_PREPROCESS_STRENGTH: u8 = 10;

/// How background pixels are identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Segmentation {
    /// Near-white or transparent pixels
    #[default]
    Heuristic,
    /// Local mean threshold followed by morphological refinement
    Adaptive,
    /// Sigmoid probability (>= 0.5) followed by morphological refinement
    Soft,
}

impl Segmentation {
    pub fn name(&self) -> &'static str {
        match self {
            Segmentation::Heuristic => "heuristic",
            Segmentation::Adaptive => "adaptive",
            Segmentation::Soft => "soft",
        }
    }
}

/// Options for a single render call.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Invert RGB before any field is derived
    pub invert: bool,
    /// Glyph set; `Braille` switches to dot packing
    pub glyph_set: GlyphSet,
    /// Ramp used for regular glyph sets, darkest first
    pub glyphs: Vec<char>,
    /// Tone curve exponent, must be finite and > 0
    pub gamma: f32,
    /// Floyd-Steinberg dithering (ignored for Braille)
    pub dithering: bool,
    /// Skip cropping and render the full frame
    pub compact: bool,
    /// Posterize + median simplification
    pub preprocess: bool,
    /// 0 = fully simplified, 10 = original detail
    pub preprocess_strength: u8,
    /// Background classifier
    pub segmentation: Segmentation,
    /// Morphology passes for the adaptive and soft classifiers
    pub refine_passes: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::for_glyph_set(GlyphSet::default())
    }
}

impl RenderOptions {
    /// Defaults using the built-in ramp of `glyph_set`.
    pub fn for_glyph_set(glyph_set: GlyphSet) -> Self {
        Self {
            invert: false,
            glyph_set,
            glyphs: glyph_set.glyphs().to_vec(),
            gamma: 1.0,
            dithering: false,
            compact: false,
            preprocess: false,
            preprocess_strength: 5,
            segmentation: Segmentation::default(),
            refine_passes: 1,
        }
    }

    /// Posterize levels used by the preprocess stage.
    pub fn posterize_levels(&self) -> u8 {
        if self.compact {
            2
        } else {
            3
        }
    }

    fn validate(&self) -> Result<(), RenderError> {
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(RenderError::InvalidGamma(self.gamma));
        }
        Ok(())
    }
}

/// Errors returned by [`render`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: usize, height: usize },

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("gamma must be finite and positive, got {0}")]
    InvalidGamma(f32),

    #[error("render worker is no longer running")]
    WorkerGone,
}

/// Rendered text, one entry per output row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharacterGrid {
    rows: Vec<String>,
}

impl CharacterGrid {
    pub fn new(rows: Vec<String>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Characters in the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0)
    }

    /// Rows joined by `\n`, with no trailing newline.
    pub fn into_text(self) -> String {
        self.rows.join("\n")
    }
}

impl std::fmt::Display for CharacterGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(row)?;
        }
        Ok(())
    }
}

/// Classify background pixels for the working buffer.
fn classify(
    pixels: &[u8],
    luminance: &[f32],
    width: usize,
    height: usize,
    options: &RenderOptions,
) -> Vec<bool> {
    if options.segmentation == Segmentation::Heuristic {
        return heuristic_background(pixels);
    }

    let gradient = edges::gradient_magnitude(luminance, width, height);
    let params = SegmentParams::default();
    let raw = match options.segmentation {
        Segmentation::Adaptive => adaptive_threshold(luminance, &gradient, width, height, &params),
        _ => probability_mask(&soft_background(luminance, &gradient, width, height, &params)),
    };

    refine(
        &raw,
        &gradient,
        width,
        height,
        options.refine_passes,
        MORPH_EDGE_THRESHOLD,
    )
}

fn check_input(pixels: &[u8], width: usize, height: usize) -> Result<(), RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyImage { width, height });
    }
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .unwrap_or(usize::MAX);
    if pixels.len() != expected {
        return Err(RenderError::BufferSize {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

/// Invert if requested, then derive the luminance field and background mask.
fn segment(
    pixels: &[u8],
    width: usize,
    height: usize,
    options: &RenderOptions,
) -> (Vec<f32>, Vec<bool>) {
    let mut working = pixels.to_vec();
    if options.invert {
        invert_rgb(&mut working);
    }
    let luminance = to_luminance(&working);
    let background = classify(&working, &luminance, width, height, options);
    (luminance, background)
}

/// Render an RGBA buffer to a character grid.
///
/// The caller decides the output size by rasterizing to `width × height`
/// beforehand: each pixel becomes one glyph, or each 2x4 block one braille
/// character.
///
/// # Arguments
/// * `pixels` - RGBA bytes, row-major, `width * height * 4` long
/// * `width`, `height` - Image dimensions, both non-zero
/// * `options` - Render options
///
/// # Errors
/// Fails before allocating anything if a dimension is zero, and on a buffer
/// length mismatch or an invalid gamma.
pub fn render(
    pixels: &[u8],
    width: usize,
    height: usize,
    options: &RenderOptions,
) -> Result<CharacterGrid, RenderError> {
    check_input(pixels, width, height)?;
    options.validate()?;

    let (luminance, background) = segment(pixels, width, height, options);
    let bbox = crop_to_foreground(&background, width, height, options.compact);
    log::debug!(
        "render {}x{} set={} segmentation={} bbox={:?}",
        width,
        height,
        options.glyph_set,
        options.segmentation.name(),
        bbox
    );

    let mut gray = quantize(&luminance);
    tone::apply_lut(&mut gray, &tone::gamma_lut(options.gamma));
    if options.preprocess {
        gray = tone::preprocess(
            &gray,
            width,
            height,
            options.posterize_levels(),
            options.preprocess_strength.min(MAX_PREPROCESS_STRENGTH),
        );
    }

    if options.glyph_set.is_braille() {
        return Ok(CharacterGrid::new(braille::pack_rows(
            &gray, width, height, bbox,
        )));
    }

    if options.dithering {
        gray = dither::floyd_steinberg(&gray, &background, width, height, options.glyphs.len());
    }
    if options.glyphs.is_empty() {
        log::debug!("empty glyph ramp, rendering blanks");
    }

    Ok(CharacterGrid::new(mapping::map_to_rows(
        &gray,
        &background,
        width,
        bbox,
        &options.glyphs,
    )))
}

/// Render straight to newline-joined text.
pub fn render_text(
    pixels: &[u8],
    width: usize,
    height: usize,
    options: &RenderOptions,
) -> Result<String, RenderError> {
    render(pixels, width, height, options).map(CharacterGrid::into_text)
}

/// Region a render would emit, before braille alignment.
pub fn bounding_box(
    pixels: &[u8],
    width: usize,
    height: usize,
    options: &RenderOptions,
) -> Result<BoundingBox, RenderError> {
    check_input(pixels, width, height)?;
    let (_, background) = segment(pixels, width, height, options);
    Ok(crop_to_foreground(&background, width, height, options.compact))
}
