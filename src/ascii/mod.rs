//! Image to text rendering pipeline.
//!
//! Converts an RGBA pixel buffer to a grid of glyphs or braille cells:
//!
//! 1. **Luminance** - optional inversion, then BT.601 luminance
//! 2. **Segmentation** - background classification (heuristic, adaptive
//!    threshold, or soft probability), gated by a Sobel gradient field and
//!    refined with edge-gated morphology
//! 3. **Cropping** - bounding box around the foreground
//! 4. **Tone** - gamma lookup, optional posterize/median/blend simplification
//! 5. **Dithering** - Floyd-Steinberg over foreground pixels
//! 6. **Mapping** - intensity to glyph lookup, or 2x4 braille dot packing
//!
//! # Glyph Sets
//!
//! Built-in ramps are available via [`GlyphSet`]:
//! - `Standard` - 10-level density ramp
//! - `Detailed` - 70-level density ramp
//! - `Simple` - 5-level ramp
//! - `Binary` - 2-level ramp
//! - `Braille` - dot packing, 8 sub-pixels per character

pub mod bbox;
pub mod braille;
mod charset;
pub mod dither;
pub mod edges;
pub mod grayscale;
pub mod integral;
mod mapping;
pub mod morphology;
mod render;
pub mod segment;
pub mod tone;

pub use bbox::{crop_to_foreground, BoundingBox};
pub use charset::{GlyphSet, BINARY_GLYPHS, DETAILED_GLYPHS, SIMPLE_GLYPHS, STANDARD_GLYPHS};
pub use edges::gradient_magnitude;
pub use grayscale::{invert_rgb, to_linear_luminance, to_luminance};
pub use integral::{IntegralPair, IntegralTable};
pub use mapping::{map_to_rows, GlyphTable};
pub use render::{
    bounding_box, render, render_text, CharacterGrid, RenderError, RenderOptions, Segmentation,
    MAX_PREPROCESS_STRENGTH,
};

pub use braille::{grid_to_braille, pack_rows as pack_braille, BRAILLE_BASE};
