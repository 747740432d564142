//! CLI enum types for glyph set and segmentation options.

use clap::ValueEnum;

use crate::ascii::{GlyphSet, Segmentation};

/// Glyph set for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GlyphSetArg {
    #[default]
    Standard,
    Detailed,
    Simple,
    Binary,
    Braille,
}

impl From<GlyphSetArg> for GlyphSet {
    fn from(g: GlyphSetArg) -> Self {
        match g {
            GlyphSetArg::Standard => GlyphSet::Standard,
            GlyphSetArg::Detailed => GlyphSet::Detailed,
            GlyphSetArg::Simple => GlyphSet::Simple,
            GlyphSetArg::Binary => GlyphSet::Binary,
            GlyphSetArg::Braille => GlyphSet::Braille,
        }
    }
}

/// Background classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SegmentationArg {
    #[default]
    Heuristic,
    Adaptive,
    Soft,
}

impl From<SegmentationArg> for Segmentation {
    fn from(s: SegmentationArg) -> Self {
        match s {
            SegmentationArg::Heuristic => Segmentation::Heuristic,
            SegmentationArg::Adaptive => Segmentation::Adaptive,
            SegmentationArg::Soft => Segmentation::Soft,
        }
    }
}
