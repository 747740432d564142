//! Intensity to glyph mapping.

use super::bbox::BoundingBox;
use super::dither::quant_step;

/// Precomputed intensity -> glyph table.
///
/// `table[i] = glyphs[clamp(round(i / step), 0, n - 1)]` with
/// `step = max(1, floor(255 / n))`. An empty ramp maps everything to a space.
pub struct GlyphTable {
    table: [char; 256],
}

impl GlyphTable {
    pub fn new(glyphs: &[char]) -> Self {
        let mut table = [' '; 256];
        if glyphs.is_empty() {
            return Self { table };
        }

        let step = quant_step(glyphs.len()) as f32;
        let last = glyphs.len() - 1;
        for (i, slot) in table.iter_mut().enumerate() {
            let idx = (i as f32 / step).round() as usize;
            *slot = glyphs[idx.min(last)];
        }

        Self { table }
    }

    #[inline]
    pub fn glyph(&self, intensity: u8) -> char {
        self.table[intensity as usize]
    }
}

/// Map the pixels inside `bbox` to rows of glyphs.
///
/// Background pixels always render as a space.
///
/// # Arguments
/// * `gray` - Final intensities (after tone and dithering)
/// * `background` - Background mask of the same size
/// * `width` - Image width in pixels
/// * `bbox` - Region to emit, already clamped to the frame
/// * `glyphs` - Ramp ordered from darkest to lightest
pub fn map_to_rows(
    gray: &[u8],
    background: &[bool],
    width: usize,
    bbox: BoundingBox,
    glyphs: &[char],
) -> Vec<String> {
    let table = GlyphTable::new(glyphs);
    let mut rows = Vec::with_capacity(bbox.height());

    for y in bbox.top..bbox.bottom {
        let mut row = String::with_capacity(bbox.width());
        for x in bbox.left..bbox.right {
            let idx = y * width + x;
            if background[idx] {
                row.push(' ');
            } else {
                row.push(table.glyph(gray[idx]));
            }
        }
        rows.push(row);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_glyph_scenario() {
        let table = GlyphTable::new(&['#', '.', ' ']);
        assert_eq!(table.glyph(0), '#');
        assert_eq!(table.glyph(90), '.');
        assert_eq!(table.glyph(200), ' ');
        assert_eq!(table.glyph(255), ' ');
    }

    #[test]
    fn test_rounding_boundary() {
        // step 85: 42 rounds down, 43 rounds up.
        let table = GlyphTable::new(&['#', '.', ' ']);
        assert_eq!(table.glyph(42), '#');
        assert_eq!(table.glyph(43), '.');
    }

    #[test]
    fn test_empty_ramp_is_space() {
        let table = GlyphTable::new(&[]);
        assert!((0..=255u8).all(|i| table.glyph(i) == ' '));
    }

    #[test]
    fn test_single_glyph_ramp() {
        let table = GlyphTable::new(&['x']);
        assert!((0..=255u8).all(|i| table.glyph(i) == 'x'));
    }

    #[test]
    fn test_background_renders_space() {
        let gray = vec![0u8, 0, 0, 0];
        let bg = vec![false, true, true, false];
        let rows = map_to_rows(&gray, &bg, 2, BoundingBox::full(2, 2), &['#', '.', ' ']);
        assert_eq!(rows, vec!["# ".to_string(), " #".to_string()]);
    }

    #[test]
    fn test_only_bbox_emitted() {
        let gray: Vec<u8> = vec![0; 16];
        let bg = vec![false; 16];
        let bbox = BoundingBox {
            left: 1,
            top: 2,
            right: 3,
            bottom: 4,
        };
        let rows = map_to_rows(&gray, &bg, 4, bbox, &['@', ' ']);
        assert_eq!(rows, vec!["@@".to_string(), "@@".to_string()]);
    }
}
