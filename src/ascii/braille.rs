//! Braille dot packing.
//!
//! Each braille character represents a 2x4 dot matrix, giving 8 sub-pixels
//! per output character. Packing needs no glyph ramp, no dithering and no
//! background mask: the dot threshold alone decides density.

use super::bbox::BoundingBox;

/// Braille base character (U+2800, empty braille pattern).
pub const BRAILLE_BASE: char = '\u{2800}';

/// Sub-pixels brighter than this light their dot.
pub const DOT_THRESHOLD: u8 = 127;

/// Braille dot number for each sub-pixel, scanning column-major:
/// column 0 rows 0-3, then column 1 rows 0-3.
pub const DOT_ORDER: [u8; 8] = [1, 2, 3, 7, 4, 5, 6, 8];

/// Convert a 2x4 boolean grid to a braille character.
///
/// The bit positions are:
/// ```text
/// [0,0]=1   [1,0]=8
/// [0,1]=2   [1,1]=16
/// [0,2]=4   [1,2]=32
/// [0,3]=64  [1,3]=128
/// ```
///
/// # Arguments
/// * `grid` - A 2x4 boolean array where grid[x][y] indicates if dot at (x,y) is on
///
/// # Returns
/// The corresponding braille character (U+2800 to U+28FF)
pub fn grid_to_braille(grid: [[bool; 4]; 2]) -> char {
    let mut code = 0u32;
    for (col, rows) in grid.iter().enumerate() {
        for (row, &on) in rows.iter().enumerate() {
            if on {
                code |= 1 << (DOT_ORDER[col * 4 + row] - 1);
            }
        }
    }
    char::from_u32(BRAILLE_BASE as u32 + code).unwrap_or(BRAILLE_BASE)
}

/// Pack the pixels inside `bbox` into rows of braille characters.
///
/// The box is first expanded outward to 2x4 alignment. Sub-pixels that fall
/// outside the `width × height` frame are treated as off.
///
/// # Arguments
/// * `gray` - Tone-adjusted intensities
/// * `width`, `height` - Image dimensions
/// * `bbox` - Region to pack
pub fn pack_rows(gray: &[u8], width: usize, height: usize, bbox: BoundingBox) -> Vec<String> {
    let cells = bbox.align_to_braille();
    let mut rows = Vec::with_capacity(cells.height() / 4);

    for cy in (cells.top..cells.bottom).step_by(4) {
        let mut row = String::with_capacity(cells.width() / 2 * 3);
        for cx in (cells.left..cells.right).step_by(2) {
            let mut grid = [[false; 4]; 2];
            for (dx, col) in grid.iter_mut().enumerate() {
                for (dy, dot) in col.iter_mut().enumerate() {
                    let x = cx + dx;
                    let y = cy + dy;
                    if x < width && y < height {
                        *dot = gray[y * width + x] > DOT_THRESHOLD;
                    }
                }
            }
            row.push(grid_to_braille(grid));
        }
        rows.push(row);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_braille_base() {
        assert_eq!(BRAILLE_BASE, '\u{2800}');
    }

    #[test]
    fn test_grid_to_braille_empty() {
        let grid = [[false; 4]; 2];
        assert_eq!(grid_to_braille(grid), BRAILLE_BASE);
    }

    #[test]
    fn test_grid_to_braille_full() {
        let grid = [[true; 4]; 2];
        assert_eq!(grid_to_braille(grid), '\u{28FF}');
    }

    #[test]
    fn test_grid_to_braille_single_dots() {
        let mut grid = [[false; 4]; 2];
        grid[0][0] = true;
        assert_eq!(grid_to_braille(grid), '\u{2801}');

        let mut grid = [[false; 4]; 2];
        grid[1][0] = true;
        assert_eq!(grid_to_braille(grid), '\u{2808}');

        // Bottom row uses dots 7 and 8.
        let mut grid = [[false; 4]; 2];
        grid[0][3] = true;
        assert_eq!(grid_to_braille(grid), '\u{2840}');
        let mut grid = [[false; 4]; 2];
        grid[1][3] = true;
        assert_eq!(grid_to_braille(grid), '\u{2880}');
    }

    #[test]
    fn test_pack_white_and_black_cells() {
        let white = vec![255u8; 8];
        assert_eq!(pack_rows(&white, 2, 4, BoundingBox::full(2, 4)), vec!["\u{28FF}"]);
        let black = vec![0u8; 8];
        assert_eq!(pack_rows(&black, 2, 4, BoundingBox::full(2, 4)), vec!["\u{2800}"]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let gray = vec![127u8, 128, 0, 0, 0, 0, 0, 0];
        // Pixel (0,0) = 127 is off, pixel (1,0) = 128 lights dot 4.
        assert_eq!(pack_rows(&gray, 2, 4, BoundingBox::full(2, 4)), vec!["\u{2808}"]);
    }

    #[test]
    fn test_out_of_bounds_subpixels_are_off() {
        // 3x5 white image: the aligned box is 4x8, so the right column and
        // lower rows of the outer cells fall outside the frame.
        let gray = vec![255u8; 15];
        let rows = pack_rows(&gray, 3, 5, BoundingBox::full(3, 5));
        assert_eq!(rows.len(), 2);
        let top: Vec<char> = rows[0].chars().collect();
        assert_eq!(top, vec!['\u{28FF}', '\u{2847}']);
        let bottom: Vec<char> = rows[1].chars().collect();
        assert_eq!(bottom, vec!['\u{2809}', '\u{2801}']);
    }
}
