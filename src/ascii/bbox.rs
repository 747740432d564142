//! Foreground bounding box.

/// Half-open pixel rectangle `[left, right) × [top, bottom)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

impl BoundingBox {
    /// The whole `width × height` frame.
    pub fn full(width: usize, height: usize) -> Self {
        Self {
            left: 0,
            top: 0,
            right: width,
            bottom: height,
        }
    }

    pub fn width(&self) -> usize {
        self.right - self.left
    }

    pub fn height(&self) -> usize {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Grow by `margin` pixels on every side, clamped to the frame.
    pub fn pad(&self, margin: usize, width: usize, height: usize) -> Self {
        Self {
            left: self.left.saturating_sub(margin),
            top: self.top.saturating_sub(margin),
            right: (self.right + margin).min(width),
            bottom: (self.bottom + margin).min(height),
        }
    }

    /// Expand outward to a 2-column, 4-row grid.
    ///
    /// The result may extend past the frame; callers sampling it must treat
    /// out-of-bounds pixels as off.
    pub fn align_to_braille(&self) -> Self {
        Self {
            left: self.left / 2 * 2,
            top: self.top / 4 * 4,
            right: self.right.div_ceil(2) * 2,
            bottom: self.bottom.div_ceil(4) * 4,
        }
    }
}

/// Crop away fully-background border rows and columns.
///
/// Sides are stripped one at a time until a row or column containing a
/// foreground pixel is found. If everything is background the full frame is
/// returned; otherwise the box gains a 1-pixel margin clamped to the frame.
///
/// `compact` skips cropping and always returns the full frame.
pub fn crop_to_foreground(
    background: &[bool],
    width: usize,
    height: usize,
    compact: bool,
) -> BoundingBox {
    let full = BoundingBox::full(width, height);
    if compact || width == 0 || height == 0 {
        return full;
    }

    let is_bg = |x: usize, y: usize| background[y * width + x];
    let row_is_bg = |y: usize, left: usize, right: usize| (left..right).all(|x| is_bg(x, y));
    let col_is_bg = |x: usize, top: usize, bottom: usize| (top..bottom).all(|y| is_bg(x, y));

    let mut b = full;
    while b.top < b.bottom && row_is_bg(b.top, b.left, b.right) {
        b.top += 1;
    }
    while b.bottom > b.top && row_is_bg(b.bottom - 1, b.left, b.right) {
        b.bottom -= 1;
    }
    while b.left < b.right && col_is_bg(b.left, b.top, b.bottom) {
        b.left += 1;
    }
    while b.right > b.left && col_is_bg(b.right - 1, b.top, b.bottom) {
        b.right -= 1;
    }

    if b.is_empty() {
        return full;
    }

    b.pad(1, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_with_dot(w: usize, h: usize, x: usize, y: usize) -> Vec<bool> {
        let mut mask = vec![true; w * h];
        mask[y * w + x] = false;
        mask
    }

    #[test]
    fn test_all_background_is_full_frame() {
        let mask = vec![true; 20];
        assert_eq!(crop_to_foreground(&mask, 5, 4, false), BoundingBox::full(5, 4));
    }

    #[test]
    fn test_compact_is_full_frame() {
        let mask = mask_with_dot(8, 8, 4, 4);
        assert_eq!(
            crop_to_foreground(&mask, 8, 8, true),
            BoundingBox {
                left: 0,
                top: 0,
                right: 8,
                bottom: 8
            }
        );
    }

    #[test]
    fn test_single_dot_gets_margin() {
        let mask = mask_with_dot(10, 10, 4, 6);
        assert_eq!(
            crop_to_foreground(&mask, 10, 10, false),
            BoundingBox {
                left: 3,
                top: 5,
                right: 6,
                bottom: 8
            }
        );
    }

    #[test]
    fn test_margin_clamped_at_corner() {
        let mask = mask_with_dot(6, 6, 0, 5);
        assert_eq!(
            crop_to_foreground(&mask, 6, 6, false),
            BoundingBox {
                left: 0,
                top: 4,
                right: 2,
                bottom: 6
            }
        );
    }

    #[test]
    fn test_no_background_keeps_full_frame() {
        let mask = vec![false; 12];
        assert_eq!(crop_to_foreground(&mask, 4, 3, false), BoundingBox::full(4, 3));
    }

    #[test]
    fn test_braille_alignment() {
        let b = BoundingBox {
            left: 3,
            top: 5,
            right: 6,
            bottom: 9,
        };
        assert_eq!(
            b.align_to_braille(),
            BoundingBox {
                left: 2,
                top: 4,
                right: 6,
                bottom: 12
            }
        );
        let aligned = BoundingBox::full(4, 8);
        assert_eq!(aligned.align_to_braille(), aligned);
    }
}
