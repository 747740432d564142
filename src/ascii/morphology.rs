//! Edge-gated morphological refinement of the background mask.
//!
//! Each pass closes the background (fills small holes) and opens the
//! foreground (removes isolated speckle). Pixels on strong edges are frozen
//! for the whole pass so thin silhouette detail survives.

/// Gradient level above which a pixel is frozen during refinement.
pub const MORPH_EDGE_THRESHOLD: f32 = 0.35;

/// Build the frozen-pixel mask from a gradient field.
pub fn edge_mask(gradient: &[f32], threshold: f32) -> Vec<bool> {
    gradient.iter().map(|&g| g > threshold).collect()
}

/// Visit the 8-neighborhood of `(x, y)` with border replication.
#[inline]
fn neighbors(
    mask: &[bool],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
) -> impl Iterator<Item = bool> + '_ {
    const OFFSETS: [(isize, isize); 8] = [
        (-1, -1),
        (0, -1),
        (1, -1),
        (-1, 0),
        (1, 0),
        (-1, 1),
        (0, 1),
        (1, 1),
    ];
    OFFSETS.iter().map(move |&(dx, dy)| {
        let nx = (x as isize + dx).clamp(0, width as isize - 1) as usize;
        let ny = (y as isize + dy).clamp(0, height as isize - 1) as usize;
        mask[ny * width + nx]
    })
}

/// A set pixel stays set only if all 8 neighbors are set.
fn erode(mask: &[bool], frozen: &[bool], width: usize, height: usize) -> Vec<bool> {
    let mut out = mask.to_vec();
    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            if frozen[idx] || !mask[idx] {
                continue;
            }
            out[idx] = neighbors(mask, width, height, x, y).all(|n| n);
        }
    }
    out
}

/// An unset pixel becomes set if any neighbor is set.
fn dilate(mask: &[bool], frozen: &[bool], width: usize, height: usize) -> Vec<bool> {
    let mut out = mask.to_vec();
    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            if frozen[idx] || mask[idx] {
                continue;
            }
            out[idx] = neighbors(mask, width, height, x, y).any(|n| n);
        }
    }
    out
}

/// Refine a background mask with `passes` close/open cycles.
///
/// The foreground mask is derived once from the background and both are
/// reconciled at the end of each pass: a pixel is background if the closed
/// background contains it or the opened foreground does not. With the same
/// frozen pixels on both sides the two masks are complements, so either test
/// alone gives the same answer.
/// Pixels whose gradient exceeds `edge_threshold` keep their pre-pass value.
///
/// `passes == 0` returns the input unchanged.
///
/// # Arguments
/// * `background` - Background mask (`true` = background)
/// * `gradient` - Normalized gradient field
/// * `width`, `height` - Image dimensions
/// * `passes` - Number of refinement cycles
/// * `edge_threshold` - Gradient level that freezes a pixel
pub fn refine(
    background: &[bool],
    gradient: &[f32],
    width: usize,
    height: usize,
    passes: usize,
    edge_threshold: f32,
) -> Vec<bool> {
    if passes == 0 || width == 0 || height == 0 {
        return background.to_vec();
    }

    let frozen = edge_mask(gradient, edge_threshold);
    let mut bg = background.to_vec();

    for _ in 0..passes {
        let fg: Vec<bool> = bg.iter().map(|&b| !b).collect();

        let closed_bg = erode(&dilate(&bg, &frozen, width, height), &frozen, width, height);
        let opened_fg = dilate(&erode(&fg, &frozen, width, height), &frozen, width, height);

        bg = closed_bg
            .iter()
            .zip(&opened_fg)
            .zip(&frozen)
            .zip(&bg)
            .map(|(((&closed, &opened), &frozen), &before)| {
                if frozen {
                    before
                } else {
                    closed || !opened
                }
            })
            .collect();
    }

    bg
}
