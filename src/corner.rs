//! Corner records extracted from a suppression mask.

use std::cmp::Ordering;

use crate::image::{ImageView, MASK_ON};
use crate::util::{HarrisError, HarrisResult};

/// Accepted corner location with its response.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Corner {
    /// Column of the corner.
    pub x: usize,
    /// Row of the corner.
    pub y: usize,
    /// Response value at the corner.
    pub score: f32,
}

fn corner_cmp_desc(a: &Corner, b: &Corner) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.y.cmp(&b.y))
        .then_with(|| a.x.cmp(&b.x))
}

/// Sorts corners by descending score, ties by row then column.
pub fn sort_corners_desc(corners: &mut [Corner]) {
    corners.sort_by(corner_cmp_desc);
}

/// Collects every masked pixel of `mask` with its score from `map`, strongest first.
pub fn corners_from_mask(
    map: ImageView<'_, f32>,
    mask: ImageView<'_, u8>,
) -> HarrisResult<Vec<Corner>> {
    map.ensure_gray()?;
    mask.ensure_gray()?;
    if map.width() != mask.width() || map.height() != mask.height() {
        return Err(HarrisError::input("mask and response map sizes differ"));
    }

    let mut corners = Vec::new();
    for (y, (scores, flags)) in map.rows().zip(mask.rows()).enumerate() {
        for (x, (&score, &flag)) in scores.iter().zip(flags).enumerate() {
            if flag == MASK_ON {
                corners.push(Corner { x, y, score });
            }
        }
    }
    sort_corners_desc(&mut corners);
    Ok(corners)
}
