//! # Grid Alignment
//!
//! Helpers relating world positions to the implicit grid.

use crate::Point;

/// Returns true if `pos` sits exactly in the centre of a cell.
///
/// Coordinates are rounded to whole units first, so sub-unit noise left
/// behind by steering doesn't count as misalignment.
///
/// # Examples
///
/// ```
/// use tickpath::{is_cell_centred, Point};
///
/// assert!(is_cell_centred(Point::new(16.0, 48.0), 32));
/// assert!(!is_cell_centred(Point::new(20.0, 48.0), 32));
/// ```
pub fn is_cell_centred(pos: Point, cell_size: i32) -> bool {
    if cell_size <= 0 {
        return false;
    }
    let half = f64::from(cell_size) / 2.0;
    let x_diff = ((pos.x - half).round() as i64).rem_euclid(i64::from(cell_size));
    let y_diff = ((pos.y - half).round() as i64).rem_euclid(i64::from(cell_size));
    x_diff == 0 && y_diff == 0
}
