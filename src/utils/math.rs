//! # Game Mathematics
//!
//! Angle and proximity calculations used by steering.

use crate::{Entity, Point};

/// Angle in degrees of the line from `from` to `to`.
///
/// Measured the screen way: 0 points along positive x and angles grow
/// clockwise because y grows downwards.
///
/// # Examples
///
/// ```
/// use tickpath::{direction_to, Point};
///
/// assert_eq!(direction_to(Point::new(0.0, 0.0), Point::new(0.0, 10.0)), 90.0);
/// ```
pub fn direction_to(from: Point, to: Point) -> f64 {
    let delta = to - from;
    let angle = delta.y.atan2(delta.x).to_degrees();
    if angle < 0.0 {
        angle + 360.0
    } else {
        angle
    }
}

/// Returns true if `entity` is within `lenience` of `pos`.
pub fn is_next_to_target_pos(entity: &dyn Entity, pos: Point, lenience: f64) -> bool {
    entity.centre_pos().distance_to(pos) <= lenience
}
