//! # Steering
//!
//! Moves an entity towards one point per tick and reports arrival.

use crate::{config, direction_to, is_next_to_target_pos, Entity, Point};

/// Per-tick motion primitive.
pub trait SteeringAgent {
    /// Moves `entity` towards `pos` for `delta` seconds.
    ///
    /// Returns true once the entity has converged on `pos`.
    fn steer_to(&mut self, entity: &mut dyn Entity, pos: Point, delta: f64) -> bool;
}

/// Sets the entity's position directly, `speed * delta` units per tick.
///
/// The entity is turned to face where it's going. It never overshoots: the
/// last step of each waypoint is cut short, and once it's within
/// [`config::ARRIVAL_LENIENCE`] it's snapped onto the waypoint so the next
/// search starts from a cell centre.
///
/// # Examples
///
/// ```
/// use tickpath::{DirectSteeringAgent, Entity, Point, QuickEntity, SteeringAgent};
///
/// let mut entity = QuickEntity::new(Point::new(16.0, 16.0), 100.0);
/// let mut steering = DirectSteeringAgent;
///
/// assert!(!steering.steer_to(&mut entity, Point::new(48.0, 16.0), 0.1));
/// assert_eq!(entity.centre_pos(), Point::new(26.0, 16.0));
/// assert_eq!(entity.rotation(), 90.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectSteeringAgent;

impl SteeringAgent for DirectSteeringAgent {
    fn steer_to(&mut self, entity: &mut dyn Entity, pos: Point, delta: f64) -> bool {
        let lenience = config::ARRIVAL_LENIENCE;
        if !is_next_to_target_pos(entity, pos, lenience) {
            let current = entity.centre_pos();
            entity.set_rotation((direction_to(current, pos) + 90.0) % 360.0);

            let remaining = current.distance_to(pos);
            let move_distance = (entity.speed() * delta).min(remaining);
            let ratio = move_distance / remaining;
            let next = current + (pos - current) * ratio;
            entity.set_centre_pos(next);

            if !is_next_to_target_pos(entity, pos, lenience) {
                return false;
            }
        }

        entity.set_centre_pos(pos);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuickEntity;

    #[test]
    fn test_arrives_within_one_tick_when_fast() {
        let mut entity = QuickEntity::new(Point::new(16.0, 16.0), 10_000.0);
        let mut steering = DirectSteeringAgent;
        assert!(steering.steer_to(&mut entity, Point::new(16.0, 48.0), 0.01));
        assert_eq!(entity.centre_pos, Point::new(16.0, 48.0));
        assert_eq!(entity.rotation, 180.0);
    }

    #[test]
    fn test_takes_several_ticks_when_slow() {
        let mut entity = QuickEntity::new(Point::new(48.0, 16.0), 800.0);
        let mut steering = DirectSteeringAgent;
        let target = Point::new(16.0, 16.0);

        let mut ticks = 1;
        while !steering.steer_to(&mut entity, target, 0.01) {
            ticks += 1;
            assert!(ticks < 10, "steering never converged");
        }
        assert_eq!(ticks, 4);
        assert_eq!(entity.centre_pos, target);
        assert_eq!(entity.rotation, 270.0);
    }

    #[test]
    fn test_facing_north_wraps_to_zero() {
        let mut entity = QuickEntity::new(Point::new(16.0, 48.0), 1.0);
        let mut steering = DirectSteeringAgent;
        assert!(!steering.steer_to(&mut entity, Point::new(16.0, 16.0), 0.01));
        assert_eq!(entity.rotation, 0.0);
    }

    #[test]
    fn test_already_there() {
        let mut entity = QuickEntity::new(Point::new(16.2, 16.0), 0.0);
        let mut steering = DirectSteeringAgent;
        assert!(steering.steer_to(&mut entity, Point::new(16.0, 16.0), 0.01));
        assert_eq!(entity.centre_pos, Point::new(16.0, 16.0));
    }
}
