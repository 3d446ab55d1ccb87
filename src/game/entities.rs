//! # Entities
//!
//! The entity abstraction that pathing moves around, and the store the tick
//! driver looks tracked entities up in.

use crate::{new_entity_id, EntityId, Point, ShapeClass};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Something that can be moved along a path.
pub trait Entity {
    /// Stable identity used to track the entity between ticks.
    fn id(&self) -> EntityId;

    /// Centre of the entity in world space.
    fn centre_pos(&self) -> Point;

    fn set_centre_pos(&mut self, pos: Point);

    /// Facing in degrees, 0 being north.
    fn rotation(&self) -> f64;

    fn set_rotation(&mut self, rotation: f64);

    /// Movement speed in world units per second.
    fn speed(&self) -> f64;

    /// Class of entity; paths are shared between entities of the same class.
    fn shape_class(&self) -> ShapeClass {
        ShapeClass::default()
    }
}

/// Plain entity with public state, suitable for simulations and tests.
///
/// # Examples
///
/// ```
/// use tickpath::{Entity, Point, QuickEntity};
///
/// let entity = QuickEntity::new(Point::new(16.0, 16.0), 100.0);
/// assert_eq!(entity.centre_pos(), Point::new(16.0, 16.0));
/// assert_eq!(entity.rotation(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickEntity {
    pub id: EntityId,
    pub centre_pos: Point,
    pub rotation: f64,
    pub speed: f64,
    pub shape_class: ShapeClass,
}

impl QuickEntity {
    /// Creates an entity with a fresh id, facing north.
    pub fn new(centre_pos: Point, speed: f64) -> Self {
        Self {
            id: new_entity_id(),
            centre_pos,
            rotation: 0.0,
            speed,
            shape_class: ShapeClass::default(),
        }
    }

    /// Sets the shape class of the entity.
    pub fn with_shape_class(mut self, shape_class: ShapeClass) -> Self {
        self.shape_class = shape_class;
        self
    }
}

impl Entity for QuickEntity {
    fn id(&self) -> EntityId {
        self.id
    }

    fn centre_pos(&self) -> Point {
        self.centre_pos
    }

    fn set_centre_pos(&mut self, pos: Point) {
        self.centre_pos = pos;
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }

    fn speed(&self) -> f64 {
        self.speed
    }

    fn shape_class(&self) -> ShapeClass {
        self.shape_class
    }
}

/// Lookup of live entities by id.
///
/// An id that can no longer be found is treated as a destroyed entity.
pub trait EntityStore {
    fn entity(&self, id: EntityId) -> Option<&dyn Entity>;

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut dyn Entity>;
}

impl<E: Entity> EntityStore for HashMap<EntityId, E> {
    fn entity(&self, id: EntityId) -> Option<&dyn Entity> {
        self.get(&id).map(|entity| entity as &dyn Entity)
    }

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut dyn Entity> {
        self.get_mut(&id).map(|entity| entity as &mut dyn Entity)
    }
}
