//! # Path Cache
//!
//! Remembers computed paths so identical requests skip the search.
//!
//! Entries are keyed by the requesting entity's shape class, the cell it
//! starts from and the exact target. Every hit hands out a fresh copy with the
//! cursor rewound, so entities following the same route never share state.
//! Entries are never invalidated: if passability changes after a path was
//! stored, [`PathCache::clear`] is the only way to forget it.

use crate::{Cell, Entity, GridPathData, Point, ShapeClass};
use std::collections::HashMap;

/// Bit-exact, hashable form of a target position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PointKey(u64, u64);

impl From<Point> for PointKey {
    fn from(point: Point) -> Self {
        // Adding zero folds -0.0 into 0.0 so both hash alike.
        Self((point.x + 0.0).to_bits(), (point.y + 0.0).to_bits())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    shape_class: ShapeClass,
    origin: Cell,
    target: PointKey,
}

impl CacheKey {
    fn new(entity: &dyn Entity, target: Point, cell_size: i32) -> Self {
        Self {
            shape_class: entity.shape_class(),
            origin: Cell::from_point(entity.centre_pos(), cell_size),
            target: target.into(),
        }
    }
}

/// Unbounded store of previously computed paths.
///
/// # Examples
///
/// ```
/// use tickpath::{GridPathData, PathCache, Point, QuickEntity};
///
/// let mut cache = PathCache::new();
/// let entity = QuickEntity::new(Point::new(16.0, 16.0), 1.0);
/// let target = Point::new(48.0, 16.0);
///
/// assert!(!cache.cached_data(&entity, target, 32).is_valid());
/// cache.add_cached_data(&entity, target, 32, &GridPathData::new(target, Vec::new()));
/// assert!(cache.cached_data(&entity, target, 32).is_valid());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathCache {
    entries: HashMap<CacheKey, GridPathData>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the path cached for `entity` to reach `target` from
    /// the cell of size `cell_size` it stands in.
    pub fn get(&self, entity: &dyn Entity, target: Point, cell_size: i32) -> Option<GridPathData> {
        self.entries
            .get(&CacheKey::new(entity, target, cell_size))
            .map(GridPathData::rewound)
    }

    /// Like [`PathCache::get`], but returns invalid path data on a miss.
    pub fn cached_data(&self, entity: &dyn Entity, target: Point, cell_size: i32) -> GridPathData {
        self.get(entity, target, cell_size).unwrap_or_default()
    }

    /// Stores a path for `entity` to reach `target` from the cell it stands in.
    ///
    /// Entries are immutable: a path already cached for the same key is kept.
    /// Invalid path data is ignored.
    pub fn add_cached_data(
        &mut self,
        entity: &dyn Entity,
        target: Point,
        cell_size: i32,
        data: &GridPathData,
    ) {
        if !data.is_valid() {
            return;
        }
        self.entries
            .entry(CacheKey::new(entity, target, cell_size))
            .or_insert_with(|| data.rewound());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forgets every cached path.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
