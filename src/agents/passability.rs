//! # Passability
//!
//! Answers whether an entity may occupy a position. Queried once per
//! candidate cell each time the search expands a node.

use crate::{Cell, Entity, Point};
use std::collections::HashSet;

/// Decides whether `entity` may stand at `pos`.
pub trait PassabilityAgent {
    fn is_passable(&self, pos: Point, entity: &dyn Entity) -> bool;
}

impl<F> PassabilityAgent for F
where
    F: Fn(Point, &dyn Entity) -> bool,
{
    fn is_passable(&self, pos: Point, entity: &dyn Entity) -> bool {
        self(pos, entity)
    }
}

/// Everything is passable.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenPassability;

impl PassabilityAgent for OpenPassability {
    fn is_passable(&self, _pos: Point, _entity: &dyn Entity) -> bool {
        true
    }
}

/// Bounded rectangular grid of cells, some of which are blocked.
///
/// Cells outside `0..width` by `0..height` are impassable.
///
/// # Examples
///
/// ```
/// use tickpath::{Cell, GridPassability, PassabilityAgent, Point, QuickEntity};
///
/// let mut grid = GridPassability::new(5, 5, 32);
/// grid.block(Cell::new(1, 0));
///
/// let entity = QuickEntity::new(Point::new(16.0, 16.0), 1.0);
/// assert!(grid.is_passable(Point::new(16.0, 16.0), &entity));
/// assert!(!grid.is_passable(Point::new(48.0, 16.0), &entity));
/// assert!(!grid.is_passable(Point::new(-16.0, 16.0), &entity));
/// ```
#[derive(Debug, Clone)]
pub struct GridPassability {
    width: i32,
    height: i32,
    cell_size: i32,
    blocked: HashSet<Cell>,
}

impl GridPassability {
    /// Creates an open grid of `width` by `height` cells.
    pub fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Self {
            width,
            height,
            cell_size,
            blocked: HashSet::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn block(&mut self, cell: Cell) {
        self.blocked.insert(cell);
    }

    pub fn unblock(&mut self, cell: Cell) {
        self.blocked.remove(&cell);
    }

    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.blocked.contains(&cell)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    /// Returns true if `cell` is inside the grid and not blocked.
    pub fn is_cell_open(&self, cell: Cell) -> bool {
        self.contains(cell) && !self.is_blocked(cell)
    }
}

impl PassabilityAgent for GridPassability {
    fn is_passable(&self, pos: Point, _entity: &dyn Entity) -> bool {
        self.is_cell_open(Cell::from_point(pos, self.cell_size))
    }
}
