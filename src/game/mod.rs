//! # Game Module
//!
//! World-space geometry, grid cells, entities and the simulation clock.
//!
//! This module contains the fundamental building blocks the pather works on:
//! - Continuous world positions and the implicit grid laid over them
//! - Cardinal movement directions used to expand the grid
//! - The entity abstraction moved by steering agents
//! - The fixed-step timer that produces simulation ticks

pub mod entities;
pub mod timer;

pub use entities::*;
pub use timer::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A position in continuous world space.
///
/// # Examples
///
/// ```
/// use tickpath::Point;
///
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(3.0, 4.0);
/// assert_eq!(a.distance_to(b), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the Euclidean distance to another point.
    pub fn distance_to(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Compares two points allowing for floating point noise.
    pub fn fuzzy_eq(self, other: Point) -> bool {
        (self.x - other.x).abs() < 1e-9 && (self.y - other.y).abs() < 1e-9
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A cell of the implicit grid, in cell units.
///
/// Cell `(0, 0)` covers world space `[0, cell_size)` on both axes and its
/// centre is at `(cell_size / 2, cell_size / 2)`.
///
/// # Examples
///
/// ```
/// use tickpath::{Cell, Point};
///
/// let cell = Cell::from_point(Point::new(48.0, 16.0), 32);
/// assert_eq!(cell, Cell::new(1, 0));
/// assert_eq!(cell.centre(32), Point::new(48.0, 16.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Creates a new cell with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the cell containing `point`.
    ///
    /// Coordinates beyond the `i32` range saturate; use
    /// [`Cell::try_from_point`] where that matters.
    pub fn from_point(point: Point, cell_size: i32) -> Self {
        let size = f64::from(cell_size);
        Self::new(
            (point.x / size).floor() as i32,
            (point.y / size).floor() as i32,
        )
    }

    /// Returns the cell containing `point`, or None if it has no cell
    /// coordinates that fit in an `i32`.
    pub fn try_from_point(point: Point, cell_size: i32) -> Option<Self> {
        let size = f64::from(cell_size);
        let axis = |value: f64| {
            let cell = (value / size).floor();
            (cell >= f64::from(i32::MIN) && cell <= f64::from(i32::MAX)).then_some(cell as i32)
        };
        Some(Self::new(axis(point.x)?, axis(point.y)?))
    }

    /// Returns the world-space centre of this cell.
    pub fn centre(self, cell_size: i32) -> Point {
        let size = f64::from(cell_size);
        Point::new(
            f64::from(self.x) * size + size / 2.0,
            f64::from(self.y) * size + size / 2.0,
        )
    }

    /// Returns the cell one step away in `direction`, or None at the edge of
    /// the coordinate range.
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.to_delta();
        Some(Self::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    /// Calculates the Manhattan distance to another cell.
    pub fn manhattan_distance(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// Directions the grid is expanded in. Diagonal moves are never made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Converts a direction to a cell delta. North is towards negative y.
    pub fn to_delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// Converts a cell delta to a direction.
    ///
    /// Returns None if the delta isn't a single cardinal step.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        match (dx, dy) {
            (0, -1) => Some(Direction::North),
            (0, 1) => Some(Direction::South),
            (1, 0) => Some(Direction::East),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }

    /// Rotation in degrees of an entity facing this direction.
    pub fn rotation(self) -> f64 {
        match self {
            Direction::North => 0.0,
            Direction::South => 180.0,
            Direction::East => 90.0,
            Direction::West => 270.0,
        }
    }

    /// Returns the 4 directions in the order neighbours are expanded.
    pub fn cardinal() -> [Direction; 4] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }
}

/// Unique identifier for pathing entities.
pub type EntityId = Uuid;

/// Creates a new unique entity ID.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4()
}

/// Size/shape class of an entity.
///
/// Entities of the same class see the same passability, so they can share
/// cached paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ShapeClass(pub u32);
