//! # Path Data
//!
//! A computed route plus the cursor recording how far along it an entity is.

use crate::{Cell, Point};
use serde::{Deserialize, Serialize};

/// One waypoint of a computed path: the centre of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathNode {
    pub pos: Point,
    pub cell: Cell,
    /// Path distance from the origin to this waypoint
    pub start_cost: f64,
    /// Estimated distance remaining when this waypoint was scored
    pub target_cost: f64,
}

impl PathNode {
    pub fn total_cost(&self) -> f64 {
        self.start_cost + self.target_cost
    }
}

/// Path being followed by one entity.
///
/// The origin cell is not part of `nodes`, since the entity is already there.
/// A default-constructed value is invalid and stands for "no path".
///
/// # Examples
///
/// ```
/// use tickpath::GridPathData;
///
/// let data = GridPathData::default();
/// assert!(!data.is_valid());
/// assert!(data.current_node().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GridPathData {
    target_pos: Point,
    nodes: Vec<PathNode>,
    current_node_index: Option<usize>,
}

impl GridPathData {
    /// Creates a path with the cursor on its first waypoint.
    pub fn new(target_pos: Point, nodes: Vec<PathNode>) -> Self {
        Self {
            target_pos,
            nodes,
            current_node_index: Some(0),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.current_node_index.is_some()
    }

    pub fn target_pos(&self) -> Point {
        self.target_pos
    }

    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    /// Index of the waypoint currently being steered to, or None if invalid.
    ///
    /// Equal to `nodes().len()` once every waypoint has been reached.
    pub fn current_node_index(&self) -> Option<usize> {
        self.current_node_index
    }

    /// Waypoint currently being steered to.
    pub fn current_node(&self) -> Option<&PathNode> {
        self.current_node_index
            .and_then(|index| self.nodes.get(index))
    }

    /// Returns true once the cursor has moved past the last waypoint.
    pub fn is_complete(&self) -> bool {
        self.current_node_index
            .is_some_and(|index| index >= self.nodes.len())
    }

    /// Moves the cursor to the next waypoint. Never moves past the end.
    pub fn advance(&mut self) {
        if let Some(index) = self.current_node_index.as_mut() {
            if *index < self.nodes.len() {
                *index += 1;
            }
        }
    }

    /// Returns a copy with the cursor back on the first waypoint.
    pub fn rewound(&self) -> Self {
        Self {
            target_pos: self.target_pos,
            nodes: self.nodes.clone(),
            current_node_index: self.current_node_index.map(|_| 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(x: i32, y: i32) -> PathNode {
        let cell = Cell::new(x, y);
        PathNode {
            pos: cell.centre(32),
            cell,
            start_cost: 0.0,
            target_cost: 0.0,
        }
    }

    #[test]
    fn test_new_path_starts_at_first_node() {
        let data = GridPathData::new(Point::new(80.0, 16.0), vec![node(1, 0), node(2, 0)]);
        assert!(data.is_valid());
        assert_eq!(data.current_node_index(), Some(0));
        assert_eq!(data.current_node().map(|n| n.cell), Some(Cell::new(1, 0)));
        assert!(!data.is_complete());
    }

    #[test]
    fn test_advance_caps_at_length() {
        let mut data = GridPathData::new(Point::new(80.0, 16.0), vec![node(1, 0), node(2, 0)]);
        data.advance();
        data.advance();
        assert!(data.is_complete());
        data.advance();
        assert_eq!(data.current_node_index(), Some(2));
        assert!(data.current_node().is_none());
    }

    #[test]
    fn test_empty_path_is_complete_immediately() {
        let data = GridPathData::new(Point::new(16.0, 16.0), Vec::new());
        assert!(data.is_valid());
        assert!(data.is_complete());
    }

    #[test]
    fn test_invalid_path_never_advances() {
        let mut data = GridPathData::default();
        data.advance();
        assert_eq!(data.current_node_index(), None);
        assert!(!data.is_complete());
    }

    #[test]
    fn test_rewound_copy_is_independent() {
        let mut data = GridPathData::new(Point::new(80.0, 16.0), vec![node(1, 0), node(2, 0)]);
        data.advance();
        let copy = data.rewound();
        assert_eq!(copy.current_node_index(), Some(0));
        assert_eq!(data.current_node_index(), Some(1));
        assert_eq!(copy.nodes(), data.nodes());
    }
}
