//! # Search Policies
//!
//! Target-dependent scoring kept out of the search loop, so the same loop
//! serves different goal semantics.

use crate::{Entity, GridNode, Point};
use serde::{Deserialize, Serialize};

/// Scores nodes relative to one target and decides when a search is done.
pub trait SearchPolicy {
    /// Position the search is heading for.
    fn target(&self) -> Point;

    /// Path distance from the origin to `node` when reached via `parent`.
    fn calculate_start_cost(&self, node: &GridNode, parent: Option<&GridNode>) -> f64;

    /// Estimated distance remaining from `node` to the target.
    fn calculate_target_cost(&self, node: &GridNode) -> f64;

    /// Returns true if reaching `node` completes the path for `entity`.
    fn is_path_complete(&self, entity: &dyn Entity, start_pos: Point, node: &GridNode) -> bool;
}

fn accumulated_distance(node: &GridNode, parent: Option<&GridNode>) -> f64 {
    parent.map_or(0.0, |parent| {
        parent.start_cost + parent.pos.distance_to(node.pos)
    })
}

/// The path ends on the target itself.
///
/// Costs are straight-line distances, which never overestimate on a
/// 4-connected grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetPolicy {
    target: Point,
}

impl TargetPolicy {
    pub fn new(target: Point) -> Self {
        Self { target }
    }
}

impl SearchPolicy for TargetPolicy {
    fn target(&self) -> Point {
        self.target
    }

    fn calculate_start_cost(&self, node: &GridNode, parent: Option<&GridNode>) -> f64 {
        accumulated_distance(node, parent)
    }

    fn calculate_target_cost(&self, node: &GridNode) -> f64 {
        node.pos.distance_to(self.target)
    }

    fn is_path_complete(&self, _entity: &dyn Entity, _start_pos: Point, node: &GridNode) -> bool {
        node.pos.fuzzy_eq(self.target)
    }
}

/// The path ends on the target or on any cell one step away from it.
///
/// Useful when the target is itself impassable, such as a building the
/// entity should walk up to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjacentPolicy {
    target: Point,
    reach: f64,
}

impl AdjacentPolicy {
    pub fn new(target: Point, cell_size: i32) -> Self {
        Self {
            target,
            reach: f64::from(cell_size),
        }
    }
}

impl SearchPolicy for AdjacentPolicy {
    fn target(&self) -> Point {
        self.target
    }

    fn calculate_start_cost(&self, node: &GridNode, parent: Option<&GridNode>) -> f64 {
        accumulated_distance(node, parent)
    }

    fn calculate_target_cost(&self, node: &GridNode) -> f64 {
        (node.pos.distance_to(self.target) - self.reach).max(0.0)
    }

    fn is_path_complete(&self, _entity: &dyn Entity, _start_pos: Point, node: &GridNode) -> bool {
        node.pos.distance_to(self.target) <= self.reach + 1e-9
    }
}

/// Selects the policy a pather builds for each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PolicyKind {
    /// Stop on the target cell
    #[default]
    Target,
    /// Stop on the target cell or next to it
    Adjacent,
}

impl PolicyKind {
    /// Builds the policy for a request towards `target`.
    pub fn build(self, target: Point, cell_size: i32) -> Box<dyn SearchPolicy> {
        match self {
            PolicyKind::Target => Box::new(TargetPolicy::new(target)),
            PolicyKind::Adjacent => Box::new(AdjacentPolicy::new(target, cell_size)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, QuickEntity};

    #[test]
    fn test_start_cost_accumulates_through_parent() {
        let policy = TargetPolicy::new(Point::new(144.0, 16.0));
        let mut parent = GridNode::new(Cell::new(1, 0), 32);
        parent.start_cost = 32.0;
        let node = GridNode::new(Cell::new(2, 0), 32);

        assert_eq!(policy.calculate_start_cost(&node, Some(&parent)), 64.0);
        assert_eq!(policy.calculate_start_cost(&node, None), 0.0);
    }

    #[test]
    fn test_target_cost_is_straight_line() {
        let policy = TargetPolicy::new(Point::new(112.0, 144.0));
        let node = GridNode::new(Cell::new(0, 0), 32);
        assert_eq!(policy.calculate_target_cost(&node), 160.0);
    }

    #[test]
    fn test_target_policy_completes_on_target_only() {
        let entity = QuickEntity::new(Point::new(16.0, 16.0), 1.0);
        let policy = TargetPolicy::new(Point::new(48.0, 16.0));
        let start = entity.centre_pos;

        assert!(policy.is_path_complete(&entity, start, &GridNode::new(Cell::new(1, 0), 32)));
        assert!(!policy.is_path_complete(&entity, start, &GridNode::new(Cell::new(0, 0), 32)));
    }

    #[test]
    fn test_adjacent_policy_completes_next_to_target() {
        let entity = QuickEntity::new(Point::new(16.0, 16.0), 1.0);
        let policy = AdjacentPolicy::new(Cell::new(3, 0).centre(32), 32);
        let start = entity.centre_pos;

        assert!(policy.is_path_complete(&entity, start, &GridNode::new(Cell::new(2, 0), 32)));
        assert!(policy.is_path_complete(&entity, start, &GridNode::new(Cell::new(3, 0), 32)));
        assert!(!policy.is_path_complete(&entity, start, &GridNode::new(Cell::new(2, 1), 32)));
        assert_eq!(policy.calculate_target_cost(&GridNode::new(Cell::new(2, 0), 32)), 0.0);
    }

    #[test]
    fn test_policy_kind_builds_matching_policy() {
        let entity = QuickEntity::new(Point::new(16.0, 16.0), 1.0);
        let target = Cell::new(2, 0).centre(32);
        let near = GridNode::new(Cell::new(1, 0), 32);

        let exact = PolicyKind::Target.build(target, 32);
        let adjacent = PolicyKind::Adjacent.build(target, 32);
        assert!(!exact.is_path_complete(&entity, entity.centre_pos, &near));
        assert!(adjacent.is_path_complete(&entity, entity.centre_pos, &near));
    }
}
